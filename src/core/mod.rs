pub mod fetcher;
pub mod sdmx;

pub use crate::domain::{Currency, Observation};
pub use crate::utils::error::Result;
pub use fetcher::RateFetcher;
