// Domain layer: currencies and observations. No I/O here.

pub mod model;

pub use model::{mean_rate, Currency, Observation};
