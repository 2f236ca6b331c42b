//! Euro foreign exchange reference rates from the ECB data service.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::{OutputFormat, Report, ReportWriter};
pub use config::{toml_config::TomlConfig, EcbConfig};
pub use core::fetcher::RateFetcher;
pub use domain::{mean_rate, Currency, Observation};
pub use utils::error::{ErrorCategory, RateError, Result};
pub use utils::validation::validate_currency;
