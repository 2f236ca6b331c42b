#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://data-api.ecb.europa.eu/service/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Runtime settings for [`crate::RateFetcher`].
#[derive(Debug, Clone)]
pub struct EcbConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for EcbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: format!("ecb-rates/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Validate for EcbConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.base_url", &self.base_url)?;
        validate_range(
            "source.timeout_seconds",
            self.timeout.as_secs(),
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        Ok(())
    }
}
