use crate::app::report::OutputFormat;
use crate::config::EcbConfig;
use crate::utils::error::{RateError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const MAX_PRECISION: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub precision: Option<usize>,
}

impl TomlConfig {
    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RateError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${NAME}` with the environment variable; unknown names stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RateError::Config {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Applies the `[source]` table on top of `base`.
    pub fn apply_to(&self, mut base: EcbConfig) -> EcbConfig {
        if let Some(base_url) = &self.source.base_url {
            base.base_url = base_url.clone();
        }
        if let Some(timeout) = self.source.timeout_seconds {
            base.timeout = Duration::from_secs(timeout);
        }
        if let Some(user_agent) = &self.source.user_agent {
            base.user_agent = user_agent.clone();
        }
        base
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .map(str::parse)
            .transpose()
    }

    pub fn precision(&self) -> Option<usize> {
        self.output.as_ref().and_then(|o| o.precision)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.source.base_url {
            validate_url("source.base_url", base_url)?;
        }
        if let Some(timeout) = self.source.timeout_seconds {
            validate_range(
                "source.timeout_seconds",
                timeout,
                1,
                crate::config::MAX_TIMEOUT_SECONDS,
            )?;
        }
        if let Some(user_agent) = &self.source.user_agent {
            validate_non_empty_string("source.user_agent", user_agent)?;
        }
        if let Some(output) = &self.output {
            if let Some(format) = &output.format {
                validate_one_of("output.format", format, OutputFormat::NAMES)?;
            }
            if let Some(precision) = output.precision {
                validate_range("output.precision", precision, 0, MAX_PRECISION)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
base_url = "http://localhost:8080/service/"
timeout_seconds = 5
user_agent = "rates-report/1.0"

[output]
format = "csv"
precision = 6
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_format().unwrap(), Some(OutputFormat::Csv));
        assert_eq!(config.precision(), Some(6));

        let ecb = config.apply_to(EcbConfig::default());
        assert_eq!(ecb.base_url, "http://localhost:8080/service/");
        assert_eq!(ecb.timeout, Duration::from_secs(5));
        assert_eq!(ecb.user_agent, "rates-report/1.0");
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_format().unwrap(), None);

        let ecb = config.apply_to(EcbConfig::default());
        assert_eq!(ecb.base_url, crate::config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ECB_RATES_TEST_BASE_URL", "http://mirror.local/service/");
        let config = TomlConfig::from_toml_str(
            r#"
[source]
base_url = "${ECB_RATES_TEST_BASE_URL}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.source.base_url.as_deref(),
            Some("http://mirror.local/service/")
        );
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
user_agent = "${ECB_RATES_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.source.user_agent.as_deref(),
            Some("${ECB_RATES_TEST_UNSET_VARIABLE}")
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[output]
format = "xml"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
        assert!(config.output_format().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = TomlConfig::from_toml_str("[source\nbase_url = 1").unwrap_err();
        assert!(matches!(err, RateError::Config { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[source]\ntimeout_seconds = 12").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.source.timeout_seconds, Some(12));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/ecb-rates.toml").unwrap_err();
        assert!(matches!(err, RateError::Io(_)));
    }
}
