use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateError {
    #[error("Invalid currency: {code}")]
    InvalidCurrency { code: String },

    #[error("Request to {url} failed with HTTP status {status}")]
    HttpStatus { status: u16, url: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("No exchange rate data available for {currency} in {period}")]
    NoData { currency: String, period: String },

    #[error("Unparseable response: {message}")]
    Parse { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),
}

/// Coarse outcome classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    RequestFailed,
    NoData,
    Parse,
    Config,
    Output,
}

impl RateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RateError::InvalidCurrency { .. } => ErrorCategory::Validation,
            RateError::HttpStatus { .. } | RateError::Transport(_) => ErrorCategory::RequestFailed,
            RateError::NoData { .. } => ErrorCategory::NoData,
            RateError::Parse { .. } => ErrorCategory::Parse,
            RateError::InvalidConfigValue { .. } | RateError::Config { .. } => {
                ErrorCategory::Config
            }
            RateError::Io(_) | RateError::Serialization(_) | RateError::Csv(_) => {
                ErrorCategory::Output
            }
        }
    }

    /// True for both a non-success status and a transport failure.
    pub fn is_request_failure(&self) -> bool {
        self.category() == ErrorCategory::RequestFailed
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RateError::Transport(e) if e.is_timeout())
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RateError::InvalidCurrency { code } => format!("Invalid currency: {}", code),
            RateError::HttpStatus { status, .. } => {
                format!("The ECB data service answered with HTTP {}", status)
            }
            RateError::Transport(_) if self.is_timeout() => {
                "The ECB data service did not answer in time".to_string()
            }
            RateError::Transport(_) => "Could not reach the ECB data service".to_string(),
            RateError::NoData { currency, period } => {
                format!("No exchange rate data available for {} in {}", currency, period)
            }
            RateError::Parse { .. } => {
                "The ECB data service returned a response that could not be read".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => {
                "Use one of: EUR USD GBP JPY HUF SEK NOK RON BGN CHF CZK PLN DKK HRK CNY INR KRW TRY RUB MXN CAD BRL AUD"
            }
            ErrorCategory::RequestFailed if self.is_timeout() => {
                "Raise --timeout-seconds or try again later"
            }
            ErrorCategory::RequestFailed => "Check the network connection and the configured base URL",
            ErrorCategory::NoData => "Pick a period that contains ECB business days",
            ErrorCategory::Parse => "Check that the base URL points at the ECB SDMX data service",
            ErrorCategory::Config => "Fix the configuration file or command-line flags",
            ErrorCategory::Output => "Check the output destination",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::NoData => 0,
            ErrorCategory::Validation | ErrorCategory::Config => 1,
            ErrorCategory::RequestFailed => 2,
            ErrorCategory::Parse => 3,
            ErrorCategory::Output => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, RateError>;
