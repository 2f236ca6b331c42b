use crate::app::report::{OutputFormat, ReportWriter};
use crate::config::toml_config::{TomlConfig, MAX_PRECISION};
use crate::config::EcbConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "ecb-rates")]
#[command(about = "Euro foreign exchange reference rates from the ECB data service")]
pub struct CliConfig {
    /// TOML file with [source] and [output] tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Data service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Decimal places for rates in text output
    #[arg(long)]
    pub precision: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Reference rate on a single date
    Point { currency: String, date: String },
    /// Daily reference rates between two dates
    Range {
        currency: String,
        start: String,
        end: String,
        /// Print only the mean over the period
        #[arg(long)]
        average: bool,
    },
    /// Mean reference rate over a calendar year
    Average { currency: String, year: i32 },
}

/// Fully merged settings: defaults, then the config file, then flags.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub ecb: EcbConfig,
    pub report: ReportWriter,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<ResolvedSettings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let mut ecb = file.apply_to(EcbConfig::default());
        if let Some(base_url) = &self.base_url {
            ecb.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            ecb.timeout = Duration::from_secs(timeout);
        }
        ecb.validate()?;

        let format = match self.format {
            Some(format) => format,
            None => file.output_format()?.unwrap_or_default(),
        };
        let precision = self.precision.or(file.precision()).unwrap_or(4);
        validate_range("precision", precision, 0, MAX_PRECISION)?;

        Ok(ResolvedSettings {
            ecb,
            report: ReportWriter::new(format, precision),
        })
    }
}
