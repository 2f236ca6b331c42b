use anyhow::Context;
use clap::Parser;
use std::io::Write;
use ecb_rates::app::commands;
use ecb_rates::utils::logger;
use ecb_rates::{CliConfig, ErrorCategory, RateFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let fetcher = RateFetcher::new(&settings.ecb).context("failed to set up the HTTP client")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match commands::execute(&fetcher, &config.command, &settings.report, &mut out).await {
        Ok(()) => Ok(()),
        Err(e) if e.category() == ErrorCategory::NoData => {
            // informational, not a failure
            writeln!(out, "{}", e.user_friendly_message())?;
            Ok(())
        }
        Err(e) => {
            tracing::error!("{} (category: {:?})", e, e.category());
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
