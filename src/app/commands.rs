use crate::app::report::{Report, ReportWriter};
use crate::config::cli::Command;
use crate::core::fetcher::RateFetcher;
use crate::utils::error::Result;
use crate::utils::validation::validate_period_order;
use std::io::Write;

/// Runs one CLI command against `fetcher` and renders the outcome into `out`.
pub async fn execute<W: Write>(
    fetcher: &RateFetcher,
    command: &Command,
    writer: &ReportWriter,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Point { currency, date } => {
            let rate = fetcher.fetch_point(currency, date).await?;
            writer.write(
                out,
                &Report::Point {
                    currency,
                    date,
                    rate,
                },
            )
        }
        Command::Range {
            currency,
            start,
            end,
            average,
        } => {
            validate_period_order(start, end)?;
            let observations = fetcher.fetch_range(currency, start, end).await?;
            writer.write(
                out,
                &Report::Range {
                    currency,
                    start,
                    end,
                    observations: &observations,
                    average_only: *average,
                },
            )
        }
        Command::Average { currency, year } => {
            let average = fetcher.fetch_annual_average(currency, *year).await?;
            let period = year.to_string();
            writer.write(
                out,
                &Report::Average {
                    currency,
                    period: &period,
                    average,
                },
            )
        }
    }
}
