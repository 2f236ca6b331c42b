use crate::domain::{mean_rate, Observation};
use crate::utils::error::{RateError, Result};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["text", "json", "csv"];
}

impl FromStr for OutputFormat {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(RateError::InvalidConfigValue {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: format!("Unsupported format. Valid formats: {}", Self::NAMES.join(", ")),
            }),
        }
    }
}

/// Result of one fetch operation, ready to print.
#[derive(Debug, Clone)]
pub enum Report<'a> {
    Point {
        currency: &'a str,
        date: &'a str,
        rate: f64,
    },
    Range {
        currency: &'a str,
        start: &'a str,
        end: &'a str,
        observations: &'a [Observation],
        average_only: bool,
    },
    Average {
        currency: &'a str,
        period: &'a str,
        average: Option<f64>,
    },
}

#[derive(Serialize)]
struct RateRow<'a> {
    currency: &'a str,
    date: &'a str,
    rate: f64,
}

#[derive(Serialize)]
struct AverageRow<'a> {
    currency: &'a str,
    period: &'a str,
    average: Option<f64>,
}

#[derive(Serialize)]
struct RangeDocument<'a> {
    currency: &'a str,
    start: &'a str,
    end: &'a str,
    average: Option<f64>,
    observations: &'a [Observation],
}

#[derive(Debug, Clone, Copy)]
pub struct ReportWriter {
    format: OutputFormat,
    precision: usize,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(OutputFormat::Text, 4)
    }
}

impl ReportWriter {
    pub fn new(format: OutputFormat, precision: usize) -> Self {
        Self { format, precision }
    }

    pub fn write<W: Write>(&self, out: &mut W, report: &Report<'_>) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(out, report),
            OutputFormat::Json => Self::write_json(out, report),
            OutputFormat::Csv => Self::write_csv(out, report),
        }
    }

    fn write_text<W: Write>(&self, out: &mut W, report: &Report<'_>) -> Result<()> {
        let p = self.precision;
        match report {
            Report::Point {
                currency,
                date,
                rate,
            } => {
                writeln!(
                    out,
                    "The spot exchange rate for {} on {} is {:.*} {}/1.0000 EUR",
                    currency, date, p, rate, currency
                )?;
            }
            Report::Range {
                currency,
                start,
                end,
                observations,
                average_only,
            } => match mean_rate(observations) {
                None => writeln!(
                    out,
                    "No exchange rate data available for {} between {} and {}",
                    currency, start, end
                )?,
                Some(average) if *average_only => writeln!(
                    out,
                    "The average exchange rate for {} from {} to {} is {:.*} {}/1.0000 EUR",
                    currency, start, end, p, average, currency
                )?,
                Some(_) => {
                    writeln!(
                        out,
                        "Daily exchange rates for {} from {} to {}:",
                        currency, start, end
                    )?;
                    for obs in observations.iter() {
                        writeln!(
                            out,
                            "Date: {} | Rate: {:.*} {}/1.0000 EUR",
                            obs.date, p, obs.rate, currency
                        )?;
                    }
                }
            },
            Report::Average {
                currency,
                period,
                average,
            } => match average {
                Some(average) => writeln!(
                    out,
                    "The average exchange rate for {} in {} is {:.*} {}/1.0000 EUR",
                    currency, period, p, average, currency
                )?,
                None => writeln!(
                    out,
                    "No exchange rate data available for {} in {}",
                    currency, period
                )?,
            },
        }
        Ok(())
    }

    fn write_json<W: Write>(out: &mut W, report: &Report<'_>) -> Result<()> {
        match report {
            Report::Point {
                currency,
                date,
                rate,
            } => serde_json::to_writer_pretty(
                &mut *out,
                &RateRow {
                    currency,
                    date,
                    rate: *rate,
                },
            )?,
            Report::Range {
                currency,
                start,
                end,
                observations,
                ..
            } => serde_json::to_writer_pretty(
                &mut *out,
                &RangeDocument {
                    currency,
                    start,
                    end,
                    average: mean_rate(observations),
                    observations,
                },
            )?,
            Report::Average {
                currency,
                period,
                average,
            } => serde_json::to_writer_pretty(
                &mut *out,
                &AverageRow {
                    currency,
                    period,
                    average: *average,
                },
            )?,
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_csv<W: Write>(out: &mut W, report: &Report<'_>) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        match report {
            Report::Point {
                currency,
                date,
                rate,
            } => writer.serialize(RateRow {
                currency,
                date,
                rate: *rate,
            })?,
            Report::Range {
                currency,
                start,
                end,
                observations,
                average_only: true,
            } => {
                let period = format!("{}/{}", start, end);
                writer.serialize(AverageRow {
                    currency,
                    period: &period,
                    average: mean_rate(observations),
                })?
            }
            Report::Range {
                currency,
                observations,
                ..
            } => {
                if observations.is_empty() {
                    writer.write_record(["currency", "date", "rate"])?;
                }
                for obs in observations.iter() {
                    writer.serialize(RateRow {
                        currency,
                        date: &obs.date,
                        rate: obs.rate,
                    })?;
                }
            }
            Report::Average {
                currency,
                period,
                average,
            } => writer.serialize(AverageRow {
                currency,
                period,
                average: *average,
            })?,
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(writer: ReportWriter, report: &Report<'_>) -> String {
        let mut buf = Vec::new();
        writer.write(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> Vec<Observation> {
        vec![
            Observation::new("2023-03-01", 0.91),
            Observation::new("2023-03-02", 0.92),
        ]
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_point() {
        let text = render(
            ReportWriter::default(),
            &Report::Point {
                currency: "USD",
                date: "2023-03-01",
                rate: 1.0612,
            },
        );
        assert_eq!(
            text,
            "The spot exchange rate for USD on 2023-03-01 is 1.0612 USD/1.0000 EUR\n"
        );
    }

    #[test]
    fn test_text_range_daily_and_average() {
        let observations = sample();
        let daily = render(
            ReportWriter::default(),
            &Report::Range {
                currency: "USD",
                start: "2023-03-01",
                end: "2023-03-02",
                observations: &observations,
                average_only: false,
            },
        );
        assert_eq!(
            daily,
            "Daily exchange rates for USD from 2023-03-01 to 2023-03-02:\n\
             Date: 2023-03-01 | Rate: 0.9100 USD/1.0000 EUR\n\
             Date: 2023-03-02 | Rate: 0.9200 USD/1.0000 EUR\n"
        );

        let average = render(
            ReportWriter::new(OutputFormat::Text, 3),
            &Report::Range {
                currency: "USD",
                start: "2023-03-01",
                end: "2023-03-02",
                observations: &observations,
                average_only: true,
            },
        );
        assert!(average.starts_with("The average exchange rate for USD from 2023-03-01 to 2023-03-02 is 0.91"));
    }

    #[test]
    fn test_text_no_data() {
        let text = render(
            ReportWriter::default(),
            &Report::Average {
                currency: "GBP",
                period: "1990",
                average: None,
            },
        );
        assert_eq!(text, "No exchange rate data available for GBP in 1990\n");

        let text = render(
            ReportWriter::default(),
            &Report::Range {
                currency: "GBP",
                start: "2024-01-06",
                end: "2024-01-07",
                observations: &[],
                average_only: false,
            },
        );
        assert!(text.starts_with("No exchange rate data available for GBP between"));
    }

    #[test]
    fn test_json_range() {
        let observations = sample();
        let json = render(
            ReportWriter::new(OutputFormat::Json, 4),
            &Report::Range {
                currency: "USD",
                start: "2023-03-01",
                end: "2023-03-02",
                observations: &observations,
                average_only: false,
            },
        );
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["currency"], "USD");
        assert_eq!(value["observations"][1]["date"], "2023-03-02");
        assert_eq!(value["observations"][1]["rate"], 0.92);
        assert!((value["average"].as_f64().unwrap() - 0.915).abs() < 1e-12);
    }

    #[test]
    fn test_json_average_absent_is_null() {
        let json = render(
            ReportWriter::new(OutputFormat::Json, 4),
            &Report::Average {
                currency: "USD",
                period: "2023",
                average: None,
            },
        );
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["average"].is_null());
    }

    #[test]
    fn test_csv_range() {
        let observations = sample();
        let csv = render(
            ReportWriter::new(OutputFormat::Csv, 4),
            &Report::Range {
                currency: "USD",
                start: "2023-03-01",
                end: "2023-03-02",
                observations: &observations,
                average_only: false,
            },
        );
        assert_eq!(
            csv,
            "currency,date,rate\nUSD,2023-03-01,0.91\nUSD,2023-03-02,0.92\n"
        );
    }

    #[test]
    fn test_csv_empty_range_has_header() {
        let csv = render(
            ReportWriter::new(OutputFormat::Csv, 4),
            &Report::Range {
                currency: "USD",
                start: "2023-03-04",
                end: "2023-03-05",
                observations: &[],
                average_only: false,
            },
        );
        assert_eq!(csv, "currency,date,rate\n");
    }

    #[test]
    fn test_csv_point() {
        let csv = render(
            ReportWriter::new(OutputFormat::Csv, 4),
            &Report::Point {
                currency: "EUR",
                date: "2023-03-01",
                rate: 1.0,
            },
        );
        assert_eq!(csv, "currency,date,rate\nEUR,2023-03-01,1.0\n");
    }
}
