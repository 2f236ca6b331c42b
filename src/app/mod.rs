#[cfg(feature = "cli")]
pub mod commands;
pub mod report;

pub use report::{OutputFormat, Report, ReportWriter};
