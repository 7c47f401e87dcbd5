#![warn(missing_docs)]
//! regbench Report - Reporting
//!
//! Serializable report model plus machine-readable renderers:
//! - JSON (full report, round-trips through serde)
//! - CSV (one row per engine)
//!
//! Human-readable output lives in the CLI crate.

mod csv;
mod json;
mod report;

pub use csv::generate_csv_report;
pub use json::{generate_json_report, parse_json_report};
pub use report::{
    EngineReportResult, EngineStatus, FailureInfo, FixtureInfo, Report, ReportConfig, ReportMeta,
    ReportSummary, SCHEMA_VERSION, SystemInfo, TimingMetrics,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
