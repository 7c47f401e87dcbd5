//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Parse a report previously written by [`generate_json_report`].
pub fn parse_json_report(json: &str) -> Result<Report, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{EngineStatus, sample_report};

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let json = generate_json_report(&report).unwrap();
        let parsed = parse_json_report(&json).unwrap();

        assert_eq!(parsed.results, report.results);
        assert_eq!(parsed.summary, report.summary);
        assert_eq!(parsed.meta.git_commit.as_deref(), Some("abc1234"));
        assert_eq!(parsed.fixture.expected_matches, 6);
        assert_eq!(parsed.result("fancy-regex").unwrap().status, EngineStatus::Failed);
    }

    #[test]
    fn test_empty_mismatches_omitted() {
        let json = generate_json_report(&sample_report()).unwrap();
        assert_eq!(json.matches("\"mismatches\"").count(), 1);
        assert!(json.contains("\"status\": \"passed\""));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_json_report("{\"meta\": 1}").is_err());
    }
}
