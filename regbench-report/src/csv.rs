//! CSV Output
//!
//! One row per engine. Failed engines keep their row with empty timing
//! columns so spreadsheets line up across runs.

use crate::report::Report;

const HEADER: &str = "id,name,status,elapsed_us,elapsed_ns,cycles,warmup_iterations,measured_iterations,searches,matches,ns_per_search,mismatches,error";

/// Generate a CSV report
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::from(HEADER);
    output.push('\n');

    for result in &report.results {
        let status = serde_json::to_value(result.status)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let timing = match &result.metrics {
            Some(m) => format!(
                "{},{},{},{},{},{},{},{:.2}",
                m.elapsed_us,
                m.elapsed_ns,
                m.cycles,
                m.warmup_iterations,
                m.measured_iterations,
                m.searches,
                m.matches,
                m.ns_per_search
            ),
            None => ",,,,,,,".to_string(),
        };

        let error = result
            .failure
            .as_ref()
            .map(|f| escape(&f.message))
            .unwrap_or_default();

        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            escape(&result.id),
            escape(&result.name),
            status,
            timing,
            result.mismatches.len(),
            error
        ));
    }

    output
}

/// Quote a field when it contains a delimiter, quote or newline
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
