//! System Metadata Collection
//!
//! Collects the host details stored alongside every report:
//!
//! - **Git**: current commit hash and branch name
//! - **OS**: operating system name and architecture
//! - **CPU**: model name and core count
//! - **Memory**: total system RAM in GB
//! - **Timestamp**: UTC time of report generation
//!
//! CPU model and memory are read from `/proc` on Linux and come back as
//! "Unknown" / 0 elsewhere.

use chrono::Utc;
use regbench_report::{ReportMeta, SCHEMA_VERSION, SystemInfo};

/// Build report metadata including system info and git details
pub fn build_report_meta() -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: get_cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: num_cpus(),
        memory_gb: get_memory_gb().unwrap_or(0.0),
    };

    ReportMeta {
        schema_version: SCHEMA_VERSION,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        git_commit: git_output(&["rev-parse", "HEAD"]),
        git_branch: git_output(&["rev-parse", "--abbrev-ref", "HEAD"]),
        system,
    }
}

/// Run git and return trimmed stdout, or `None` outside a repository
fn git_output(args: &[&str]) -> Option<String> {
    std::process::Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(target_os = "linux")]
fn get_cpu_model() -> Option<String> {
    std::fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|content| parse_cpu_model(&content))
}

#[cfg(not(target_os = "linux"))]
fn get_cpu_model() -> Option<String> {
    None
}

fn num_cpus() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}

#[cfg(target_os = "linux")]
fn get_memory_gb() -> Option<f64> {
    std::fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|content| parse_memory_gb(&content))
}

#[cfg(not(target_os = "linux"))]
fn get_memory_gb() -> Option<f64> {
    None
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .find(|l| l.starts_with("model name"))
        .and_then(|l| l.split(':').nth(1))
        .map(|s| s.trim().to_string())
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_memory_gb(meminfo: &str) -> Option<f64> {
    meminfo
        .lines()
        .find(|l| l.starts_with("MemTotal"))
        .and_then(|l| {
            l.split_whitespace()
                .nth(1)
                .and_then(|s| s.parse::<u64>().ok())
        })
        .map(|kb| kb as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu_model() {
        let cpuinfo = "processor\t: 0\nvendor_id\t: GenuineIntel\nmodel name\t: Intel(R) Xeon(R) CPU @ 2.20GHz\n";
        assert_eq!(
            parse_cpu_model(cpuinfo).as_deref(),
            Some("Intel(R) Xeon(R) CPU @ 2.20GHz")
        );
        assert_eq!(parse_cpu_model("processor : 0\n"), None);
    }

    #[test]
    fn test_parse_memory_gb() {
        let meminfo = "MemTotal:       16777216 kB\nMemFree:         1024 kB\n";
        let gb = parse_memory_gb(meminfo).unwrap();
        assert!((gb - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_meta_fields() {
        let meta = build_report_meta();
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert!(!meta.version.is_empty());
        assert!(meta.system.cpu_cores >= 1);
    }
}
