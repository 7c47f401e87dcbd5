//! Configuration loading from regbench.toml
//!
//! regbench configuration can be specified in a `regbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use regbench_core::{DEFAULT_BACKTRACK_LIMIT, DEFAULT_MEASURED_ITERATIONS, VerifyMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up during discovery
pub const CONFIG_FILE_NAME: &str = "regbench.toml";

/// regbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegbenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for engine invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Warm-up passes for every engine (unset = per-engine default)
    #[serde(default)]
    pub warmup_iterations: Option<u64>,
    /// Timed passes per engine
    #[serde(default = "default_measured_iterations")]
    pub measured_iterations: u64,
    /// Expectation checking: "off", "warn" or "strict"
    #[serde(default)]
    pub verify: VerifyMode,
    /// Run each engine on its own worker thread
    #[serde(default)]
    pub parallel: bool,
    /// Pin the benchmark thread to this CPU (Linux only)
    #[serde(default)]
    pub pin_cpu: Option<usize>,
    /// Backtracking budget per search for engines that support one
    #[serde(default = "default_backtrack_limit")]
    pub backtrack_limit: usize,
    /// Record capture groups while searching
    #[serde(default = "default_capture_groups")]
    pub capture_groups: bool,
    /// Add the brace-block pattern to the fixture
    #[serde(default)]
    pub include_block_pattern: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: None,
            measured_iterations: default_measured_iterations(),
            verify: VerifyMode::default(),
            parallel: false,
            pin_cpu: None,
            backtrack_limit: default_backtrack_limit(),
            capture_groups: default_capture_groups(),
            include_block_pattern: false,
        }
    }
}

fn default_measured_iterations() -> u64 {
    DEFAULT_MEASURED_ITERATIONS
}
fn default_backtrack_limit() -> usize {
    DEFAULT_BACKTRACK_LIMIT
}
fn default_capture_groups() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Save a JSON report after each run
    #[serde(default)]
    pub save_report: bool,
    /// Report file path
    #[serde(default)]
    pub report_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            save_report: false,
            report_path: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl RegbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for `regbench.toml`
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!("ignoring {}: {}", config_path.display(), e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# regbench Configuration

[runner]
# Warm-up passes for every engine (uncomment to override per-engine defaults)
# warmup_iterations = 10
# Timed passes per engine
measured_iterations = 100
# Expectation checking: "off", "warn" or "strict"
verify = "warn"
# Run each engine on its own worker thread
parallel = false
# Pin the benchmark thread to a CPU (uncomment to enable, Linux only)
# pin_cpu = 2
# Backtracking budget per search
backtrack_limit = 1000000
# Record capture groups while searching
capture_groups = true
# Add the brace-block pattern to the fixture
include_block_pattern = false

[output]
# Default output format: human, json, csv
format = "human"
# Save a JSON report after each run
save_report = false
# Report file (uncomment to enable)
# report_path = "target/regbench/report.json"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegbenchConfig::default();
        assert_eq!(config.runner.warmup_iterations, None);
        assert_eq!(config.runner.measured_iterations, 100);
        assert_eq!(config.runner.verify, VerifyMode::Warn);
        assert!(config.runner.capture_groups);
        assert!(!config.runner.include_block_pattern);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            warmup_iterations = 3
            measured_iterations = 20
            verify = "strict"

            [output]
            format = "json"
        "#;

        let config: RegbenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.warmup_iterations, Some(3));
        assert_eq!(config.runner.measured_iterations, 20);
        assert_eq!(config.runner.verify, VerifyMode::Strict);
        assert_eq!(config.output.format, "json");
        // Defaults should still apply
        assert_eq!(config.runner.backtrack_limit, DEFAULT_BACKTRACK_LIMIT);
        assert!(!config.output.save_report);
    }

    #[test]
    fn test_rejects_unknown_verify_mode() {
        let toml_str = r#"
            [runner]
            verify = "sometimes"
        "#;
        assert!(toml::from_str::<RegbenchConfig>(toml_str).is_err());
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = RegbenchConfig::default_toml();
        let config: RegbenchConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.runner.measured_iterations, 100);
        assert_eq!(config.runner.warmup_iterations, None);
        assert_eq!(config.runner.verify, VerifyMode::Warn);
    }

    #[test]
    fn test_discover_from_walks_up() {
        let root = std::env::temp_dir().join(format!("regbench-config-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.join(CONFIG_FILE_NAME),
            "[runner]\nmeasured_iterations = 7\n",
        )
        .unwrap();

        let config = RegbenchConfig::discover_from(&nested).unwrap();
        assert_eq!(config.runner.measured_iterations, 7);

        std::fs::remove_dir_all(&root).unwrap();
    }
}
