#![warn(missing_docs)]
//! regbench CLI Library
//!
//! Command-line front end for the regex engine benchmark. The `regbench`
//! binary calls [`run`]; everything it does is also reachable from code
//! through [`run_with_cli`] and the re-exported executor pieces.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     regbench_cli::run()
//! }
//! ```

mod config;
mod executor;

pub use config::*;
pub use executor::{
    EngineExecutionResult, ExecutionConfig, Executor, VerificationResult, VerificationSummary,
    aggregate_verifications, build_report, build_report_meta, execute_verifications,
    failure_kind, format_human_output, format_timing_line, format_verification_output,
};

use clap::{Parser, Subcommand};
use regbench_core::{ENGINES, EngineDef, EngineOptions, Fixture, VerifyMode};
use regbench_report::{OutputFormat, Report, generate_csv_report, generate_json_report};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// regbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "regbench")]
#[command(
    author,
    version,
    about = "regbench - compare regex engines on a fixed corpus"
)]
pub struct Cli {
    /// Optional subcommand (List, Run, Verify, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter engines by regex on their id
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Output format: human, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Warm-up passes for every engine (default: per-engine)
    #[arg(long)]
    pub warmup: Option<u64>,

    /// Timed passes per engine
    #[arg(long, short = 'n')]
    pub iterations: Option<u64>,

    /// Expectation checking: off, warn, strict
    #[arg(long)]
    pub verify: Option<VerifyMode>,

    /// Run each engine on its own worker thread
    #[arg(long)]
    pub parallel: bool,

    /// Pin the benchmark thread to this CPU (Linux only)
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Backtracking budget per search
    #[arg(long)]
    pub backtrack_limit: Option<usize>,

    /// Do not record capture groups while searching
    #[arg(long)]
    pub no_capture_groups: bool,

    /// Add the brace-block pattern to the fixture
    #[arg(long)]
    pub include_block_pattern: bool,

    /// Save the JSON report.
    /// Optionally specify a path; defaults to config or target/regbench/report.json
    #[arg(long)]
    pub save_report: Option<Option<PathBuf>>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered engines and the fixture shape
    List,
    /// Run the benchmark (default)
    Run,
    /// Check match results against the fixture without timing
    Verify,
    /// Write a default regbench.toml to the current directory
    Init,
}

/// Run the regbench CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the regbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    let filter = if cli.verbose {
        "regbench=debug"
    } else {
        "regbench=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    // Discover regbench.toml configuration (CLI flags override)
    let config = RegbenchConfig::discover().unwrap_or_default();

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let fixture = if cli.include_block_pattern || config.runner.include_block_pattern {
        Fixture::with_block_pattern()
    } else {
        Fixture::standard()
    };

    match cli.command {
        Some(Commands::List) => list_engines(&cli, &fixture),
        Some(Commands::Verify) => verify_engines(&cli, &config, &fixture),
        Some(Commands::Init) => init_config(),
        Some(Commands::Run) | None => run_engines(&cli, &config, &fixture, format),
    }
}

/// Select engines whose id matches the CLI filter, in registry order.
fn filter_engines(cli: &Cli) -> anyhow::Result<Vec<&'static EngineDef>> {
    let filter_re = Regex::new(&cli.filter)
        .map_err(|e| anyhow::anyhow!("Invalid engine filter `{}`: {}", cli.filter, e))?;
    Ok(ENGINES
        .iter()
        .filter(|def| filter_re.is_match(def.id))
        .collect())
}

fn list_engines(cli: &Cli, fixture: &Fixture) -> anyhow::Result<()> {
    println!("regbench Plan:");

    let engines = filter_engines(cli)?;
    for def in &engines {
        let warmup = def
            .warmup_iterations
            .map(|n| format!("{} warm-up", n))
            .unwrap_or_else(|| "default warm-up".to_string());
        println!("├── {} ({}, {}): {}", def.id, def.name, warmup, def.description);
    }
    println!("{} engines found.", engines.len());

    let (patterns, inputs) = fixture.expectations().dimensions();
    println!(
        "Fixture: {} patterns × {} inputs, {} searches per pass, {} expected matches",
        patterns,
        inputs,
        fixture.searches_per_pass(),
        fixture.expectations().grid().count_matches()
    );

    Ok(())
}

/// Build an ExecutionConfig by layering: regbench.toml defaults → CLI overrides.
fn build_execution_config(cli: &Cli, config: &RegbenchConfig) -> ExecutionConfig {
    ExecutionConfig {
        warmup_iterations: cli.warmup.or(config.runner.warmup_iterations),
        measured_iterations: cli.iterations.unwrap_or(config.runner.measured_iterations),
        verify: cli.verify.unwrap_or(config.runner.verify),
        engine: engine_options(cli, config),
        parallel: cli.parallel || config.runner.parallel,
        pin_cpu: cli.pin_cpu.or(config.runner.pin_cpu),
    }
}

fn engine_options(cli: &Cli, config: &RegbenchConfig) -> EngineOptions {
    EngineOptions {
        backtrack_limit: cli
            .backtrack_limit
            .unwrap_or(config.runner.backtrack_limit),
        capture_groups: !cli.no_capture_groups && config.runner.capture_groups,
    }
}

fn run_engines(
    cli: &Cli,
    config: &RegbenchConfig,
    fixture: &Fixture,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let exec_config = build_execution_config(cli, config);
    if exec_config.measured_iterations == 0 {
        anyhow::bail!("--iterations must be at least 1");
    }

    let engines = filter_engines(cli)?;
    if engines.is_empty() {
        println!("No engines found.");
        return Ok(());
    }

    eprintln!(
        "Running {} engines ({}), {} measured passes...\n",
        engines.len(),
        if exec_config.parallel {
            "parallel"
        } else {
            "sequential"
        },
        exec_config.measured_iterations
    );

    let start_time = Instant::now();
    let executor = Executor::new(exec_config.clone());
    let results = executor.execute(&engines, fixture);

    let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
    let report = build_report(&results, fixture, &exec_config, total_duration_ms);

    // Generate output
    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Csv => generate_csv_report(&report),
        OutputFormat::Human => format_human_output(&report),
    };

    // Write output
    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    save_report_if_needed(cli, config, &report)?;

    // Exit with appropriate code
    if report.has_failures() {
        for result in report.results.iter().filter(|r| r.failure.is_some()) {
            if let Some(failure) = &result.failure {
                eprintln!("{} failed: {}", result.name, failure.message);
            }
        }
        eprintln!("\n{} engine(s) failed", report.summary.failed);
        std::process::exit(1);
    }

    Ok(())
}

fn verify_engines(cli: &Cli, config: &RegbenchConfig, fixture: &Fixture) -> anyhow::Result<()> {
    let engines = filter_engines(cli)?;
    if engines.is_empty() {
        println!("No engines found.");
        return Ok(());
    }

    let results = execute_verifications(&engines, fixture, &engine_options(cli, config));
    let summary = aggregate_verifications(&results);
    print!("{}", format_verification_output(fixture, &results));

    if summary.should_fail() {
        eprintln!(
            "\n{} engine(s) disagree with the fixture",
            summary.mismatched + summary.errors
        );
        std::process::exit(1);
    }

    Ok(())
}

fn init_config() -> anyhow::Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    std::fs::write(&path, RegbenchConfig::default_toml())?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Save the report as JSON if configured.
fn save_report_if_needed(cli: &Cli, config: &RegbenchConfig, report: &Report) -> anyhow::Result<()> {
    let should_save = cli.save_report.is_some() || config.output.save_report;
    if !should_save {
        return Ok(());
    }

    // Resolve path: CLI value > config value > default
    let path = cli
        .save_report
        .as_ref()
        .and_then(|opt| opt.clone())
        .or_else(|| config.output.report_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("target/regbench/report.json"));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = generate_json_report(report)?;
    std::fs::write(&path, json)?;
    eprintln!("Report saved to: {}", path.display());

    Ok(())
}
