#![warn(missing_docs)]
//! LapBench CLI Library
//!
//! Command-line front-end for benchmark suites. Build a [`Suite`], register
//! its tests, and hand it to [`run`] from `main`.
//!
//! # Example
//!
//! ```ignore
//! use lapbench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut suite = Suite::new("strings", String::new())
//!         .with_teardown(|s: &mut String| { s.clear(); Ok(()) });
//!     suite.register("append", "Appends text.", |_| Ok(()), |s: &mut String, ()| {
//!         s.push_str("lap");
//!         Ok(())
//!     })?;
//!     lapbench::run(suite)
//! }
//! ```

mod config;
mod executor;
mod planner;
mod suite;

pub use config::*;
pub use executor::{ExecutionConfig, Executor, build_report, build_report_meta};
pub use planner::{ExecutionPlan, build_plan};
pub use suite::Suite;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lapbench_report::{OutputFormat, Report, render};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// LapBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "lapbench")]
#[command(author, version, about = "LapBench - lap-timed micro-benchmark suites")]
pub struct Cli {
    /// Optional subcommand (List, Run); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter tests by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Skip tests whose name matches this regex
    #[arg(long)]
    pub skip: Option<String>,

    /// Laps per test; invalid values fall back to 10
    #[arg(long, env = "LAPBENCH_LAPS", allow_hyphen_values = true)]
    pub laps: Option<String>,

    /// Output format: human, json, csv (defaults to lapbench.toml, then human)
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Clock the lap timers read
    #[arg(long, value_enum)]
    pub clock: Option<ClockKind>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,

    /// Dry run - list tests without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered tests
    List,
    /// Run tests (default)
    Run,
    /// Print a default lapbench.toml
    InitConfig,
}

/// Run the LapBench CLI over `suite` with the process arguments.
/// This is the main entry point for suite binaries.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if an operation failed or the
/// report could not be written.
pub fn run<E: 'static>(suite: Suite<E>) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli, suite)
}

/// Run the LapBench CLI with pre-parsed arguments.
pub fn run_with_cli<E: 'static>(cli: Cli, mut suite: Suite<E>) -> anyhow::Result<()> {
    init_tracing(cli.verbose);

    // Discover lapbench.toml configuration (CLI flags override)
    let config = LapConfig::discover().unwrap_or_default();

    match cli.command {
        Some(Commands::List) => list_tests(&cli, &mut suite),
        Some(Commands::InitConfig) => {
            print!("{}", LapConfig::default_toml());
            Ok(())
        }
        Some(Commands::Run) => run_tests(&cli, &config, &mut suite),
        None => {
            // Default: run tests
            if cli.dry_run {
                list_tests(&cli, &mut suite)
            } else {
                run_tests(&cli, &config, &mut suite)
            }
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose { "lapbench=debug" } else { "lapbench=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when the CLI is driven more than once
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Narrow the suite to the tests selected by the CLI filters
fn apply_filters<E>(cli: &Cli, suite: &mut Suite<E>) -> anyhow::Result<ExecutionPlan> {
    let filter =
        Regex::new(&cli.filter).with_context(|| format!("invalid filter '{}'", cli.filter))?;
    let skip = cli
        .skip
        .as_deref()
        .map(|pattern| Regex::new(pattern).with_context(|| format!("invalid skip '{}'", pattern)))
        .transpose()?;

    let plan = build_plan(suite.registry_mut(), Some(&filter), skip.as_ref());
    if !plan.skipped.is_empty() {
        tracing::debug!(skipped = ?plan.skipped, "tests filtered out");
    }
    Ok(plan)
}

fn list_tests<E>(cli: &Cli, suite: &mut Suite<E>) -> anyhow::Result<()> {
    let plan = apply_filters(cli, suite)?;
    let info = suite.info();

    println!("LapBench Plan: {} {}", info.title, info.version);
    for test in suite.registry() {
        if test.description().is_empty() {
            println!("├── {}", test.name());
        } else {
            println!("├── {} - {}", test.name(), test.description());
        }
    }
    println!("{} tests found.", plan.selected.len());

    Ok(())
}

/// Build the execution settings: CLI (and `LAPBENCH_LAPS`) over lapbench.toml over defaults.
pub fn build_execution_config(cli: &Cli, config: &LapConfig) -> ExecutionConfig {
    ExecutionConfig {
        laps: config.resolve_laps(cli.laps.as_deref()),
        clock: cli.clock.unwrap_or(config.runner.clock),
        progress: !cli.quiet,
    }
}

/// Resolve the output format: CLI over lapbench.toml, unknown names mean human
fn resolve_format(cli: &Cli, config: &LapConfig) -> OutputFormat {
    let name = cli.format.as_deref().unwrap_or(&config.output.format);
    name.parse().unwrap_or_else(|e| {
        tracing::warn!("{}; using human output", e);
        OutputFormat::Human
    })
}

/// Filter, run and report a suite without writing anything
pub fn execute_suite<E>(
    cli: &Cli,
    config: &LapConfig,
    suite: &mut Suite<E>,
) -> anyhow::Result<Report> {
    let plan = apply_filters(cli, suite)?;
    let exec_config = build_execution_config(cli, config);

    tracing::info!(
        tests = plan.selected.len(),
        laps = exec_config.laps.get(),
        clock = exec_config.clock.as_str(),
        "starting run"
    );

    let start_time = Instant::now();
    let executor = Executor::new(exec_config);
    let results = executor.execute(suite).context("benchmark run aborted")?;
    let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    let baselines = if config.output.show_baselines {
        suite.baselines().to_vec()
    } else {
        Vec::new()
    };
    let meta = build_report_meta(suite.info(), &exec_config);

    Ok(build_report(results, meta, baselines, total_duration_ms))
}

fn run_tests<E>(cli: &Cli, config: &LapConfig, suite: &mut Suite<E>) -> anyhow::Result<()> {
    let format = resolve_format(cli, config);
    let report = execute_suite(cli, config, suite)?;
    let output = render(&report, format)?;

    // Write output
    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        eprintln!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}
