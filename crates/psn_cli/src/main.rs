//! psn-verify binary entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use psn_core::checker::{ModestClient, ToolValidator};
use psn_core::config::{ConfigManager, Settings};
use psn_core::driver::{DriverOptions, RunOutcome, WindowedVerificationDriver};
use psn_core::logging::{init_tracing, EchoCallback, LogLevel};
use psn_core::models::{PropertyType, RunMode};
use psn_core::plot::plot_results;
use psn_core::render::TemplateRenderer;
use psn_core::results::{format_elapsed, ResultSink};
use psn_core::trace::ModestTraceParser;

#[derive(Parser, Debug)]
#[command(name = "psn-verify")]
#[command(about = "Estimate interconnect noise probabilities window by window with an external model checker")]
#[command(version)]
struct Cli {
    /// Settings file (created with defaults if missing)
    #[arg(long, global = true, default_value = ".config/psn.toml")]
    config: PathBuf,

    /// Debug logging, including raw checker output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Statistical simulation, stopping early once the probability saturates
    Simulate(RunArgs),
    /// Exhaustive check of every window up to --horizon
    Check(RunArgs),
    /// Render charts for every results directory
    Plot {
        /// Results root (defaults to the configured results folder)
        #[arg(long)]
        results: Option<PathBuf>,

        /// Chart output folder (defaults to the configured plots folder)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show the checker found on PATH
    Tool,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Interconnect dimension (the mesh is size x size)
    #[arg(long)]
    size: u32,

    /// Noise property to estimate
    #[arg(long, value_enum)]
    property: PropertyArg,

    /// Last clock cycle of interest (unbounded if omitted)
    #[arg(long)]
    horizon: Option<u64>,

    /// Noise threshold
    #[arg(long)]
    threshold: Option<u32>,

    /// Sampling stride in clock cycles
    #[arg(long)]
    stride: Option<u64>,

    /// Sampled cycles per window
    #[arg(long)]
    block_size: Option<u64>,

    /// Flit generation pattern forwarded to the model template
    #[arg(long)]
    flits: Option<String>,

    /// Model template file
    #[arg(long)]
    template: PathBuf,

    /// Output folder (defaults to <results_folder>/<size>x<size>)
    #[arg(long)]
    results: Option<PathBuf>,

    /// Print the run outcome as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyArg {
    Resistive,
    Inductive,
}

impl From<PropertyArg> for PropertyType {
    fn from(arg: PropertyArg) -> Self {
        match arg {
            PropertyArg::Resistive => PropertyType::Resistive,
            PropertyArg::Inductive => PropertyType::Inductive,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    });

    let mut config = ConfigManager::new(&cli.config);
    config
        .load_or_create()
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    if !matches!(cli.command, Commands::Tool) {
        config
            .ensure_dirs_exist()
            .context("Failed to create result, plot and work folders")?;
    }
    let settings = config.settings().clone();

    match cli.command {
        Commands::Simulate(args) => run(&settings, RunMode::Simulate, &args, cli.verbose),
        Commands::Check(args) => run(&settings, RunMode::Check, &args, cli.verbose),
        Commands::Plot { results, out } => {
            let results = results.unwrap_or_else(|| PathBuf::from(&settings.paths.results_folder));
            let out = out.unwrap_or_else(|| PathBuf::from(&settings.paths.plots_folder));
            let written = plot_results(&results, &out)?;
            for path in &written {
                println!("{}", path.display());
            }
            tracing::info!("Wrote {} charts", written.len());
            Ok(())
        }
        Commands::Tool => {
            let (path, version) = ToolValidator::discover(&settings.checker.executable)?;
            println!("Found {}: {}", settings.checker.executable, version);
            println!("  {}", path.display());
            Ok(())
        }
    }
}

fn run(settings: &Settings, mode: RunMode, args: &RunArgs, verbose: bool) -> Result<()> {
    let mut builder = settings
        .run
        .builder(args.size, args.property.into())
        .horizon(args.horizon)
        .flit_generation(args.flits.clone());
    if let Some(threshold) = args.threshold {
        builder = builder.threshold(threshold);
    }
    if let Some(stride) = args.stride {
        builder = builder.stride(stride);
    }
    if let Some(block_size) = args.block_size {
        builder = builder.block_size(block_size);
    }
    let run_config = builder.build()?;

    let results = args
        .results
        .clone()
        .unwrap_or_else(|| settings.paths.results_for_size(args.size));

    let mut log_config = settings.logging.to_log_config();
    if verbose {
        log_config.level = LogLevel::Debug;
    }

    let mut driver = WindowedVerificationDriver::new(
        TemplateRenderer::from_file(&args.template)?,
        ModestClient::new(&settings.checker.executable, &settings.paths.work_folder),
        ModestTraceParser::new(),
        ResultSink::new(results),
    )
    .with_options(DriverOptions {
        failure_limit: settings.run.failure_limit(),
    })
    .with_log_config(log_config);

    if settings.logging.echo {
        let echo: EchoCallback = Arc::new(|line: &str| println!("{}", line));
        driver = driver.with_echo(echo);
    }

    let outcome = driver.run(&run_config, mode)?;

    if args.json {
        println!("{}", outcome.to_json_pretty()?);
    } else {
        print_summary(&outcome);
    }
    Ok(())
}

fn print_summary(outcome: &RunOutcome) {
    println!(
        "{} finished: {} ({} samples, {} of {} blocks skipped, {})",
        outcome.mode,
        outcome.stop_reason,
        outcome.sample_count(),
        outcome.windows_skipped,
        outcome.windows_attempted,
        format_elapsed(outcome.elapsed)
    );
    println!("  {}", outcome.artifacts.csv.display());
    println!("  {}", outcome.artifacts.run_log.display());
}
