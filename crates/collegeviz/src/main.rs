use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use collegeviz_core::inspect::{self, InspectFilter, TuitionKind};
use collegeviz_core::schema::{ENROLLMENT, ENROLLMENT_BIN};
use collegeviz_core::{
    run_binning_stage, run_merge_stage, tables, EnrollmentBin, PipelineConfig, StageReport,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Merge college tuition, salary and enrollment tables", long_about = None)]
struct Cli {
    /// Path to a TOML config file (falls back to COLLEGEVIZ_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Join the tuition, salary and enrollment tables on institution name
    Merge,
    /// Add the enrollment_bin column to the merged table
    Bin,
    /// Run the merge stage, then bin its output
    Run,
    /// List schools ranked by early career pay minus tuition
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Binned table to read (defaults to the binning output path)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Only show schools in this state
    #[arg(long)]
    state: Option<String>,
    /// Only show schools in this enrollment bin (Small, Medium or Large)
    #[arg(long)]
    bin: Option<EnrollmentBin>,
    /// Tuition figure to subtract from salary
    #[arg(long, default_value_t = TuitionKind::InState)]
    tuition: TuitionKind,
    /// Maximum number of rows to print
    #[arg(long, default_value_t = 25)]
    limit: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    match cli.command {
        Command::Merge => handle_merge(&config),
        Command::Bin => handle_bin(&config),
        Command::Run => {
            handle_merge(&config)?;
            let mut binning = config.binning.clone();
            binning.input_path = config.merge.output_path.clone();
            handle_bin(&PipelineConfig {
                binning,
                ..config
            })
        }
        Command::Inspect(args) => handle_inspect(&config, args),
    }
}

fn load_config(flag: Option<PathBuf>) -> Result<PipelineConfig> {
    dotenvy::dotenv().ok();

    let path = flag.or_else(|| env::var_os("COLLEGEVIZ_CONFIG").map(PathBuf::from));
    let config = PipelineConfig::load(path.as_deref()).context("failed to load configuration")?;
    if let Some(path) = &path {
        info!(path = %path.display(), "loaded configuration");
    }
    Ok(config)
}

fn handle_merge(config: &PipelineConfig) -> Result<()> {
    let report = run_merge_stage(&config.merge).context("merge stage failed")?;
    log_report(&report)
}

fn handle_bin(config: &PipelineConfig) -> Result<()> {
    let (binned, report) = run_binning_stage(&config.binning).context("binning stage failed")?;
    let preview = binned
        .select([ENROLLMENT, ENROLLMENT_BIN])
        .context("failed to build binning preview")?;
    println!("{preview}");
    log_report(&report)
}

fn handle_inspect(config: &PipelineConfig, args: InspectArgs) -> Result<()> {
    let input = args
        .input
        .unwrap_or_else(|| config.binning.output_path.clone());
    let df = tables::read_table(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let filter = InspectFilter {
        state: args.state,
        bin: args.bin,
        tuition: args.tuition,
    };
    let ranked = inspect::filter_schools(&df, &filter)?;

    if ranked.height() == 0 {
        println!("No schools matched the given filters.");
        return Ok(());
    }

    let table = inspect::render_table(&ranked, filter.tuition, args.limit)?;
    println!("{table}");
    if ranked.height() > args.limit {
        println!("Showing {} of {} schools.", args.limit, ranked.height());
    }
    Ok(())
}

fn log_report(report: &StageReport) -> Result<()> {
    let json = serde_json::to_string(report).context("failed to serialize stage report")?;
    info!(stage = report.stage, report = %json, "stage finished");
    Ok(())
}
