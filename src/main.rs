//! DRAM Waterfall CLI
//!
//! Draws the per-bank state of a DRAM command trace as a waterfall diagram.

use anyhow::Result;
use clap::Parser;
use dram_waterfall::commands::{execute_render, validate_args, RenderArgs};
use dram_waterfall::parser::TraceSource;
use dram_waterfall::utils::config::{
    MalformedPolicy, WaterfallConfig, DEFAULT_BANK_COUNT, DEFAULT_TOP_BANKS,
};
use env_logger::Env;
use std::path::PathBuf;

/// DRAM Waterfall - per-bank state diagrams from memory-controller traces
#[derive(Parser, Debug)]
#[command(name = "waterfall")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Trace file to render (`-` reads stdin)
    trace: String,

    /// Number of banks to draw
    #[arg(short, long, env = "WATERFALL_BANKS", default_value_t = DEFAULT_BANK_COUNT)]
    banks: usize,

    /// Write the diagram to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip malformed `@` lines with a warning instead of failing
    #[arg(long)]
    lenient: bool,

    /// Print a run summary to stderr
    #[arg(long)]
    summary: bool,

    /// Output path for a JSON run summary (optional)
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Number of busiest banks listed in summaries
    #[arg(long, default_value_t = DEFAULT_TOP_BANKS)]
    top_banks: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let malformed = if cli.lenient {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::FailFast
    };

    let args = RenderArgs {
        trace: TraceSource::from_arg(&cli.trace),
        output: cli.output,
        config: WaterfallConfig::new()
            .with_bank_count(cli.banks)
            .with_malformed(malformed),
        print_summary: cli.summary,
        summary_json: cli.summary_json,
        top_banks: cli.top_banks,
    };

    // Validate args first
    validate_args(&args)?;

    execute_render(args)
}
