//! Render command implementation.
//!
//! The render command:
//! 1. Opens the trace source
//! 2. Writes the diagram header
//! 3. Parses, applies, draws and decays each record in trace order
//! 4. Prints and writes the optional run summaries

use crate::banks::BankTable;
use crate::metrics::{format_text_summary, to_report, RunSummary};
use crate::output::{create_output_file, validate_path, write_summary, WaterfallRenderer};
use crate::parser::{classify_line, open_trace, TraceReader, TraceSource};
use crate::utils::config::{
    MalformedPolicy, WaterfallConfig, DEFAULT_TOP_BANKS, MAX_BANK_COUNT,
};
use crate::utils::error::WaterfallError;
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Trace file or stdin
    pub trace: TraceSource,

    /// Diagram destination; stdout when `None`
    pub output: Option<PathBuf>,

    /// Bank count and malformed-line policy
    pub config: WaterfallConfig,

    /// Print a text summary to stderr
    pub print_summary: bool,

    /// Output path for the JSON summary (optional)
    pub summary_json: Option<PathBuf>,

    /// Busiest banks listed in summaries
    pub top_banks: usize,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            trace: TraceSource::Stdin,
            output: None,
            config: WaterfallConfig::default(),
            print_summary: false,
            summary_json: None,
            top_banks: DEFAULT_TOP_BANKS,
        }
    }
}

/// Check render arguments before touching any file
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    let banks = args.config.bank_count;
    if banks == 0 || banks > MAX_BANK_COUNT {
        bail!(
            "Bank count must be between 1 and {}, got {}",
            MAX_BANK_COUNT,
            banks
        );
    }

    if let TraceSource::Path(path) = &args.trace {
        if path.as_os_str().is_empty() {
            bail!("Trace path cannot be empty");
        }
    }

    if let Some(output) = &args.output {
        validate_path(output).context("Invalid diagram output path")?;
    }

    if let Some(summary) = &args.summary_json {
        validate_path(summary).context("Invalid summary output path")?;
    }

    Ok(())
}

/// Run the waterfall pipeline from a trace reader into a sink
///
/// **Public** - library entry point, used by `execute_render` and tests
///
/// Each line is read, classified, parsed, applied, drawn and decayed before
/// the next line is read.
///
/// # Errors
/// * `WaterfallError::Source` - the trace could not be read
/// * `WaterfallError::Malformed` - a bad `@` line under `MalformedPolicy::FailFast`
/// * `WaterfallError::Output` - the sink rejected a write
pub fn render_waterfall<W: Write>(
    reader: TraceReader,
    sink: W,
    config: &WaterfallConfig,
) -> Result<RunSummary, WaterfallError> {
    let mut table = BankTable::new(config.bank_count);
    let mut summary = RunSummary::new(config.bank_count);
    let mut renderer = WaterfallRenderer::new(sink);

    renderer.write_header(config.bank_count)?;

    for line in reader {
        let line = line?;
        summary.lines_read += 1;

        let record = match classify_line(line.number, &line.text) {
            None => {
                summary.comment_lines += 1;
                continue;
            }
            Some(Ok(record)) => record,
            Some(Err(e)) => match config.malformed {
                MalformedPolicy::FailFast => return Err(e.into()),
                MalformedPolicy::Skip => {
                    warn!("Skipping malformed record: {}", e);
                    summary.malformed_skipped += 1;
                    continue;
                }
            },
        };

        let rejected = table.apply(&record);
        summary.record(&record, &rejected);

        if record.is_renderable() {
            renderer.write_row(&record, &table)?;
            table.decay(&record);
        } else {
            debug!("line {}: refresh without bank list, no row", record.line);
        }
    }

    summary.rows_rendered = renderer.rows() as u64;
    renderer.finish()?;

    debug!("{}", summary.summary());
    Ok(summary)
}

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace source cannot be opened or read
/// * Malformed record under fail-fast policy
/// * Output files cannot be written
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    info!(
        "Rendering waterfall for {} ({} banks)",
        args.trace, args.config.bank_count
    );

    let reader = open_trace(&args.trace)
        .with_context(|| format!("Failed to open trace {}", args.trace))?;

    let summary = match &args.output {
        Some(path) => {
            let file = create_output_file(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let summary = render_waterfall(reader, BufWriter::new(file), &args.config)
                .context("Failed to render waterfall")?;
            info!("✓ Waterfall written to: {}", path.display());
            summary
        }
        None => render_waterfall(reader, io::stdout().lock(), &args.config)
            .context("Failed to render waterfall")?,
    };

    info!("{}", summary.summary());

    if summary.out_of_range > 0 {
        warn!(
            "{} bank references exceeded the configured {} banks; rerun with a larger --banks",
            summary.out_of_range, args.config.bank_count
        );
    }

    if args.print_summary {
        eprintln!("\n{}", "=".repeat(60));
        eprintln!("WATERFALL SUMMARY");
        eprintln!("{}", "=".repeat(60));
        eprintln!("Trace: {}", args.trace);
        eprintln!("Banks: {}\n", args.config.bank_count);
        eprint!("{}", format_text_summary(&summary, args.top_banks));
        eprintln!("{}", "=".repeat(60));
    }

    if let Some(path) = &args.summary_json {
        let report = to_report(
            &summary,
            &args.config,
            &args.trace.to_string(),
            args.top_banks,
        );
        write_summary(&report, path).context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}
