//! JSON summary writer.
//!
//! Writes SummaryReport structs to JSON files with pretty formatting.

use super::file::create_output_file;
use crate::metrics::schema::SummaryReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a run summary to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Summary data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_summary(
    report: &SummaryReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary to: {}", output_path.display());

    let file = create_output_file(output_path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, report)
        .map_err(OutputError::SerializationFailed)?;
    writer.flush()?;

    info!(
        "Summary written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read a run summary from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<SummaryReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading summary from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: SummaryReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Summary loaded: version {}, trace {}",
        report.version, report.trace
    );

    Ok(report)
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
