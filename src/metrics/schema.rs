//! Output JSON schema for run summaries.
//!
//! Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level summary structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file that was rendered (`<stdin>` for streams)
    pub trace: String,

    /// Configured bank count
    pub bank_count: usize,

    /// Lines read from the trace
    pub lines_read: u64,

    /// Lines skipped because they are not `@` records
    pub comment_lines: u64,

    /// `@` lines parsed into records
    pub records: u64,

    /// Rows written to the diagram
    pub rows_rendered: u64,

    /// Refresh records without a bank list
    pub bare_refreshes: u64,

    /// Malformed `@` lines skipped in lenient mode
    pub malformed_skipped: u64,

    /// Bank references beyond the configured bank count
    pub out_of_range: u64,

    /// Record count per command token
    pub commands: BTreeMap<String, u64>,

    /// Banks ranked by commands received
    pub busiest_banks: Vec<BankActivity>,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

/// Command count for one bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankActivity {
    pub bank: usize,

    /// Commands that targeted this bank
    pub commands: u64,

    /// Share of all in-range bank commands
    pub percentage: f64,
}
