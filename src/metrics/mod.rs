//! Run statistics collected alongside the waterfall.
//!
//! This module tracks:
//! - Lines, records and rows seen during a run
//! - Command counts per type and per bank
//! - The busiest banks, for text and JSON summaries

pub mod schema;
pub mod summary;

// Re-export main types and functions
pub use schema::{BankActivity, SummaryReport};
pub use summary::{format_text_summary, to_report, RunSummary};
