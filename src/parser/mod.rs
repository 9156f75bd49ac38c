//! Trace reading and record parsing.
//!
//! This module handles:
//! - Opening a trace file or stdin as a lazy line stream
//! - Picking out `@` record lines
//! - Parsing cycle, command, address and bank ids from each record

pub mod reader;
pub mod record;

// Re-export main types
pub use reader::{open_trace, TraceLine, TraceReader, TraceSource};
pub use record::{classify_line, is_candidate, parse_record, Command, Record, RecordKind};
