//! Output writers for waterfall diagrams and run summaries.
//!
//! This module handles:
//! - The fixed-width waterfall diagram
//! - JSON run summaries
//! - Output path validation

pub mod file;
pub mod json;
pub mod waterfall;

// Re-export main functions
pub use file::{create_output_file, validate_path};
pub use json::{read_summary, write_summary};
pub use waterfall::{format_header, format_row, WaterfallRenderer};
