//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod render;

// Re-export main command functions
pub use render::{execute_render, render_waterfall, validate_args, RenderArgs};
