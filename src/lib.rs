//! DRAM Waterfall
//!
//! Turns a memory-controller command trace into a waterfall diagram that
//! shows the state of every DRAM bank at each logged cycle.
//!
//! Pipeline: [`parser`] reads and parses `@` records, [`banks`] applies
//! them to the per-bank state table, and [`output`] draws one row per
//! record. [`commands`] wires the stages together for the `waterfall` CLI.
//!
//! ```bash
//! waterfall dram_cmds.trace
//! waterfall --banks 16 --summary - < dram_cmds.trace
//! ```

pub mod banks;
pub mod commands;
pub mod metrics;
pub mod output;
pub mod parser;
pub mod utils;
