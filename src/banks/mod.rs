//! Per-bank state machine.
//!
//! Each bank holds one state. Records overwrite the state of the banks they
//! name, and after the row is drawn the state decays toward idle.

pub mod state;
pub mod table;

pub use state::BankState;
pub use table::BankTable;
