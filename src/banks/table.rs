//! The bank table: one state cell per bank, mutated by trace records.
//!
//! A record is applied, its row is drawn, then the table decays toward
//! idle before the next record comes in.

use super::state::BankState;
use crate::parser::record::{Record, RecordKind};
use log::{debug, warn};

/// Fixed-size table of bank states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankTable {
    states: Vec<BankState>,
}

impl BankTable {
    /// Create a table with every bank idle
    pub fn new(bank_count: usize) -> Self {
        debug!("Creating bank table with {} banks", bank_count);
        Self {
            states: vec![BankState::Idle; bank_count],
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, bank: usize) -> Option<BankState> {
        self.states.get(bank).copied()
    }

    pub fn states(&self) -> &[BankState] {
        &self.states
    }

    /// True when no bank holds a non-idle state
    pub fn is_idle(&self) -> bool {
        self.states.iter().all(|s| *s == BankState::Idle)
    }

    /// Set every listed bank to the record's command state
    ///
    /// Prior state is overwritten unconditionally. Banks past the end of
    /// the table are not touched; they are logged and returned so the
    /// caller can count them.
    pub fn apply(&mut self, record: &Record) -> Vec<usize> {
        let state = BankState::from(record.command);
        let mut rejected = Vec::new();

        for &bank in &record.banks {
            match self.states.get_mut(bank) {
                Some(slot) => *slot = state,
                None => {
                    warn!(
                        "line {}: bank {} detected but max is {}; increase the bank count",
                        record.line,
                        bank,
                        self.states.len().saturating_sub(1)
                    );
                    rejected.push(bank);
                }
            }
        }

        rejected
    }

    /// Relax the banks of a rendered record toward idle
    pub fn decay(&mut self, record: &Record) {
        match record.kind {
            RecordKind::MultiBankRefresh => {
                for &bank in &record.banks {
                    if let Some(slot) = self.states.get_mut(bank) {
                        *slot = BankState::Idle;
                    }
                }
            }
            RecordKind::SingleBank => {
                for &bank in &record.banks {
                    if let Some(slot) = self.states.get_mut(bank) {
                        *slot = slot.decayed();
                    }
                }
            }
            RecordKind::BareRefresh => {}
        }
    }
}
