//! Per-bank state values and their diagram symbols.

use crate::parser::record::Command;
use std::fmt;

/// State of one bank as drawn in the waterfall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BankState {
    #[default]
    Idle,
    Activate,
    Read,
    Write,
    Precharge,
    Refresh,
    /// Row still open, waiting for a precharge
    PrechargePending,
}

impl BankState {
    pub fn symbol(self) -> char {
        match self {
            Self::Idle => '.',
            Self::Activate => 'A',
            Self::Read => 'R',
            Self::Write => 'W',
            Self::Precharge => 'P',
            Self::Refresh => 'F',
            Self::PrechargePending => '|',
        }
    }

    /// State after the row for a single-bank command has been drawn
    pub fn decayed(self) -> Self {
        match self {
            Self::Activate | Self::Read | Self::Write => Self::PrechargePending,
            Self::Precharge | Self::Refresh => Self::Idle,
            other => other,
        }
    }
}

impl From<Command> for BankState {
    fn from(command: Command) -> Self {
        match command {
            Command::Activate => Self::Activate,
            Command::Read => Self::Read,
            Command::Write => Self::Write,
            Command::Precharge => Self::Precharge,
            Command::Refresh => Self::Refresh,
        }
    }
}

impl fmt::Display for BankState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_states_share_symbols() {
        for command in Command::ALL {
            assert_eq!(BankState::from(command).symbol(), command.symbol());
        }
    }

    #[test]
    fn test_decay_rules() {
        assert_eq!(BankState::Activate.decayed(), BankState::PrechargePending);
        assert_eq!(BankState::Read.decayed(), BankState::PrechargePending);
        assert_eq!(BankState::Write.decayed(), BankState::PrechargePending);
        assert_eq!(BankState::Precharge.decayed(), BankState::Idle);
        assert_eq!(BankState::Refresh.decayed(), BankState::Idle);
        assert_eq!(BankState::Idle.decayed(), BankState::Idle);
        assert_eq!(
            BankState::PrechargePending.decayed(),
            BankState::PrechargePending
        );
    }
}
