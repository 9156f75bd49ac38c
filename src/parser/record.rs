//! Trace record classification and parsing.
//!
//! Only lines whose first character is `@` are records. Everything else in
//! a controller trace is commentary and is skipped without complaint.
//!
//! Record shapes (whitespace separated):
//! - `@<cycle> <CMD> <f2> <address> ... <bank>` with the bank at token 12
//! - `@<cycle> REF <f2> <bank0> <bank1> ...` for a multi-bank refresh
//! - `@<cycle> REF [<f2>]` for a refresh without a bank list

use crate::utils::config::{
    ADDRESS_TOKEN, BANK_TOKEN, COMMAND_TOKEN, RECORD_MARKER, REFRESH_BANK_LIST_START,
};
use crate::utils::error::ParseError;
use std::fmt;
use std::num::IntErrorKind;

/// Memory-controller command recognized in a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Command {
    Activate,
    Read,
    Write,
    Precharge,
    Refresh,
}

impl Command {
    /// Every command, in diagram legend order
    pub const ALL: [Command; 5] = [
        Self::Activate,
        Self::Read,
        Self::Write,
        Self::Precharge,
        Self::Refresh,
    ];

    /// Map a trace token to a command
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ACT" => Some(Self::Activate),
            "READ" => Some(Self::Read),
            "WRITE" => Some(Self::Write),
            "PRE" => Some(Self::Precharge),
            "REF" => Some(Self::Refresh),
            _ => None,
        }
    }

    /// Token as it appears in a trace
    pub fn token(self) -> &'static str {
        match self {
            Self::Activate => "ACT",
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Precharge => "PRE",
            Self::Refresh => "REF",
        }
    }

    /// One-letter diagram symbol
    pub fn symbol(self) -> char {
        match self {
            Self::Activate => 'A',
            Self::Read => 'R',
            Self::Write => 'W',
            Self::Precharge => 'P',
            Self::Refresh => 'F',
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Shape of a parsed record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Non-refresh command aimed at one bank
    SingleBank,
    /// Refresh with an explicit bank list
    MultiBankRefresh,
    /// Refresh with no bank list; produces no row
    BareRefresh,
}

/// One parsed trace event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Line number in the trace
    pub line: usize,
    /// Cycle label, kept verbatim
    pub cycle: String,
    pub command: Command,
    /// Address field; empty for refreshes
    pub address: String,
    pub banks: Vec<usize>,
    pub kind: RecordKind,
}

impl Record {
    /// Whether this record gets a row in the diagram
    pub fn is_renderable(&self) -> bool {
        self.kind != RecordKind::BareRefresh
    }
}

/// Whether a raw line is a record candidate
pub fn is_candidate(line: &str) -> bool {
    line.starts_with(RECORD_MARKER)
}

/// Parse one candidate line into a record
///
/// **Public** - main entry point for record parsing
///
/// # Arguments
/// * `line_no` - Line number, used in diagnostics
/// * `line` - Raw line starting with `@`
///
/// # Errors
/// * `ParseError::MissingToken` - too few tokens for the command's shape
/// * `ParseError::UnknownCommand` - command token is not ACT/READ/WRITE/PRE/REF
/// * `ParseError::InvalidBank` - bank token is not an unsigned integer
///
/// Bank ids too large to represent come back as `usize::MAX`.
pub fn parse_record(line_no: usize, line: &str) -> Result<Record, ParseError> {
    let tokens: Vec<&str> = line.trim_end().split_whitespace().collect();

    let cycle = tokens
        .first()
        .copied()
        .map(|t| t.strip_prefix(RECORD_MARKER).unwrap_or(t))
        .unwrap_or_default()
        .to_string();

    let command_token = token_at(&tokens, line_no, COMMAND_TOKEN, "command")?;
    let command = Command::from_token(command_token).ok_or_else(|| ParseError::UnknownCommand {
        line: line_no,
        token: command_token.to_string(),
    })?;

    if command == Command::Refresh {
        // Token 2 of a refresh is reserved and never interpreted
        if tokens.len() > REFRESH_BANK_LIST_START {
            let banks = (REFRESH_BANK_LIST_START..tokens.len())
                .map(|index| parse_bank(&tokens, line_no, index))
                .collect::<Result<Vec<_>, _>>()?;

            return Ok(Record {
                line: line_no,
                cycle,
                command,
                address: String::new(),
                banks,
                kind: RecordKind::MultiBankRefresh,
            });
        }

        return Ok(Record {
            line: line_no,
            cycle,
            command,
            address: String::new(),
            banks: Vec::new(),
            kind: RecordKind::BareRefresh,
        });
    }

    let address = token_at(&tokens, line_no, ADDRESS_TOKEN, "address")?.to_string();
    let bank = parse_bank(&tokens, line_no, BANK_TOKEN)?;

    Ok(Record {
        line: line_no,
        cycle,
        command,
        address,
        banks: vec![bank],
        kind: RecordKind::SingleBank,
    })
}

/// Classify and parse a raw line; `None` for non-record lines
pub fn classify_line(line_no: usize, line: &str) -> Option<Result<Record, ParseError>> {
    is_candidate(line).then(|| parse_record(line_no, line))
}

fn token_at<'a>(
    tokens: &[&'a str],
    line: usize,
    index: usize,
    expected: &'static str,
) -> Result<&'a str, ParseError> {
    tokens.get(index).copied().ok_or(ParseError::MissingToken {
        line,
        index,
        expected,
    })
}

/// Parse a bank token; all-digit values too large for `usize` saturate so
/// the bank table rejects them as out of range
fn parse_bank(tokens: &[&str], line: usize, index: usize) -> Result<usize, ParseError> {
    let token = token_at(tokens, line, index, "bank id")?;
    match token.parse::<usize>() {
        Ok(bank) => Ok(bank),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(usize::MAX),
        Err(_) => Err(ParseError::InvalidBank {
            line,
            index,
            token: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACT_LINE: &str = "@100 ACT x 0x1f 0 0 0 0 0 0 0 0 5";

    #[test]
    fn test_command_lookup() {
        for command in Command::ALL {
            assert_eq!(Command::from_token(command.token()), Some(command));
        }
        assert_eq!(Command::from_token("act"), None);
        assert_eq!(Command::Refresh.symbol(), 'F');
    }

    #[test]
    fn test_classification() {
        assert!(is_candidate("@1 ACT"));
        assert!(!is_candidate(" @1 ACT"));
        assert!(!is_candidate("# comment"));
        assert!(!is_candidate(""));
        assert!(classify_line(1, "noise").is_none());
    }

    #[test]
    fn test_single_bank_record() {
        let record = parse_record(7, ACT_LINE).unwrap();
        assert_eq!(record.line, 7);
        assert_eq!(record.cycle, "100");
        assert_eq!(record.command, Command::Activate);
        assert_eq!(record.address, "0x1f");
        assert_eq!(record.banks, vec![5]);
        assert_eq!(record.kind, RecordKind::SingleBank);
        assert!(record.is_renderable());
    }

    #[test]
    fn test_multi_bank_refresh() {
        let record = parse_record(1, "@50 REF y 1 2 3   ").unwrap();
        assert_eq!(record.cycle, "50");
        assert_eq!(record.address, "");
        assert_eq!(record.banks, vec![1, 2, 3]);
        assert_eq!(record.kind, RecordKind::MultiBankRefresh);
    }

    #[test]
    fn test_refresh_reserved_token_is_ignored() {
        let a = parse_record(1, "@50 REF 9 4 5").unwrap();
        let b = parse_record(1, "@50 REF zz 4 5").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.banks, vec![4, 5]);
    }

    #[test]
    fn test_bare_refresh() {
        let record = parse_record(3, "@10 REF").unwrap();
        assert_eq!(record.kind, RecordKind::BareRefresh);
        assert!(record.banks.is_empty());
        assert!(!record.is_renderable());

        let record = parse_record(3, "@10 REF reserved").unwrap();
        assert_eq!(record.kind, RecordKind::BareRefresh);
    }

    #[test]
    fn test_short_single_bank_line() {
        let err = parse_record(4, "@10 READ x 0x10 1 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingToken {
                line: 4,
                index: 12,
                expected: "bank id"
            }
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_record(2, "@10 NOP x y").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownCommand {
                line: 2,
                token: "NOP".to_string()
            }
        );
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_missing_command() {
        let err = parse_record(9, "@10").unwrap_err();
        assert!(matches!(err, ParseError::MissingToken { index: 1, .. }));
    }

    #[test]
    fn test_oversized_bank_saturates() {
        let record = parse_record(1, "@1 REF r 0 99999999999999999999999").unwrap();
        assert_eq!(record.banks, vec![0, usize::MAX]);

        let record = parse_record(2, "@2 PRE x a 0 0 0 0 0 0 0 0 99999999999999999999999").unwrap();
        assert_eq!(record.banks, vec![usize::MAX]);
    }

    #[test]
    fn test_invalid_bank_token() {
        let err = parse_record(5, "@50 REF z 1 two").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidBank {
                line: 5,
                index: 4,
                token: "two".to_string()
            }
        );
    }
}
