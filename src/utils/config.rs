//! Configuration and constants for the waterfall renderer.

/// Bank count used when none is configured
pub const DEFAULT_BANK_COUNT: usize = 64;

/// Upper bound accepted for `--banks`; bank index 999 is the widest that
/// fits a 3-character column
pub const MAX_BANK_COUNT: usize = 1000;

/// Current JSON summary schema version
pub const SUMMARY_SCHEMA_VERSION: &str = "1.0.0";

/// Busiest banks listed in summaries by default
pub const DEFAULT_TOP_BANKS: usize = 8;

// Trace line layout
pub const RECORD_MARKER: char = '@';
pub const COMMAND_TOKEN: usize = 1;
pub const ADDRESS_TOKEN: usize = 3;
pub const BANK_TOKEN: usize = 12;
pub const REFRESH_BANK_LIST_START: usize = 3;

// Diagram column widths
pub const HEADER_LABEL_WIDTH: usize = 10;
pub const CYCLE_LABEL_WIDTH: usize = 9;
pub const BANK_COLUMN_WIDTH: usize = 3;

/// What to do with an `@` line that does not match the record grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Stop the run with a diagnostic
    #[default]
    FailFast,
    /// Log a warning and carry on with the next line
    Skip,
}

/// Settings for one trace-processing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterfallConfig {
    pub bank_count: usize,
    pub malformed: MalformedPolicy,
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            bank_count: DEFAULT_BANK_COUNT,
            malformed: MalformedPolicy::default(),
        }
    }
}

impl WaterfallConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bank_count(mut self, bank_count: usize) -> Self {
        self.bank_count = bank_count;
        self
    }

    pub fn with_malformed(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }
}
