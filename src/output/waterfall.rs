//! Waterfall diagram writer.
//!
//! Layout:
//! ```text
//!             0  1  2  3
//!       100   .  A  .  .  0x1f
//!       120   .  |  R  .  0x2c
//! ```
//! A blank label column, then one right-justified 3-character column per
//! bank. Each row is the cycle, the bank symbols and the record address.

use crate::banks::BankTable;
use crate::parser::record::Record;
use crate::utils::config::{BANK_COLUMN_WIDTH, CYCLE_LABEL_WIDTH, HEADER_LABEL_WIDTH};
use crate::utils::error::OutputError;
use std::io::Write;

/// Format the header line (without newline)
pub fn format_header(bank_count: usize) -> String {
    let columns: String = (0..bank_count)
        .map(|bank| format!("{:>width$}", bank, width = BANK_COLUMN_WIDTH))
        .collect();
    format!("{}{}", " ".repeat(HEADER_LABEL_WIDTH), columns)
}

/// Format one diagram row (without newline)
///
/// The cycle label is right-justified but never truncated.
pub fn format_row(record: &Record, table: &BankTable) -> String {
    let columns: String = table
        .states()
        .iter()
        .map(|state| format!("{:>width$}", state.symbol(), width = BANK_COLUMN_WIDTH))
        .collect();
    format!(
        "{:>cycle_width$} {}  {}",
        record.cycle,
        columns,
        record.address,
        cycle_width = CYCLE_LABEL_WIDTH
    )
}

/// Line-oriented diagram writer over any sink
pub struct WaterfallRenderer<W: Write> {
    sink: W,
    rows: usize,
}

impl<W: Write> WaterfallRenderer<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, rows: 0 }
    }

    pub fn write_header(&mut self, bank_count: usize) -> Result<(), OutputError> {
        writeln!(self.sink, "{}", format_header(bank_count))?;
        Ok(())
    }

    /// Write the row for a record; call after apply and before decay
    pub fn write_row(&mut self, record: &Record, table: &BankTable) -> Result<(), OutputError> {
        writeln!(self.sink, "{}", format_row(record, table))?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far, header excluded
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> Result<W, OutputError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}
