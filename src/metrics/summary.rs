//! Counters collected while a trace is rendered.
//!
//! The busiest banks are the ones that received the most commands; they
//! are listed first in text and JSON summaries.

use super::schema::{BankActivity, SummaryReport};
use crate::parser::record::{Command, Record};
use crate::utils::config::{WaterfallConfig, SUMMARY_SCHEMA_VERSION};
use log::debug;
use std::collections::BTreeMap;

/// Counters for one rendering run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: u64,
    pub comment_lines: u64,
    pub records: u64,
    pub rows_rendered: u64,
    pub bare_refreshes: u64,
    pub malformed_skipped: u64,
    pub out_of_range: u64,
    pub commands: BTreeMap<Command, u64>,
    /// Commands received per bank, indexed by bank
    pub bank_activity: Vec<u64>,
}

impl RunSummary {
    pub fn new(bank_count: usize) -> Self {
        Self {
            bank_activity: vec![0; bank_count],
            ..Default::default()
        }
    }

    /// Count a parsed record and the bank references it made
    pub fn record(&mut self, record: &Record, rejected: &[usize]) {
        self.records += 1;
        *self.commands.entry(record.command).or_insert(0) += 1;

        if !record.is_renderable() {
            self.bare_refreshes += 1;
        }

        for &bank in &record.banks {
            if let Some(count) = self.bank_activity.get_mut(bank) {
                *count += 1;
            }
        }
        self.out_of_range += rejected.len() as u64;
    }

    /// Total commands across in-range banks
    pub fn total_bank_commands(&self) -> u64 {
        self.bank_activity.iter().sum()
    }

    /// Banks ranked by activity, ties broken by lower index
    ///
    /// Banks that never received a command are left out.
    pub fn busiest_banks(&self, top_n: usize) -> Vec<BankActivity> {
        let total = self.total_bank_commands();
        debug!("Ranking top {} of {} banks", top_n, self.bank_activity.len());

        let mut ranked: Vec<(usize, u64)> = self
            .bank_activity
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .take(top_n)
            .map(|(bank, commands)| BankActivity {
                bank,
                commands,
                percentage: if total > 0 {
                    (commands as f64 / total as f64) * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "Lines: {} | Records: {} | Rows: {} | Bare REF: {} | Skipped: {} | Out of range: {}",
            self.lines_read,
            self.records,
            self.rows_rendered,
            self.bare_refreshes,
            self.malformed_skipped,
            self.out_of_range
        )
    }
}

/// Build the serializable report for a run
pub fn to_report(
    summary: &RunSummary,
    config: &WaterfallConfig,
    trace: &str,
    top_n: usize,
) -> SummaryReport {
    use chrono::Utc;

    SummaryReport {
        version: SUMMARY_SCHEMA_VERSION.to_string(),
        trace: trace.to_string(),
        bank_count: config.bank_count,
        lines_read: summary.lines_read,
        comment_lines: summary.comment_lines,
        records: summary.records,
        rows_rendered: summary.rows_rendered,
        bare_refreshes: summary.bare_refreshes,
        malformed_skipped: summary.malformed_skipped,
        out_of_range: summary.out_of_range,
        commands: summary
            .commands
            .iter()
            .map(|(command, count)| (command.token().to_string(), *count))
            .collect(),
        busiest_banks: summary.busiest_banks(top_n),
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Human-readable summary for `--summary`
pub fn format_text_summary(summary: &RunSummary, top_n: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("Lines read:       {}\n", summary.lines_read));
    out.push_str(&format!("Comment lines:    {}\n", summary.comment_lines));
    out.push_str(&format!("Records:          {}\n", summary.records));
    out.push_str(&format!("Rows rendered:    {}\n", summary.rows_rendered));
    out.push_str(&format!("Bare refreshes:   {}\n", summary.bare_refreshes));
    out.push_str(&format!("Malformed skipped: {}\n", summary.malformed_skipped));
    out.push_str(&format!("Out-of-range refs: {}\n", summary.out_of_range));

    out.push_str("\nCommands:\n");
    for command in Command::ALL {
        let count = summary.commands.get(&command).copied().unwrap_or(0);
        out.push_str(&format!("  {:<6} {}\n", command.token(), count));
    }

    let busiest = summary.busiest_banks(top_n);
    if summary.total_bank_commands() == 0 {
        out.push_str("\nNo bank activity.\n");
    } else if !busiest.is_empty() {
        out.push_str(&format!("\nTop {} banks:\n", busiest.len()));
        for (i, activity) in busiest.iter().enumerate() {
            out.push_str(&format!(
                "  {}. bank {:>3}: {} commands ({:.1}%)\n",
                i + 1,
                activity.bank,
                activity.commands,
                activity.percentage
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::record::parse_record;

    fn summary_for(lines: &[&str], bank_count: usize) -> RunSummary {
        let mut summary = RunSummary::new(bank_count);
        for (i, line) in lines.iter().enumerate() {
            let record = parse_record(i + 1, line).unwrap();
            let rejected: Vec<usize> = record
                .banks
                .iter()
                .copied()
                .filter(|b| *b >= bank_count)
                .collect();
            summary.record(&record, &rejected);
        }
        summary
    }

    #[test]
    fn test_counts_commands_and_banks() {
        let summary = summary_for(
            &[
                "@1 ACT x a 0 0 0 0 0 0 0 0 2",
                "@2 READ x a 0 0 0 0 0 0 0 0 2",
                "@3 REF r 1 2",
                "@4 REF",
            ],
            4,
        );

        assert_eq!(summary.records, 4);
        assert_eq!(summary.bare_refreshes, 1);
        assert_eq!(summary.commands[&Command::Refresh], 2);
        assert_eq!(summary.bank_activity, vec![0, 1, 3, 0]);
        assert_eq!(summary.total_bank_commands(), 4);
    }

    #[test]
    fn test_busiest_banks_ordering() {
        let summary = summary_for(
            &[
                "@1 ACT x a 0 0 0 0 0 0 0 0 3",
                "@2 ACT x a 0 0 0 0 0 0 0 0 1",
                "@3 PRE x a 0 0 0 0 0 0 0 0 3",
            ],
            4,
        );

        let busiest = summary.busiest_banks(5);
        assert_eq!(busiest.len(), 2);
        assert_eq!(busiest[0].bank, 3);
        assert_eq!(busiest[0].commands, 2);
        assert!((busiest[0].percentage - 66.666).abs() < 0.01);
        assert_eq!(busiest[1].bank, 1);
    }

    #[test]
    fn test_out_of_range_counted() {
        let summary = summary_for(&["@1 REF r 0 4 5"], 4);
        assert_eq!(summary.out_of_range, 2);
        assert_eq!(summary.bank_activity, vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_report_uses_tokens() {
        let summary = summary_for(&["@1 WRITE x a 0 0 0 0 0 0 0 0 0"], 2);
        let report = to_report(&summary, &WaterfallConfig::default(), "t.trace", 3);

        assert_eq!(report.version, SUMMARY_SCHEMA_VERSION);
        assert_eq!(report.commands.get("WRITE"), Some(&1));
        assert_eq!(report.bank_count, 64);
        assert_eq!(report.busiest_banks.len(), 1);
    }

    #[test]
    fn test_text_summary_without_bank_listing() {
        let summary = summary_for(&["@1 ACT x a 0 0 0 0 0 0 0 0 1"], 2);
        let text = format_text_summary(&summary, 0);

        assert!(!text.contains("No bank activity."));
        assert!(!text.contains("Top "));
        assert!(text.contains("Records:          1"));
    }

    #[test]
    fn test_text_summary_lists_all_commands() {
        let text = format_text_summary(&RunSummary::new(2), 4);
        for command in Command::ALL {
            assert!(text.contains(command.token()));
        }
        assert!(text.contains("No bank activity."));
    }
}
