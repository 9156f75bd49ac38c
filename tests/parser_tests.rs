use dram_waterfall::parser::{classify_line, open_trace, Command, RecordKind, TraceSource};
use dram_waterfall::utils::error::{ParseError, SourceError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_trace_file_is_read_lazily_in_order() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "header").unwrap();
    writeln!(file, "@10 PRE x 0x40 0 0 0 0 0 0 0 0 7").unwrap();
    writeln!(file, "@20 REF r 0 1").unwrap();

    let source = TraceSource::Path(file.path().to_path_buf());
    let records: Vec<_> = open_trace(&source)
        .unwrap()
        .filter_map(|line| {
            let line = line.unwrap();
            classify_line(line.number, &line.text)
        })
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].line, 2);
    assert_eq!(records[0].command, Command::Precharge);
    assert_eq!(records[0].address, "0x40");
    assert_eq!(records[0].banks, vec![7]);
    assert_eq!(records[1].kind, RecordKind::MultiBankRefresh);
    assert_eq!(records[1].banks, vec![0, 1]);
}

#[test]
fn test_missing_source_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let source = TraceSource::Path(dir.path().join("missing.trace"));

    let err = open_trace(&source).err().unwrap();
    assert!(matches!(err, SourceError::SourceUnavailable { .. }));
    assert!(err.to_string().contains("missing.trace"));
}

#[test]
fn test_cycle_is_kept_verbatim() {
    let record = classify_line(1, "@000123 WRITE x y 0 0 0 0 0 0 0 0 0")
        .unwrap()
        .unwrap();
    assert_eq!(record.cycle, "000123");
}

#[test]
fn test_extra_tokens_after_bank_are_ignored() {
    let record = classify_line(1, "@5 READ x y 0 0 0 0 0 0 0 0 4 extra stuff")
        .unwrap()
        .unwrap();
    assert_eq!(record.banks, vec![4]);
}

#[test]
fn test_negative_bank_is_malformed() {
    let err = classify_line(3, "@5 READ x y 0 0 0 0 0 0 0 0 -1")
        .unwrap()
        .unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidBank {
            line: 3,
            index: 12,
            token: "-1".to_string()
        }
    );
}

#[test]
fn test_diagnostic_names_line_and_token() {
    let err = classify_line(42, "@5 ZQCAL x").unwrap().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("line 42"));
    assert!(message.contains("ZQCAL"));
}
