//! Lazy line reader over a trace source.
//!
//! The reader owns its handle, so the source is closed as soon as the
//! reader is dropped, whether the run finished or bailed out early.

use crate::utils::error::SourceError;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// Where trace lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceSource {
    Path(PathBuf),
    Stdin,
}

impl TraceSource {
    /// Build a source from a CLI argument, where `-` means stdin
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for TraceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// One raw line of the trace, without its terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    /// 1-based line number
    pub number: usize,
    pub text: String,
}

/// Sequential, finite iterator over trace lines
pub struct TraceReader {
    inner: Box<dyn BufRead>,
    line: usize,
    buf: Vec<u8>,
    done: bool,
}

impl TraceReader {
    /// Wrap any buffered stream
    pub fn from_reader(reader: impl BufRead + 'static) -> Self {
        Self {
            inner: Box::new(reader),
            line: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Number of lines yielded so far
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

/// Open a trace source for reading
///
/// # Errors
/// * `SourceError::SourceUnavailable` - the file cannot be opened
pub fn open_trace(source: &TraceSource) -> Result<TraceReader, SourceError> {
    debug!("Opening trace source: {}", source);

    match source {
        TraceSource::Path(path) => {
            let file = File::open(path).map_err(|e| SourceError::SourceUnavailable {
                source_name: path.display().to_string(),
                reason: e,
            })?;
            Ok(TraceReader::from_reader(BufReader::new(file)))
        }
        TraceSource::Stdin => Ok(TraceReader::from_reader(BufReader::new(io::stdin()))),
    }
}

impl Iterator for TraceReader {
    type Item = Result<TraceLine, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.inner.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                self.line += 1;
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                Some(Ok(TraceLine {
                    number: self.line,
                    text: String::from_utf8_lossy(&self.buf).into_owned(),
                }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(SourceError::ReadFailed {
                    line: self.line + 1,
                    reason: e,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    #[test]
    fn test_reads_lines_in_order() {
        let reader = TraceReader::from_reader(Cursor::new("first\r\nsecond\nthird"));
        let lines: Vec<TraceLine> = reader.map(|l| l.unwrap()).collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "first");
        assert_eq!(lines[1].number, 2);
        assert_eq!(lines[2].text, "third");
    }

    #[test]
    fn test_empty_source() {
        let mut reader = TraceReader::from_reader(Cursor::new(""));
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
        assert_eq!(reader.lines_read(), 0);
    }

    #[test]
    fn test_open_missing_file() {
        let source = TraceSource::Path(Path::new("/definitely/not/here.trace").to_path_buf());
        let result = open_trace(&source);
        assert!(matches!(
            result,
            Err(SourceError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_source_from_arg() {
        assert_eq!(TraceSource::from_arg("-"), TraceSource::Stdin);
        assert_eq!(
            TraceSource::from_arg("dram.trace"),
            TraceSource::Path(PathBuf::from("dram.trace"))
        );
    }
}
