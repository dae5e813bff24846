//! Log parser — turns raw file text into a [`LogFile`] of timestamped entries.
//!
//! The whole document is first parsed as one JSON value; if that yields an
//! array, each element is a candidate record (array mode). Otherwise every
//! non-blank line is parsed as its own record (line mode) and unparsable
//! lines are skipped. Candidates whose timestamp cannot be resolved are
//! dropped. Nothing here fails: a malformed record never aborts a file.

use serde_json::Value;

use crate::timestamp::TimestampExtractor;
use crate::types::{LogEntry, LogFile};

/// How the document was split into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Array,
    Lines,
}

impl std::fmt::Display for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMode::Array => write!(f, "array"),
            ParseMode::Lines => write!(f, "lines"),
        }
    }
}

/// Per-file drop accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Records that parsed as JSON.
    pub candidates: usize,
    /// Entries that made it into the file.
    pub emitted: usize,
    /// Non-blank lines that were not valid JSON (line mode only).
    pub unparsable: usize,
    /// Records dropped because no timestamp resolved.
    pub missing_timestamp: usize,
}

impl ParseStats {
    pub fn dropped(&self) -> usize {
        self.unparsable + self.missing_timestamp
    }
}

impl std::ops::AddAssign for ParseStats {
    fn add_assign(&mut self, rhs: Self) {
        self.candidates += rhs.candidates;
        self.emitted += rhs.emitted;
        self.unparsable += rhs.unparsable;
        self.missing_timestamp += rhs.missing_timestamp;
    }
}

/// Result of parsing one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub file: LogFile,
    pub mode: ParseMode,
    pub stats: ParseStats,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Parser {
    extractor: TimestampExtractor,
}

impl Parser {
    pub fn new(extractor: TimestampExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &TimestampExtractor {
        &self.extractor
    }

    pub fn parse(&self, raw: &str, file_name: &str) -> Parsed {
        let mut stats = ParseStats::default();
        let mut entries = Vec::new();

        let mode = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(records)) => {
                for (index, record) in records.into_iter().enumerate() {
                    stats.candidates += 1;
                    self.push(&mut entries, &mut stats, record, file_name, index as u64 + 1);
                }
                ParseMode::Array
            }
            _ => {
                for (index, line) in raw.split('\n').enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<Value>(line) {
                        Ok(record) => {
                            stats.candidates += 1;
                            self.push(&mut entries, &mut stats, record, file_name, index as u64 + 1);
                        }
                        Err(_) => stats.unparsable += 1,
                    }
                }
                ParseMode::Lines
            }
        };

        tracing::debug!(
            file = file_name,
            %mode,
            candidates = stats.candidates,
            emitted = stats.emitted,
            unparsable = stats.unparsable,
            missing_timestamp = stats.missing_timestamp,
            "parser: file parsed"
        );

        Parsed {
            file: LogFile::new(file_name, entries),
            mode,
            stats,
        }
    }

    fn push(
        &self,
        entries: &mut Vec<LogEntry>,
        stats: &mut ParseStats,
        record: Value,
        file_name: &str,
        line_number: u64,
    ) {
        match self.extractor.extract(&record) {
            Some(ts) => {
                stats.emitted += 1;
                entries.push(LogEntry {
                    content: record,
                    file_name: file_name.to_string(),
                    line_number,
                    ts,
                });
            }
            None => stats.missing_timestamp += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
