//! Core types for lognav-core.
//!
//! This module defines the fundamental data structures shared across all
//! pipeline layers: the normalised [`LogEntry`], the [`LogFile`] that owns a
//! sequence of them, the raw [`RawFile`] input pair, and the [`EntryRef`]
//! identity used for cross-view navigation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A normalised log entry produced by the parser.
///
/// Entries are immutable once created. Only [`crate::parser::Parser`]
/// constructs them, and only after a timestamp has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// The original record, untouched.
    pub content: Value,
    /// Name of the file this entry came from.
    pub file_name: String,
    /// 1-based position in the source document (line number in line mode,
    /// array index + 1 in array mode).
    pub line_number: u64,
    /// Resolved timestamp, always UTC.
    #[serde(rename = "timestamp", serialize_with = "serialize_iso")]
    pub ts: DateTime<Utc>,
}

impl LogEntry {
    /// Canonical ISO-8601 rendering, e.g. `2023-11-14T22:13:20.000Z`.
    pub fn timestamp(&self) -> String {
        to_iso(&self.ts)
    }

    /// Epoch milliseconds, the x-coordinate used by timeline consumers.
    pub fn timestamp_millis(&self) -> i64 {
        self.ts.timestamp_millis()
    }

    /// Identity of this entry for navigation.
    pub fn entry_ref(&self) -> EntryRef {
        EntryRef {
            file_name: self.file_name.clone(),
            line_number: self.line_number,
        }
    }
}

/// Render a UTC instant in the canonical millisecond ISO-8601 form.
pub fn to_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&to_iso(ts))
}

/// One ingested source document.
#[derive(Debug, Clone, PartialEq)]
pub struct LogFile {
    pub file_name: String,
    pub entries: Vec<LogEntry>,
}

impl LogFile {
    pub fn new(file_name: impl Into<String>, entries: Vec<LogEntry>) -> Self {
        Self {
            file_name: file_name.into(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry with the given source line number, if it survived
    /// parsing. Line numbers are strictly increasing so this is a binary search.
    pub fn position_of(&self, line_number: u64) -> Option<usize> {
        self.entries
            .binary_search_by_key(&line_number, |e| e.line_number)
            .ok()
    }
}

/// Raw `(text, name)` pair handed to the core by a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub text: String,
}

impl RawFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// `(file_name, line_number)` identity of an entry, stable across filter and
/// sampling changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryRef {
    pub file_name: String,
    pub line_number: u64,
}

impl std::fmt::Display for EntryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file_name, self.line_number)
    }
}

impl std::str::FromStr for EntryRef {
    type Err = String;

    /// Parses `name:line`. The split happens at the last `:` so file names
    /// containing colons still work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, line) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected <file>:<line>, got {s:?}"))?;
        if name.is_empty() {
            return Err(format!("missing file name in {s:?}"));
        }
        let line_number = line
            .parse::<u64>()
            .map_err(|_| format!("invalid line number {line:?}"))?;
        if line_number == 0 {
            return Err("line numbers start at 1".to_string());
        }
        Ok(EntryRef {
            file_name: name.to_string(),
            line_number,
        })
    }
}
