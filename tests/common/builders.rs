//! Test builders — ergonomic constructors for entries, file sets, and
//! sessions.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use lognav_core::config::SamplingConfig;
use lognav_core::{Config, FileSet, Ingestor, LogEntry, RawFile, Session};
use serde_json::Value;

// ---------------------------------------------------------------------------
// LogEntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`LogEntry`] fixtures that bypass the parser.
///
/// # Example
///
/// ```rust
/// let entry = LogEntryBuilder::new(json!({"msg": "timeout"}))
///     .file("api.log")
///     .line(7)
///     .millis(1_700_000_000_000)
///     .build();
/// ```
pub struct LogEntryBuilder {
    content: Value,
    file_name: String,
    line_number: u64,
    millis: i64,
}

impl LogEntryBuilder {
    pub fn new(content: Value) -> Self {
        Self {
            content,
            file_name: "test.log".to_string(),
            line_number: 1,
            millis: 1_700_000_000_000,
        }
    }

    pub fn file(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn line(mut self, line: u64) -> Self {
        self.line_number = line;
        self
    }

    pub fn millis(mut self, millis: i64) -> Self {
        self.millis = millis;
        self
    }

    pub fn build(self) -> LogEntry {
        LogEntry {
            content: self.content,
            file_name: self.file_name,
            line_number: self.line_number,
            ts: Utc.timestamp_millis_opt(self.millis).unwrap(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config / ingest helpers
// ---------------------------------------------------------------------------

/// Built-in defaults with the candidate field list replaced.
pub fn config_with_fields(fields: &[&str]) -> Config {
    let mut cfg = Config::defaults();
    cfg.timestamps.fields = fields.iter().map(|s| s.to_string()).collect();
    cfg
}

/// Defaults with a small sampling policy, handy for exercising thinning
/// without building huge files.
pub fn config_with_sampling(cap: usize, target: usize) -> Config {
    let mut cfg = config_with_fields(&["ts"]);
    cfg.sampling = SamplingConfig { cap, target };
    cfg
}

pub fn ingestor(fields: &[&str]) -> Ingestor {
    Ingestor::from_config(&config_with_fields(fields)).unwrap()
}

pub fn raw(name: &str, text: impl Into<String>) -> RawFile {
    RawFile::new(name, text)
}

/// Build a file set from `(name, text)` pairs, keying timestamps on `ts`.
pub async fn file_set(files: &[(&str, &str)]) -> FileSet {
    let mut set = FileSet::new();
    let batch = files.iter().map(|(n, t)| raw(n, *t)).collect();
    let outcome = set.add(batch, &ingestor(&["ts"])).await;
    assert!(outcome.skipped.is_empty() && outcome.failed.is_empty(), "{outcome:?}");
    set
}

pub async fn session_with(cfg: &Config, files: Vec<RawFile>) -> Session {
    let mut session = Session::new(cfg).unwrap();
    session.add(files).await;
    session
}

/// Join records into line-delimited JSON.
pub fn jsonl(records: &[Value]) -> String {
    records
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `n` line-delimited records `{"ts": base + i*1000, "seq": i, "msg": "<tag> i"}`.
pub fn numbered_lines(n: usize, tag: &str) -> String {
    let records: Vec<Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "ts": 1_700_000_000_000i64 + i as i64 * 1000,
                "seq": i,
                "msg": format!("{tag} {i}"),
            })
        })
        .collect();
    jsonl(&records)
}
