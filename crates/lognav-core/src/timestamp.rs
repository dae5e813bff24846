//! Timestamp extractor — resolves one canonical UTC instant for a record.
//!
//! Candidate fields are tried in configured order. For each present,
//! non-empty candidate:
//!
//! 1. numeric values (JSON numbers or numeric strings) are epoch milliseconds;
//! 2. anything else is tested against the configured patterns in order, and
//!    the first match whose text parses as a calendar date/time wins.
//!
//! Numeric interpretation always takes priority over pattern matching for the
//! same field. No plausibility bound is applied to epoch values, so small and
//! negative numbers resolve. A numeric `0` counts as empty, like `""`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;

use crate::config::{ConfigError, TimestampConfig};
use crate::resolve::resolve;

/// Offset-less layouts, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// Layouts carrying an explicit offset that RFC 3339 parsing rejects.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Compiled timestamp strategy: ordered field paths plus ordered patterns.
#[derive(Debug, Clone)]
pub struct TimestampExtractor {
    fields: Vec<String>,
    patterns: Vec<Regex>,
}

impl TimestampExtractor {
    /// Build from already-compiled patterns.
    pub fn new(fields: Vec<String>, patterns: Vec<Regex>) -> Self {
        Self { fields, patterns }
    }

    /// Compile the configured patterns. An invalid pattern is a configuration
    /// error, reported here rather than per record.
    pub fn from_config(cfg: &TimestampConfig) -> Result<Self, ConfigError> {
        let patterns = cfg
            .patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidPattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(cfg.fields.clone(), patterns))
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Resolve the record's timestamp, or `None` if no field/pattern
    /// combination succeeds. The caller drops records that return `None`.
    pub fn extract(&self, record: &Value) -> Option<DateTime<Utc>> {
        self.fields.iter().find_map(|path| {
            let candidate = resolve(record, path)?;
            self.from_candidate(candidate)
        })
    }

    fn from_candidate(&self, candidate: &Value) -> Option<DateTime<Utc>> {
        match candidate {
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Number(n) => n.as_f64().and_then(from_epoch_millis),
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => match numeric_literal(s) {
                Some(ms) => from_epoch_millis(ms),
                None => self
                    .patterns
                    .iter()
                    .filter(|re| re.is_match(s))
                    .find_map(|_| parse_calendar(s)),
            },
            // null, booleans and containers are never timestamp candidates
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Interpret `s` as a decimal numeric literal. Non-finite values are rejected.
fn numeric_literal(s: &str) -> Option<f64> {
    let t = s.trim();
    // f64::from_str accepts "inf"/"nan" spellings; those are not numeric here.
    if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Epoch milliseconds to a UTC instant. Fractional milliseconds are
/// truncated; values outside chrono's calendar range fail.
pub fn from_epoch_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    let ms = ms.trunc();
    if ms < i64::MIN as f64 || ms > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(ms as i64)
}

/// Parse a calendar date/time string and normalise it to UTC.
pub fn parse_calendar(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
