//! Static log corpora used across harnesses.
#![allow(dead_code)]

/// JSON lines in the shapes real services emit, each with a resolvable
/// timestamp under the default field list.
pub const CORPUS_JSON: &[&str] = &[
    r#"{"ts":"2024-01-15T10:00:00Z","level":"INFO","message":"Server started","port":8080}"#,
    r#"{"timestamp":"2024-01-15T10:00:01Z","severity":"ERROR","msg":"Connection refused","host":"db.internal","port":5432}"#,
    r#"{"time":"2024-01-15T10:00:02.123Z","level":"WARN","message":"Slow query","duration_ms":4200}"#,
    r#"{"@timestamp":"2024-01-15T10:00:03Z","log":{"level":"debug"},"message":"Cache miss","key":"user:42"}"#,
    r#"{"ts":1705312804000,"lvl":"fatal","msg":"Out of memory","rss_mb":16384}"#,
    r#"{"timestamp":"2024-01-15 10:00:05","level":"INFO","request_id":"req-abc123","status":200}"#,
    r#"{"date":"Mon, 15 Jan 2024 10:00:06 +0000","level":"ERROR","error":"payment gateway timeout"}"#,
];

/// Lines that must never become entries: not JSON, or JSON without any
/// usable timestamp.
pub const CORPUS_REJECTS: &[&str] = &[
    "2024-01-15 10:00:00 INFO  Starting application version 2.4.1",
    "ts=2024-01-15T10:00:01Z level=error msg=\"Connection refused\"",
    r#"{"level":"INFO","message":"no time at all"}"#,
    r#"{"ts":"","message":"empty ts"}"#,
    r#"{"ts":null,"message":"null ts"}"#,
    r#"{"ts":"last tuesday","message":"prose ts"}"#,
    r#"{"ts":{"nested":1},"message":"object ts"}"#,
    r#"{"unterminated": "#,
];

/// Two records sharing one epoch timestamp.
pub const TWO_EPOCH_LINES: &str =
    "{\"ts\": 1700000000000, \"msg\": \"a\"}\n{\"ts\": 1700000000000, \"msg\":\"b\"}";

/// A corpus of `n` synthetic lines across levels, for throughput-ish tests.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let level = match i % 10 {
                0 => "ERROR",
                1 | 2 => "WARN",
                _ => "INFO",
            };
            format!(
                r#"{{"ts":"2024-01-15T{:02}:{:02}:{:02}Z","level":"{}","message":"log line {}","seq":{}}}"#,
                i / 3600 % 24,
                i / 60 % 60,
                i % 60,
                level,
                i,
                i,
            )
        })
        .collect()
}
