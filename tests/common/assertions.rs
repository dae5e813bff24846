//! Domain-specific assertion macros for lognav harnesses.
//!
//! These wrap plain asserts with context-rich failure messages that make it
//! clear *which* pipeline invariant was violated.
#![allow(dead_code)]

// ---------------------------------------------------------------------------
// Entry assertions
// ---------------------------------------------------------------------------

/// Assert that an entry carries the expected ISO timestamp.
///
/// ```rust
/// assert_timestamp!(entry, "2023-11-14T22:13:20.000Z");
/// ```
#[macro_export]
macro_rules! assert_timestamp {
    ($entry:expr, $iso:expr) => {{
        let entry: &lognav_core::LogEntry = &$entry;
        let expected: &str = $iso;
        let actual = entry.timestamp();
        if actual != expected {
            panic!(
                "assert_timestamp! failed:\n  expected: {}\n  actual:   {}\n  entry: {}:{} {}",
                expected, actual, entry.file_name, entry.line_number, entry.content
            );
        }
    }};
}

/// Assert the line numbers of a file's entries.
///
/// ```rust
/// assert_lines!(file, [1, 3, 4]);
/// ```
#[macro_export]
macro_rules! assert_lines {
    ($file:expr, $lines:expr) => {{
        let file: &lognav_core::LogFile = &$file;
        let actual: Vec<u64> = file.entries.iter().map(|e| e.line_number).collect();
        let expected: Vec<u64> = $lines.to_vec();
        if actual != expected {
            panic!(
                "assert_lines! failed for {}:\n  expected: {:?}\n  actual:   {:?}",
                file.file_name, expected, actual
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// File invariants
// ---------------------------------------------------------------------------

/// Line numbers strictly increase and every entry names its file.
pub fn assert_file_invariants(file: &lognav_core::LogFile) {
    for pair in file.entries.windows(2) {
        assert!(
            pair[0].line_number < pair[1].line_number,
            "line numbers not strictly increasing in {}: {} then {}",
            file.file_name,
            pair[0].line_number,
            pair[1].line_number
        );
    }
    for e in &file.entries {
        assert!(e.line_number >= 1, "line numbers are 1-based");
        assert_eq!(e.file_name, file.file_name, "entry belongs to another file");
    }
}

/// The visible indices of a view are ascending and in range.
pub fn assert_view_well_formed(view: &lognav_core::FilteredView, files: &lognav_core::FileSet) {
    for f in view.files() {
        let len = files
            .get(&f.file_name)
            .unwrap_or_else(|| panic!("view names unknown file {}", f.file_name))
            .len();
        assert!(
            f.indices.windows(2).all(|w| w[0] < w[1]),
            "indices of {} are not strictly ascending: {:?}",
            f.file_name,
            f.indices
        );
        assert!(
            f.indices.iter().all(|&i| i < len),
            "indices of {} out of range (len {len}): {:?}",
            f.file_name,
            f.indices
        );
    }
}
