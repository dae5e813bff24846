//! Path resolver — looks up a value at a dotted field path inside a record.
//!
//! `a.b.0.c` walks object keys and array positions. Bracket indices are
//! accepted as sugar (`a.b[0].c`). A top-level key equal to the whole path
//! wins over splitting, so `{"a.b": 1}` resolves `a.b`. Any miss yields
//! `None`, never an error.

use serde_json::Value;

/// Resolve `path` against `record`.
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(value) = record.as_object().and_then(|map| map.get(path)) {
        return Some(value);
    }
    segments(path).try_fold(record, |value, segment| step(value, segment))
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Split a path into segments, expanding `name[3]` into `name`, `3`.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').flat_map(|part| {
        let mut out = Vec::new();
        let mut rest = part;
        match rest.find('[') {
            Some(open) if rest.ends_with(']') => {
                if open > 0 {
                    out.push(&rest[..open]);
                }
                rest = &rest[open..];
                // rest is now `[i][j]...`
                for idx in rest.split(']').filter(|s| !s.is_empty()) {
                    out.push(idx.trim_start_matches('['));
                }
            }
            _ => out.push(part),
        }
        out
    })
}
