//! Pattern matcher — alternation of `*`-separated literal segments.
//!
//! ```text
//! pattern     := alternative ('|' alternative)*
//! alternative := segment ('*' segment)*
//! ```
//!
//! An alternative matches when its non-empty segments occur in the text in
//! order, each search starting where the previous match ended. The search is
//! greedy and never backtracks: a segment's first occurrence is taken and
//! never revisited. Empty segments constrain nothing, so an alternative made
//! only of `*` (or nothing at all) matches every text. A blank pattern never
//! matches. Matching is case-sensitive.

/// A pattern split once into alternatives and segments, ready to be applied
/// to many texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    /// Non-empty segments of each alternative, in order.
    alternatives: Vec<Vec<String>>,
}

impl Pattern {
    /// Split `source`. Returns `None` for a blank pattern.
    pub fn compile(source: &str) -> Option<Pattern> {
        if is_blank(source) {
            return None;
        }
        let alternatives = source
            .split('|')
            .map(|alt| {
                alt.split('*')
                    .filter(|seg| !seg.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .collect();
        Some(Pattern {
            source: source.to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.alternatives
            .iter()
            .any(|segments| matches_alternative(segments, text))
    }
}

/// One-shot form of [`Pattern::compile`] + [`Pattern::is_match`].
pub fn matches(pattern: &str, text: &str) -> bool {
    Pattern::compile(pattern).is_some_and(|p| p.is_match(text))
}

/// Empty or whitespace-only.
pub fn is_blank(pattern: &str) -> bool {
    pattern.trim().is_empty()
}

fn matches_alternative(segments: &[String], text: &str) -> bool {
    let mut cursor = 0;
    for seg in segments {
        match text[cursor..].find(seg.as_str()) {
            Some(at) => cursor += at + seg.len(),
            None => return false,
        }
    }
    true
}
