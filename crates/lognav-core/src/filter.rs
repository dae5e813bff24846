//! Filter engine — include/exclude patterns over serialized entries.
//!
//! Filtering never touches the file set. It produces a [`FilteredView`]: for
//! each file, the positions of the entries that pass. Exclude always wins
//! over include. When both patterns are blank there is no view at all, which
//! callers read as "no filter active".

use crate::fileset::FileSet;
use crate::pattern::{is_blank, Pattern};
use crate::types::{LogEntry, LogFile};

/// Include/exclude query. Blank halves impose no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub include: String,
    pub exclude: String,
}

impl FilterSpec {
    pub fn new(include: impl Into<String>, exclude: impl Into<String>) -> Self {
        Self {
            include: include.into(),
            exclude: exclude.into(),
        }
    }

    pub fn include(pattern: impl Into<String>) -> Self {
        Self::new(pattern, "")
    }

    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self::new("", pattern)
    }

    pub fn is_active(&self) -> bool {
        !is_blank(&self.include) || !is_blank(&self.exclude)
    }
}

/// Stable full-text rendering of an entry: compact JSON of content, file
/// name, line number and ISO timestamp. Object keys keep the order they had
/// in the source record, so `*` patterns spanning several keys see the
/// fields as they were written.
pub fn serialize(entry: &LogEntry) -> String {
    serde_json::to_string(entry).unwrap_or_else(|_| entry.content.to_string())
}

// ---------------------------------------------------------------------------
// Compiled filter
// ---------------------------------------------------------------------------

/// A [`FilterSpec`] with both halves pre-split.
#[derive(Debug, Clone)]
pub struct Filter {
    include: Option<Pattern>,
    exclude: Option<Pattern>,
}

impl Filter {
    /// `None` when both patterns are blank.
    pub fn new(spec: &FilterSpec) -> Option<Filter> {
        spec.is_active().then(|| Filter {
            include: Pattern::compile(&spec.include),
            exclude: Pattern::compile(&spec.exclude),
        })
    }

    pub fn keeps(&self, entry: &LogEntry) -> bool {
        self.keeps_text(&serialize(entry))
    }

    fn keeps_text(&self, text: &str) -> bool {
        if self.exclude.as_ref().is_some_and(|p| p.is_match(text)) {
            return false;
        }
        match &self.include {
            None => true,
            Some(p) => p.is_match(text),
        }
    }

    fn indices(&self, file: &LogFile) -> Vec<usize> {
        file.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| self.keeps(e))
            .map(|(i, _)| i)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// FilteredView
// ---------------------------------------------------------------------------

/// Visible entry positions of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIndices {
    pub file_name: String,
    /// 0-based positions into the file's entries, ascending.
    pub indices: Vec<usize>,
}

/// Per-file visible positions, in file-set order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    files: Vec<FileIndices>,
}

impl FilteredView {
    pub fn files(&self) -> &[FileIndices] {
        &self.files
    }

    pub fn indices(&self, file_name: &str) -> Option<&[usize]> {
        self.files
            .iter()
            .find(|f| f.file_name == file_name)
            .map(|f| f.indices.as_slice())
    }

    pub fn total_visible(&self) -> usize {
        self.files.iter().map(|f| f.indices.len()).sum()
    }
}

/// Evaluate `spec` against every file. `None` means no filter is active.
pub fn evaluate(spec: &FilterSpec, files: &FileSet) -> Option<FilteredView> {
    let filter = Filter::new(spec)?;
    let files: Vec<FileIndices> = files
        .iter()
        .map(|file| FileIndices {
            file_name: file.file_name.clone(),
            indices: filter.indices(file),
        })
        .collect();
    let view = FilteredView { files };
    tracing::debug!(
        include = %spec.include,
        exclude = %spec.exclude,
        visible = view.total_visible(),
        "filter: view evaluated"
    );
    Some(view)
}
