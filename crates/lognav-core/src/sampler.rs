//! Sampler — deterministic strided downsampling for timeline display.
//!
//! A sequence at or below `cap` entries is kept whole. Above it, the stride
//! is `ceil(len / target)` and positions `0, stride, 2*stride, …` are kept,
//! which bounds the result at `target` points. Each file is sampled on its
//! own so a small file is never thinned because a sibling is large.

use crate::config::SamplingConfig;
use crate::fileset::FileSet;
use crate::filter::FilteredView;
use crate::types::LogEntry;

/// Stride and kept positions for a sequence of some length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub stride: usize,
    /// Positions into the sampled sequence, ascending.
    pub positions: Vec<usize>,
}

/// Stride for a sequence of `len` items. Always at least 1 and
/// non-decreasing in `len`.
pub fn stride_for(len: usize, policy: SamplingConfig) -> usize {
    let cap = policy.cap.max(1);
    if len <= cap {
        return 1;
    }
    let target = policy.target.clamp(1, cap);
    len.div_ceil(target)
}

pub fn sample(len: usize, policy: SamplingConfig) -> Sample {
    let stride = stride_for(len, policy);
    Sample {
        stride,
        positions: (0..len).step_by(stride).collect(),
    }
}

/// Sample a slice directly, returning the kept items and the stride.
pub fn sample_slice<T>(items: &[T], policy: SamplingConfig) -> (Vec<&T>, usize) {
    let stride = stride_for(items.len(), policy);
    (items.iter().step_by(stride).collect(), stride)
}

// ---------------------------------------------------------------------------
// Per-file series
// ---------------------------------------------------------------------------

/// The timeline points for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledSeries {
    pub file_name: String,
    pub stride: usize,
    /// Positions into the file's entries (not into the filtered view).
    pub indices: Vec<usize>,
}

impl SampledSeries {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve the series against the file set.
    pub fn entries<'a>(&'a self, files: &'a FileSet) -> impl Iterator<Item = &'a LogEntry> + 'a {
        let file = files.get(&self.file_name);
        self.indices
            .iter()
            .filter_map(move |&i| file.and_then(|f| f.entries.get(i)))
    }
}

/// Sample every file, over its filtered positions when a view is active and
/// over all its entries otherwise.
pub fn sample_files(
    files: &FileSet,
    view: Option<&FilteredView>,
    policy: SamplingConfig,
) -> Vec<SampledSeries> {
    files
        .iter()
        .map(|file| {
            let visible: Vec<usize> = match view.and_then(|v| v.indices(&file.file_name)) {
                Some(indices) => indices.to_vec(),
                None if view.is_some() => Vec::new(),
                None => (0..file.entries.len()).collect(),
            };
            let (kept, stride) = sample_slice(&visible, policy);
            SampledSeries {
                file_name: file.file_name.clone(),
                stride,
                indices: kept.into_iter().copied().collect(),
            }
        })
        .collect()
}
