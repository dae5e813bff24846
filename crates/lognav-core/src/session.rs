//! Session — the state a front-end drives: files, the current filter, and the
//! views derived from them.
//!
//! Derived views are recomputed eagerly after every change, so whatever a
//! caller reads is always consistent with the current file set and filter.

use crate::config::{Config, ConfigError, SamplingConfig};
use crate::fileset::{AddOutcome, FileSet, FileSetError, Ingestor};
use crate::filter::{evaluate, FilterSpec, FilteredView};
use crate::sampler::{sample_files, SampledSeries};
use crate::types::{EntryRef, LogEntry, LogFile, RawFile};

/// Where an entry currently appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Position among this file's visible entries.
    pub file_row: usize,
    /// Position in the flattened visible table (files in load order).
    pub table_row: usize,
    /// Position in this file's sampled series, if the entry was sampled.
    pub sample_slot: Option<usize>,
}

pub struct Session {
    ingestor: Ingestor,
    sampling: SamplingConfig,
    files: FileSet,
    filter: FilterSpec,
    view: Option<FilteredView>,
    series: Vec<SampledSeries>,
    /// File-set generation the derived views were computed at.
    derived_at: u64,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ingestor: Ingestor::from_config(config)?,
            sampling: config.sampling,
            files: FileSet::new(),
            filter: FilterSpec::default(),
            view: None,
            series: Vec::new(),
            derived_at: 0,
        })
    }

    pub async fn add(&mut self, batch: Vec<RawFile>) -> AddOutcome {
        let outcome = self.files.add(batch, &self.ingestor).await;
        self.rederive();
        outcome
    }

    pub fn remove(&mut self, file_name: &str) -> Result<LogFile, FileSetError> {
        let removed = self.files.remove(file_name)?;
        self.rederive();
        Ok(removed)
    }

    pub fn set_filter(&mut self, spec: FilterSpec) {
        self.filter = spec;
        self.rederive();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(FilterSpec::default());
    }

    fn rederive(&mut self) {
        self.view = evaluate(&self.filter, &self.files);
        self.series = sample_files(&self.files, self.view.as_ref(), self.sampling);
        self.derived_at = self.files.generation();
        tracing::debug!(
            generation = self.derived_at,
            filtered = self.view.is_some(),
            series = self.series.len(),
            "session: views re-derived"
        );
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn is_loaded(&self) -> bool {
        self.files.is_loaded()
    }

    /// `None` when no filter is active.
    pub fn view(&self) -> Option<&FilteredView> {
        debug_assert_eq!(self.derived_at, self.files.generation());
        self.view.as_ref()
    }

    pub fn series(&self) -> &[SampledSeries] {
        &self.series
    }

    pub fn series_for(&self, file_name: &str) -> Option<&SampledSeries> {
        self.series.iter().find(|s| s.file_name == file_name)
    }

    /// Visible entries of one file, in order.
    pub fn visible_in<'a>(&'a self, file: &'a LogFile) -> Box<dyn Iterator<Item = &'a LogEntry> + 'a> {
        match self.view.as_ref() {
            None => Box::new(file.entries.iter()),
            Some(view) => {
                let indices = view.indices(&file.file_name).unwrap_or(&[]);
                Box::new(indices.iter().filter_map(move |&i| file.entries.get(i)))
            }
        }
    }

    /// The flattened table: every visible entry, files in load order.
    pub fn visible_entries(&self) -> Vec<&LogEntry> {
        self.files.iter().flat_map(|f| self.visible_in(f)).collect()
    }

    pub fn visible_count(&self) -> usize {
        match self.view.as_ref() {
            None => self.files.total_entries(),
            Some(view) => view.total_visible(),
        }
    }

    /// Find where the entry `(file_name, line_number)` currently appears.
    /// Entries hidden by the filter, dropped at parse time, or belonging to
    /// files that are not loaded are not found.
    pub fn locate(&self, file_name: &str, line_number: u64) -> Option<Location> {
        let mut rows_before = 0;
        for file in self.files.iter() {
            if file.file_name != file_name {
                rows_before += self.visible_len(file);
                continue;
            }
            let index = file.position_of(line_number)?;
            let file_row = match self.view.as_ref() {
                None => index,
                Some(view) => view.indices(file_name)?.binary_search(&index).ok()?,
            };
            let sample_slot = self
                .series_for(file_name)
                .and_then(|s| s.indices.binary_search(&index).ok());
            return Some(Location {
                file_row,
                table_row: rows_before + file_row,
                sample_slot,
            });
        }
        None
    }

    pub fn locate_ref(&self, entry: &EntryRef) -> Option<Location> {
        self.locate(&entry.file_name, entry.line_number)
    }

    fn visible_len(&self, file: &LogFile) -> usize {
        match self.view.as_ref() {
            None => file.len(),
            Some(view) => view.indices(&file.file_name).map_or(0, <[usize]>::len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        let mut cfg = Config::defaults();
        cfg.timestamps.fields = vec!["ts".to_string()];
        cfg.sampling = SamplingConfig { cap: 4, target: 2 };
        cfg
    }

    fn lines(n: usize, tag: &str) -> String {
        (1..=n)
            .map(|i| format!("{{\"ts\":{i},\"tag\":\"{tag}{i}\"}}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn locate_without_filter() {
        let mut s = Session::new(&config()).unwrap();
        s.add(vec![RawFile::new("a", lines(3, "a")), RawFile::new("b", lines(6, "b"))])
            .await;

        assert_eq!(
            s.locate("b", 4),
            Some(Location { file_row: 3, table_row: 6, sample_slot: Some(1) })
        );
        // b has 6 entries > cap 4, stride ceil(6/2) = 3 → indices 0, 3
        assert_eq!(s.locate("b", 1).unwrap().sample_slot, Some(0));
        assert_eq!(s.locate("b", 2).unwrap().sample_slot, None);
        assert_eq!(s.locate("a", 2).unwrap().sample_slot, Some(1));
        assert_eq!(s.locate("c", 1), None);
        assert_eq!(s.locate("a", 9), None);
    }

    #[tokio::test]
    async fn locate_follows_the_filter() {
        let mut s = Session::new(&config()).unwrap();
        s.add(vec![RawFile::new("a", lines(3, "a")), RawFile::new("b", lines(3, "b"))])
            .await;
        s.set_filter(FilterSpec::exclude("a2"));

        assert_eq!(s.locate("a", 2), None);
        assert_eq!(s.locate("a", 3).unwrap().file_row, 1);
        assert_eq!(s.locate("b", 1).unwrap().table_row, 2);
        assert_eq!(s.visible_count(), 5);

        s.clear_filter();
        assert!(s.view().is_none());
        assert_eq!(s.locate("b", 1).unwrap().table_row, 3);
    }

    #[tokio::test]
    async fn removal_rederives_views() {
        let mut s = Session::new(&config()).unwrap();
        s.add(vec![RawFile::new("a", lines(2, "a")), RawFile::new("b", lines(2, "b"))])
            .await;
        s.set_filter(FilterSpec::include("tag"));
        assert_eq!(s.view().unwrap().files().len(), 2);

        s.remove("a").unwrap();
        assert_eq!(s.view().unwrap().files().len(), 1);
        assert_eq!(s.series().len(), 1);
        assert_eq!(s.locate("b", 1).unwrap().table_row, 0);

        s.remove("b").unwrap();
        assert!(!s.is_loaded());
        assert!(s.series().is_empty());
        assert!(s.remove("b").is_err());
    }
}
