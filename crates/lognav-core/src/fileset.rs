//! File set — the ordered, name-keyed collection of loaded [`LogFile`]s.
//!
//! The file set is the single source of truth; filtered views and sampled
//! series are derived from it and carry the [`FileSet::generation`] they were
//! computed at. Every mutation bumps the generation.
//!
//! [`FileSet::add`] parses a batch in parallel on the blocking pool and
//! commits the results together once every file has finished, so a half-done
//! batch is never visible.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinSet;

use crate::config::{Config, ConfigError};
use crate::parser::{ParseStats, Parsed, Parser};
use crate::timestamp::TimestampExtractor;
use crate::types::{LogFile, RawFile};

// ---------------------------------------------------------------------------
// Errors + outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileSetError {
    #[error("no file named {0:?} is loaded")]
    NotLoaded(String),
}

/// Why a file in a batch produced nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestFailure {
    #[error("parse task panicked: {0}")]
    Panicked(String),
    #[error("parse did not finish within {0:?}")]
    TimedOut(Duration),
}

/// What happened to each file of an `add` batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Names committed to the file set, in batch order.
    pub added: Vec<String>,
    /// Names rejected because they were already loaded or repeated earlier
    /// in the same batch.
    pub skipped: Vec<String>,
    pub failed: Vec<(String, IngestFailure)>,
    /// Drop counts summed over the added files.
    pub stats: ParseStats,
}

// ---------------------------------------------------------------------------
// Ingestor
// ---------------------------------------------------------------------------

/// Turns one raw file into a parsed file. Runs on the blocking pool.
pub trait ParseFile: std::fmt::Debug + Send + Sync + 'static {
    fn parse_file(&self, raw: &RawFile) -> Parsed;
}

impl ParseFile for Parser {
    fn parse_file(&self, raw: &RawFile) -> Parsed {
        self.parse(&raw.text, &raw.name)
    }
}

/// Parses batches of raw files concurrently.
#[derive(Debug, Clone)]
pub struct Ingestor {
    parser: Arc<dyn ParseFile>,
    timeout: Option<Duration>,
}

impl Ingestor {
    pub fn new(parser: impl ParseFile, timeout: Option<Duration>) -> Self {
        Self {
            parser: Arc::new(parser),
            timeout,
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let extractor = TimestampExtractor::from_config(&cfg.timestamps)?;
        Ok(Self::new(Parser::new(extractor), cfg.ingest.parse_timeout()))
    }

    /// Parse every file, returning one result per input in input order.
    ///
    /// With a timeout configured, all files share one deadline measured from
    /// the start of the batch; files still running at the deadline are
    /// reported as timed out and their results discarded.
    pub async fn parse_batch(&self, batch: Vec<RawFile>) -> Vec<(String, Result<Parsed, IngestFailure>)> {
        let names: Vec<String> = batch.iter().map(|f| f.name.clone()).collect();
        let mut slots: Vec<Option<Result<Parsed, IngestFailure>>> = vec![None; batch.len()];
        let mut ids = HashMap::new();
        let mut set = JoinSet::new();

        for (slot, raw) in batch.into_iter().enumerate() {
            let parser = Arc::clone(&self.parser);
            let handle = set.spawn_blocking(move || (slot, parser.parse_file(&raw)));
            ids.insert(handle.id(), slot);
        }

        let deadline = self.timeout.map(|t| tokio::time::Instant::now() + t);
        loop {
            let next = match deadline {
                Some(at) => match tokio::time::timeout_at(at, set.join_next_with_id()).await {
                    Ok(next) => next,
                    Err(_) => {
                        // Blocking tasks already running cannot be stopped;
                        // they finish in the background and are ignored.
                        set.abort_all();
                        break;
                    }
                },
                None => set.join_next_with_id().await,
            };
            match next {
                None => break,
                Some(Ok((_, (slot, parsed)))) => slots[slot] = Some(Ok(parsed)),
                Some(Err(e)) => {
                    if let Some(&slot) = ids.get(&e.id()) {
                        slots[slot] = Some(Err(IngestFailure::Panicked(e.to_string())));
                    }
                }
            }
        }

        let timeout = self.timeout.unwrap_or_default();
        names
            .into_iter()
            .zip(slots)
            .map(|(name, slot)| (name, slot.unwrap_or(Err(IngestFailure::TimedOut(timeout)))))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// FileSet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: Vec<LogFile>,
    generation: u64,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogFile> {
        self.files.iter()
    }

    pub fn files(&self) -> &[LogFile] {
        &self.files
    }

    pub fn get(&self, file_name: &str) -> Option<&LogFile> {
        self.files.iter().find(|f| f.file_name == file_name)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.get(file_name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.file_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether any file is loaded.
    pub fn is_loaded(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn total_entries(&self) -> usize {
        self.files.iter().map(LogFile::len).sum()
    }

    /// Bumped by every mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Parse and append a batch. Duplicate names are skipped and reported;
    /// the rest are committed together after every parse has finished.
    pub async fn add(&mut self, batch: Vec<RawFile>, ingestor: &Ingestor) -> AddOutcome {
        let mut outcome = AddOutcome::default();
        let mut seen: HashSet<String> = self.names().map(str::to_string).collect();
        let mut pending = Vec::with_capacity(batch.len());

        for raw in batch {
            if seen.insert(raw.name.clone()) {
                pending.push(raw);
            } else {
                tracing::warn!(file = %raw.name, "fileset: duplicate file name skipped");
                outcome.skipped.push(raw.name);
            }
        }

        let mut parsed_files = Vec::with_capacity(pending.len());
        for (name, result) in ingestor.parse_batch(pending).await {
            match result {
                Ok(parsed) => {
                    outcome.stats += parsed.stats;
                    outcome.added.push(name);
                    parsed_files.push(parsed.file);
                }
                Err(failure) => {
                    tracing::warn!(file = %name, error = %failure, "fileset: file not ingested");
                    outcome.failed.push((name, failure));
                }
            }
        }

        if !parsed_files.is_empty() {
            self.files.extend(parsed_files);
            self.generation += 1;
        }

        tracing::info!(
            added = outcome.added.len(),
            skipped = outcome.skipped.len(),
            failed = outcome.failed.len(),
            dropped = outcome.stats.dropped(),
            generation = self.generation,
            "fileset: batch committed"
        );
        outcome
    }

    /// Remove a file by name. Removing a name that is not loaded is a caller
    /// error.
    pub fn remove(&mut self, file_name: &str) -> Result<LogFile, FileSetError> {
        let pos = self
            .files
            .iter()
            .position(|f| f.file_name == file_name)
            .ok_or_else(|| FileSetError::NotLoaded(file_name.to_string()))?;
        let removed = self.files.remove(pos);
        self.generation += 1;
        tracing::info!(file = file_name, loaded = self.is_loaded(), "fileset: file removed");
        Ok(removed)
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a LogFile;
    type IntoIter = std::slice::Iter<'a, LogFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
