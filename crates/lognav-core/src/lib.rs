//! lognav-core — ingest, filter, and sample heterogeneous JSON log files.
//!
//! # Pipeline
//!
//! ```text
//! raw text ──► Parser ──► FileSet ──► Filter ──► Sampler ──► timeline
//!               │  └─ TimestampExtractor ─ resolve        │
//!               │                                          └──► table
//!               └─ Session owns the FileSet and re-derives views on change
//! ```
//!
//! Everything below [`session`] is pure: parsing, filtering, and sampling take
//! their inputs by reference and never mutate the file set.

pub mod config;
pub mod fileset;
pub mod filter;
pub mod parser;
pub mod pattern;
pub mod resolve;
pub mod sampler;
pub mod session;
pub mod timestamp;
pub mod types;

pub use config::{Config, ConfigError};
pub use fileset::{AddOutcome, FileSet, FileSetError, IngestFailure, Ingestor, ParseFile};
pub use filter::{FilterSpec, FilteredView};
pub use parser::{ParseMode, ParseStats, Parsed, Parser};
pub use pattern::{matches, Pattern};
pub use sampler::SampledSeries;
pub use session::{Location, Session};
pub use timestamp::TimestampExtractor;
pub use types::{EntryRef, LogEntry, LogFile, RawFile};
