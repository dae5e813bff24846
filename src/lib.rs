//! lognav — ingest, filter, and navigate heterogeneous JSON log files.
//!
//! This crate re-exports the pipeline layers from `lognav-core` and the feed
//! adapters from `lognav-feeds` so integration tests and the binary can import
//! them from one place, and holds the plain-text rendering the binary prints.
//!
//! # Architecture
//!
//! ```text
//! Feeds ──► Parser ──► FileSet ──► Filter ──► Sampler
//!                         │           │          │
//!                         └───── Session ────────┴──► render
//! ```

pub mod render;

pub use lognav_core::*;
pub use lognav_feeds as feeds;
