//! lognav-feeds — feed adapters that turn log sources into `(text, name)`
//! pairs for the core.
//!
//! The core never touches the filesystem; everything that reads bytes lives
//! here. Content is converted to UTF-8 lossily so a stray invalid byte costs
//! one unparsable line rather than the whole file.

use std::path::PathBuf;

use thiserror::Error;

pub mod file;
pub mod stdin;

pub use file::{display_name, read_files};
pub use stdin::{read_reader, read_stdin, STDIN_NAME};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reading {path} did not complete: {source}")]
    Task {
        path: PathBuf,
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("{0} has no file name")]
    NoFileName(PathBuf),
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),
}
