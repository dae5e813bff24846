//! Stdin feed — one file named [`STDIN_NAME`] holding everything piped in.

use lognav_core::RawFile;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::FeedError;

pub const STDIN_NAME: &str = "<stdin>";

pub async fn read_stdin() -> Result<RawFile, FeedError> {
    read_reader(tokio::io::stdin(), STDIN_NAME).await
}

/// Drain `reader` into a single raw file called `name`.
pub async fn read_reader<R: AsyncRead + Unpin>(mut reader: R, name: &str) -> Result<RawFile, FeedError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).await.map_err(FeedError::Stdin)?;
    tracing::debug!(bytes = bytes.len(), "stdin feed: read");
    Ok(RawFile::new(name, String::from_utf8_lossy(&bytes).into_owned()))
}
