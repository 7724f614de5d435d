//! # Hit Sink
//!
//! Append-only destination for hit output.
//!
//! Opening the file is allowed to fail: the run falls back to stdout with
//! a warning. Once open, every failed write is an error the caller must
//! surface; hits are never dropped silently.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{SearchError, SearchResult};

/// Where hit blocks go.
pub struct HitSink {
    target: String,
    writer: Box<dyn Write + Send>,
}

impl HitSink {
    /// Opens `path` for appending, creating it if needed. Falls back to
    /// stdout if the file cannot be opened.
    #[must_use]
    pub fn open_append(path: &Path) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                target: path.display().to_string(),
                writer: Box::new(BufWriter::new(file)),
            },
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to open hit log, reporting to stdout only"
                );
                Self::stdout()
            }
        }
    }

    /// Writes to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::from_writer("stdout", io::stdout())
    }

    /// Wraps any writer.
    pub fn from_writer(target: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            target: target.into(),
            writer: Box::new(writer),
        }
    }

    /// Sink description, for messages.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Appends `block` and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Sink`] if the write or flush fails.
    pub fn append(&mut self, block: &str) -> SearchResult<()> {
        self.writer
            .write_all(block.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|source| SearchError::Sink {
                target: self.target.clone(),
                source,
            })
    }
}

impl std::fmt::Debug for HitSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitSink").field("target", &self.target).finish_non_exhaustive()
    }
}
