//! # Search Error Types
//!
//! Everything that can abort a run. Per-candidate and per-container
//! failures never show up here; they are skipped where they happen.

use lootseek_loot::LootError;
use lootseek_world::WorldError;
use thiserror::Error;

/// Errors that abort a search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Bad arguments or config file contents.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A collaborator has no rules for the requested version or structure.
    #[error("configuration unavailable: {0}")]
    ConfigUnavailable(String),

    /// Appending to an opened hit sink failed.
    #[error("failed to write hits to {target}: {source}")]
    Sink {
        /// Sink description (path or `stdout`).
        target: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SearchError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig(_) => 2,
            Self::ConfigUnavailable(_) => 3,
            Self::Sink { .. } => 1,
        }
    }
}

impl From<WorldError> for SearchError {
    fn from(err: WorldError) -> Self {
        match err {
            WorldError::UnsupportedStructure { .. } => Self::ConfigUnavailable(err.to_string()),
        }
    }
}

impl From<LootError> for SearchError {
    fn from(err: LootError) -> Self {
        match err {
            LootError::UnknownItem(_) => Self::InvalidConfig(err.to_string()),
            LootError::InvalidRuleset(_)
            | LootError::UnsupportedVersion(_)
            | LootError::UnknownTable(_) => Self::ConfigUnavailable(err.to_string()),
        }
    }
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
