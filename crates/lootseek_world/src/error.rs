//! # World Error Types

use lootseek_shared::RulesetVersion;
use thiserror::Error;

/// Errors raised while setting up world generation.
///
/// Per-candidate failures are not errors: they surface as `None` from
/// placement or resolution and the caller skips the candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The ruleset has no placement rules for this structure.
    #[error("no {structure} placement rules in ruleset {version}")]
    UnsupportedStructure {
        /// Structure kind that was requested.
        structure: &'static str,
        /// Ruleset version that lacks it.
        version: RulesetVersion,
    },
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
