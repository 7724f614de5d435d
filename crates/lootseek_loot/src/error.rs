//! # Loot Error Types
//!
//! All errors that can occur while loading or querying loot rulesets.

use lootseek_shared::{LootTableId, RulesetVersion};
use thiserror::Error;

/// Errors that can occur in the loot system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LootError {
    /// Ruleset file could not be parsed or failed validation.
    #[error("invalid loot ruleset: {0}")]
    InvalidRuleset(String),

    /// No table in the file applies to the requested version.
    #[error("no loot tables available for ruleset {0}")]
    UnsupportedVersion(RulesetVersion),

    /// Table id not present in the loaded ruleset.
    #[error("loot table not found: {0}")]
    UnknownTable(LootTableId),

    /// Item name not produced by any table in the loaded ruleset.
    #[error("unknown item: {0}")]
    UnknownItem(String),
}

/// Result type for loot operations.
pub type LootResult<T> = Result<T, LootError>;
