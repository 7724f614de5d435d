//! # Search Configuration
//!
//! `SearchConfig` is built once (defaults, then an optional TOML file,
//! then command-line overrides), validated, and from then on only ever
//! shared as `&SearchConfig`.
//!
//! ## File Format
//!
//! ```toml
//! min_match_threshold = 2
//! max_distance = 1000
//! version = "1.21"
//! concurrency = 8
//! fast_mode = false
//! anchor = "spawn"          # origin | spawn
//! score_mode = "total"      # total | single
//! target_item = "enchanted_golden_apple"
//! max_recorded_hits = 64
//! loot_context = "per_worker"  # per_worker | shared
//! progress_interval = 1000
//! ```

use std::path::Path;
use std::str::FromStr;

use lootseek_shared::RulesetVersion;
use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};

/// Largest accepted `max_distance`, in blocks (the world border).
pub const MAX_DISTANCE_LIMIT: u32 = 30_000_000;

/// Default last seed: the 48-bit structure seed space.
pub const DEFAULT_END_SEED: u64 = (1 << 48) - 1;

/// Where distance is measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    /// The world origin `(0, 0)`.
    #[default]
    Origin,
    /// The estimated spawn point of each seed.
    Spawn,
}

impl FromStr for AnchorMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "origin" => Ok(Self::Origin),
            "spawn" => Ok(Self::Spawn),
            other => Err(SearchError::InvalidConfig(format!(
                "unknown anchor '{other}' (expected origin or spawn)"
            ))),
        }
    }
}

/// Which per-seed score is compared against the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreMode {
    /// Sum over every container in range.
    #[default]
    #[serde(rename = "total")]
    Total,
    /// Best single container.
    #[serde(rename = "single")]
    SingleContainer,
}

impl FromStr for ScoreMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total" => Ok(Self::Total),
            "single" => Ok(Self::SingleContainer),
            other => Err(SearchError::InvalidConfig(format!(
                "unknown score mode '{other}' (expected total or single)"
            ))),
        }
    }
}

/// How workers reach the loot collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootContextMode {
    /// One loot session per worker, no lock.
    #[default]
    PerWorker,
    /// One session for the whole run behind a generation lock. Every
    /// container evaluation serializes on it.
    Shared,
}

/// An inclusive range of seeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchRange {
    start: u64,
    end: u64,
}

impl SearchRange {
    /// Creates `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if `start > end`.
    pub fn new(start: u64, end: u64) -> SearchResult<Self> {
        if start > end {
            return Err(SearchError::InvalidConfig(format!(
                "start seed ({start}) > end seed ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// A single seed.
    #[must_use]
    pub const fn single(seed: u64) -> Self {
        Self {
            start: seed,
            end: seed,
        }
    }

    /// First seed.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Last seed (inclusive).
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Number of seeds. Never zero; `u128` so the full `u64` space fits.
    #[must_use]
    pub const fn len(&self) -> u128 {
        (self.end - self.start) as u128 + 1
    }

    /// Returns true if `seed` lies in the range.
    #[must_use]
    pub const fn contains(&self, seed: u64) -> bool {
        self.start <= seed && seed <= self.end
    }

    /// Seeds in increasing order.
    pub fn seeds(&self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl std::fmt::Display for SearchRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Parameters of one search run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Score a seed must reach to be a hit.
    pub min_match_threshold: u32,
    /// Search radius around the anchor, in blocks.
    pub max_distance: u32,
    /// Generation ruleset.
    pub version: RulesetVersion,
    /// Number of workers.
    pub concurrency: usize,
    /// Skip the viability check. Faster; may report portals that would
    /// not actually generate.
    pub fast_mode: bool,
    /// Distance reference point.
    pub anchor: AnchorMode,
    /// Per-seed score.
    pub score_mode: ScoreMode,
    /// Item to count, with or without namespace.
    pub target_item: String,
    /// Matching containers recorded per seed. Further matches still
    /// count toward the score.
    pub max_recorded_hits: usize,
    /// Loot session sharing.
    pub loot_context: LootContextMode,
    /// Seeds between progress reports, per worker.
    pub progress_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_match_threshold: 1,
            max_distance: 1000,
            version: RulesetVersion::LATEST,
            concurrency: 1,
            fast_mode: false,
            anchor: AnchorMode::Origin,
            score_mode: ScoreMode::Total,
            target_item: "enchanted_golden_apple".into(),
            max_recorded_hits: 64,
            loot_context: LootContextMode::PerWorker,
            progress_interval: 1000,
        }
    }
}

impl SearchConfig {
    /// Parses a TOML config. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] on parse failure.
    pub fn from_toml_str(source: &str) -> SearchResult<Self> {
        toml::from_str(source).map_err(|e| SearchError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if the file cannot be read
    /// or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> SearchResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| SearchError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> SearchResult<()> {
        let invalid = |msg: String| Err(SearchError::InvalidConfig(msg));

        if self.min_match_threshold == 0 {
            return invalid("min_match_threshold must be at least 1".into());
        }
        if self.max_distance == 0 || self.max_distance > MAX_DISTANCE_LIMIT {
            return invalid(format!(
                "max_distance must be in 1..={MAX_DISTANCE_LIMIT}, got {}",
                self.max_distance
            ));
        }
        if self.concurrency == 0 {
            return invalid("concurrency must be at least 1".into());
        }
        if self.progress_interval == 0 {
            return invalid("progress_interval must be at least 1".into());
        }
        if self.target_item.trim().is_empty() {
            return invalid("target_item must not be empty".into());
        }
        Ok(())
    }

    /// Returns true if `score` passes the threshold.
    #[inline]
    #[must_use]
    pub const fn passes(&self, score: u64) -> bool {
        score >= self.min_match_threshold as u64
    }
}
