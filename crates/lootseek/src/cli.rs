//! Command-line arguments for both binaries.
//!
//! Precedence for the search: built-in defaults, then the `-c` TOML file,
//! then flags given on the command line.

use std::path::PathBuf;

use clap::Parser;
use lootseek_search::{
    AnchorMode, LootContextMode, ScoreMode, SearchConfig, SearchError, SearchRange,
    SearchResult, DEFAULT_END_SEED,
};
use lootseek_shared::{RulesetVersion, CHUNK_WIDTH};

/// Default hit log.
pub const DEFAULT_OUTPUT: &str = "ega_seeds.txt";

/// Parses a seed given in decimal or `0x` hex.
///
/// # Errors
///
/// Returns a message naming the rejected input.
pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid seed '{s}': {e}"))
}

#[derive(Parser, Debug)]
#[command(name = "lootseek")]
#[command(about = "Finds world seeds whose ruined portal chests near spawn hold a target item")]
/// Arguments of the `lootseek` search binary.
pub struct SearchArgs {
    /// Minimum number of target items a seed must yield [default: 1]
    pub min_match_threshold: Option<u32>,

    /// Search radius around the anchor, in blocks [default: 1000]
    pub max_distance: Option<u32>,

    /// First seed, decimal or 0x hex
    #[arg(short, long, value_parser = parse_seed, default_value = "0")]
    pub start: u64,

    /// Last seed (inclusive), decimal or 0x hex [default: 2^48 - 1]
    #[arg(short, long, value_parser = parse_seed)]
    pub end: Option<u64>,

    /// Worker threads [default: 1]
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// Game version whose rules to use, e.g. 1.21 [default: 1.21]
    #[arg(short = 'v', long = "version")]
    pub version: Option<RulesetVersion>,

    /// Skip the terrain viability check (faster, less accurate)
    #[arg(long)]
    pub fast: bool,

    /// Measure distance from `origin` or the estimated `spawn`
    #[arg(long)]
    pub anchor: Option<AnchorMode>,

    /// Compare the `total` over all chests or the best `single` chest
    #[arg(long)]
    pub score: Option<ScoreMode>,

    /// Item to look for [default: enchanted_golden_apple]
    #[arg(long)]
    pub item: Option<String>,

    /// Matching chests listed per seed [default: 64]
    #[arg(long)]
    pub max_recorded: Option<usize>,

    /// Share one loot generator between all workers (slower)
    #[arg(long)]
    pub shared_loot_context: bool,

    /// Seeds between progress lines, per worker [default: 1000]
    #[arg(long)]
    pub progress_every: Option<u64>,

    /// Hit log, appended to
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// TOML file with search settings
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl SearchArgs {
    /// Merges the config file (if any) with command-line overrides and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] for an unreadable config
    /// file, out-of-range values or `start > end`.
    pub fn resolve(&self) -> SearchResult<(SearchConfig, SearchRange)> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_path(path)?,
            None => SearchConfig::default(),
        };

        if let Some(threshold) = self.min_match_threshold {
            config.min_match_threshold = threshold;
        }
        if let Some(distance) = self.max_distance {
            config.max_distance = distance;
        }
        if let Some(threads) = self.threads {
            config.concurrency = threads;
        }
        if let Some(version) = self.version {
            config.version = version;
        }
        if let Some(anchor) = self.anchor {
            config.anchor = anchor;
        }
        if let Some(score) = self.score {
            config.score_mode = score;
        }
        if let Some(item) = &self.item {
            config.target_item.clone_from(item);
        }
        if let Some(cap) = self.max_recorded {
            config.max_recorded_hits = cap;
        }
        if let Some(every) = self.progress_every {
            config.progress_interval = every;
        }
        config.fast_mode |= self.fast;
        if self.shared_loot_context {
            config.loot_context = LootContextMode::Shared;
        }

        config.validate()?;
        let range = SearchRange::new(self.start, self.end.unwrap_or(DEFAULT_END_SEED))?;
        Ok((config, range))
    }
}

#[derive(Parser, Debug)]
#[command(name = "lootseek-inspect")]
#[command(about = "Lists every ruined portal and chest around one seed's anchor")]
/// Arguments of the `lootseek-inspect` binary.
pub struct InspectArgs {
    /// Seed to inspect, decimal or 0x hex
    #[arg(value_parser = parse_seed)]
    pub seed: u64,

    /// Radius around the anchor, in chunks
    pub radius_chunks: u32,

    /// Game version whose rules to use, e.g. 1.21
    #[arg(short = 'v', long = "version", default_value = "1.21")]
    pub version: RulesetVersion,

    /// Measure distance from `origin` or the estimated `spawn`
    #[arg(long, default_value = "origin")]
    pub anchor: AnchorMode,

    /// Item to highlight and count
    #[arg(long, default_value = "enchanted_golden_apple")]
    pub item: String,
}

impl InspectArgs {
    /// Radius in blocks.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] on overflow.
    pub fn radius_blocks(&self) -> SearchResult<u32> {
        self.radius_chunks
            .checked_mul(CHUNK_WIDTH as u32)
            .ok_or_else(|| SearchError::InvalidConfig(format!("radius {} chunks is too large", self.radius_chunks)))
    }
}
