//! # LOOTSEEK Search Engine
//!
//! Scans a range of world seeds for loot containers holding a target item
//! near an anchor point, in parallel.
//!
//! ## Pipeline
//!
//! ```text
//! SearchRange ─> partition ─> workers ─> check_seed(seed) ─> Aggregator ─> HitSink
//!                               │
//!                               └─ enumerate ─> resolve ─> evaluate ─> score
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure per-seed results**: `check_seed` depends only on the seed, the
//!    config and the collaborators
//! 2. **Share-nothing workers**: each worker owns its world and loot
//!    sessions; only the aggregator and the stop flag are shared
//! 3. **No silent loss**: a failed append aborts the run
//!
//! ## Collaborators
//!
//! World generation and loot generation are reached through the traits in
//! [`collab`]. [`lootseek_world::PortalWorld`] and
//! [`lootseek_loot::LootRuleset`] implement them.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod aggregate;
pub mod collab;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod evaluate;
mod guard;
pub mod inspect;
pub mod partition;
pub mod report;
pub mod resolve;
pub mod runner;
pub mod seed_loop;
pub mod sink;
pub mod stop;

pub use aggregate::{Aggregator, CounterSnapshot};
pub use collab::{LootModel, LootSession, WorldModel, WorldSession};
pub use config::{
    AnchorMode, LootContextMode, ScoreMode, SearchConfig, SearchRange, DEFAULT_END_SEED,
    MAX_DISTANCE_LIMIT,
};
pub use enumerate::{Candidate, RegionWindow};
pub use error::{SearchError, SearchResult};
pub use evaluate::{ContainerEvaluator, Evaluation, KeepContents, LootAccess};
pub use inspect::{format_inspection, inspect_seed, Inspection};
pub use partition::partition;
pub use report::{format_hit, parse_machine_line};
pub use resolve::{Resolution, Resolver};
pub use runner::{RunSummary, SearchRun, WorkerReport};
pub use seed_loop::{ContainerHit, SeedOutcome, SeedResult, SeedSearch, SeedStats};
pub use sink::HitSink;
pub use stop::StopFlag;
