//! # LOOTSEEK Shared
//!
//! Common types used by the world collaborator, the loot collaborator and
//! the search engine.
//!
//! ## RULE
//!
//! This crate must NEVER contain generation logic. If a type needs a seed
//! to be meaningful, it belongs in `lootseek_world` or `lootseek_loot`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;
pub mod table;
pub mod version;

pub use math::{BlockPos, RegionCoord, CHUNK_WIDTH};
pub use table::LootTableId;
pub use version::{RulesetVersion, VersionParseError};
