//! # LOOTSEEK Loot System
//!
//! Deterministic container contents for the seed search.
//!
//! ## Design Principles
//!
//! 1. **Deterministic** - a container seed fully determines its contents
//! 2. **External configuration** - all table data lives in TOML files
//! 3. **Version-scoped** - a ruleset holds the tables of exactly one version
//! 4. **Buffer reuse** - generation writes into a per-context buffer
//!
//! ## Example
//!
//! ```rust,ignore
//! use lootseek_loot::{LootContext, LootRuleset};
//!
//! let ruleset = Arc::new(LootRuleset::for_version(RulesetVersion::V1_21)?);
//! let target = ruleset.require_item("enchanted_golden_apple")?;
//!
//! let mut ctx = LootContext::new(Arc::clone(&ruleset));
//! let stacks = ctx.generate(LootTableId::RUINED_PORTAL, container_seed);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod context;
pub mod error;
pub mod item;
pub mod ruleset;
pub mod table;

pub use context::LootContext;
pub use error::{LootError, LootResult};
pub use item::{display_name, ContainerContents, ItemId, ItemRegistry, ItemStack};
pub use ruleset::{LootRuleset, EMBEDDED_RULESET};
pub use table::{CountRange, LootEntry, LootPool, LootTable};
