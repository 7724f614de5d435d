//! # Loot Rulesets
//!
//! Loads loot tables from TOML and narrows them to one ruleset version.
//!
//! A file may hold several revisions of the same table id, each tagged
//! with the version it first applies to. For a given version the newest
//! revision with `since <= version` wins; revisions from later versions
//! are ignored.
//!
//! ## File Format
//!
//! ```toml
//! [[tables]]
//! id = 1
//! name = "chests/ruined_portal"
//! since = "1.16"
//!
//! [[tables.pools]]
//! rolls = { min = 4, max = 8 }
//!
//! [[tables.pools.entries]]
//! item = "minecraft:obsidian"
//! weight = 40
//! count = { min = 1, max = 2 }
//! ```

use std::collections::HashMap;
use std::path::Path;

use lootseek_shared::{LootTableId, RulesetVersion};
use serde::Deserialize;

use crate::error::{LootError, LootResult};
use crate::item::{ItemId, ItemRegistry};
use crate::table::{CountRange, LootEntry, LootPool, LootTable};

/// The ruined portal tables shipped with the crate.
pub const EMBEDDED_RULESET: &str = include_str!("../data/ruined_portal.toml");

#[derive(Debug, Deserialize)]
struct RawRuleset {
    #[serde(default)]
    tables: Vec<RawTable>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    id: LootTableId,
    name: String,
    since: RulesetVersion,
    #[serde(default)]
    pools: Vec<RawPool>,
}

#[derive(Debug, Deserialize)]
struct RawPool {
    rolls: CountRange,
    #[serde(default)]
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    item: String,
    weight: u32,
    #[serde(default)]
    count: CountRange,
}

/// Loot tables and item names for one ruleset version.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Clone, Debug)]
pub struct LootRuleset {
    version: RulesetVersion,
    items: ItemRegistry,
    tables: HashMap<LootTableId, LootTable>,
}

impl LootRuleset {
    /// Loads the embedded tables for `version`.
    ///
    /// # Errors
    ///
    /// Returns [`LootError::UnsupportedVersion`] if no table applies.
    pub fn for_version(version: RulesetVersion) -> LootResult<Self> {
        Self::from_toml_str(EMBEDDED_RULESET, version)
    }

    /// Loads a ruleset file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LootError::InvalidRuleset`] if the file cannot be read or
    /// parsed, or [`LootError::UnsupportedVersion`] if no table applies.
    pub fn from_path(path: impl AsRef<Path>, version: RulesetVersion) -> LootResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| LootError::InvalidRuleset(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source, version)
    }

    /// Parses a ruleset and keeps the tables that apply to `version`.
    ///
    /// # Errors
    ///
    /// Returns [`LootError::InvalidRuleset`] on parse or validation
    /// failure, [`LootError::UnsupportedVersion`] if no table applies.
    pub fn from_toml_str(source: &str, version: RulesetVersion) -> LootResult<Self> {
        let raw: RawRuleset =
            toml::from_str(source).map_err(|e| LootError::InvalidRuleset(e.to_string()))?;

        // newest applicable revision per id
        let mut selected: HashMap<LootTableId, RawTable> = HashMap::new();
        for table in raw.tables.into_iter().filter(|t| t.since <= version) {
            match selected.get(&table.id) {
                Some(existing) if existing.since >= table.since => {}
                _ => {
                    selected.insert(table.id, table);
                }
            }
        }

        if selected.is_empty() {
            return Err(LootError::UnsupportedVersion(version));
        }

        // register items in table-id order so ids are stable across runs
        let mut ids: Vec<LootTableId> = selected.keys().copied().collect();
        ids.sort_unstable();

        let mut items = ItemRegistry::new();
        let mut tables = HashMap::with_capacity(ids.len());
        for id in ids {
            let Some(raw_table) = selected.remove(&id) else {
                continue;
            };
            let table = compile_table(raw_table, &mut items)?;
            tables.insert(id, table);
        }

        Ok(Self {
            version,
            items,
            tables,
        })
    }

    /// Version these tables were selected for.
    #[must_use]
    pub const fn version(&self) -> RulesetVersion {
        self.version
    }

    /// Item names produced by these tables.
    #[must_use]
    pub const fn items(&self) -> &ItemRegistry {
        &self.items
    }

    /// Table by id.
    #[must_use]
    pub fn table(&self, id: LootTableId) -> Option<&LootTable> {
        self.tables.get(&id)
    }

    /// Table by id, as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`LootError::UnknownTable`] if absent.
    pub fn require_table(&self, id: LootTableId) -> LootResult<&LootTable> {
        self.table(id).ok_or(LootError::UnknownTable(id))
    }

    /// Resolves an item name, with or without namespace.
    ///
    /// # Errors
    ///
    /// Returns [`LootError::UnknownItem`] if no table produces it.
    pub fn require_item(&self, name: &str) -> LootResult<ItemId> {
        self.items
            .resolve(name)
            .ok_or_else(|| LootError::UnknownItem(name.to_owned()))
    }

    /// Number of tables loaded.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

fn compile_table(raw: RawTable, items: &mut ItemRegistry) -> LootResult<LootTable> {
    let pools = raw
        .pools
        .into_iter()
        .map(|pool| {
            let entries = pool
                .entries
                .into_iter()
                .map(|entry| LootEntry {
                    item: items.register(&entry.item),
                    weight: entry.weight,
                    count: entry.count,
                })
                .collect();
            LootPool::new(pool.rolls, entries)
        })
        .collect::<LootResult<Vec<_>>>()
        .map_err(|e| match e {
            LootError::InvalidRuleset(msg) => {
                LootError::InvalidRuleset(format!("table {} ({}): {msg}", raw.id, raw.name))
            }
            other => other,
        })?;

    Ok(LootTable {
        id: raw.id,
        name: raw.name,
        since: raw.since,
        pools,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_REVISIONS: &str = r#"
        [[tables]]
        id = 5
        name = "old"
        since = "1.16"
        [[tables.pools]]
        rolls = { min = 1, max = 1 }
        [[tables.pools.entries]]
        item = "minecraft:flint"
        weight = 1

        [[tables]]
        id = 5
        name = "new"
        since = "1.20"
        [[tables.pools]]
        rolls = { min = 1, max = 1 }
        [[tables.pools.entries]]
        item = "minecraft:bell"
        weight = 1
    "#;

    #[test]
    fn test_newest_applicable_revision_wins() {
        let old = LootRuleset::from_toml_str(TWO_REVISIONS, RulesetVersion::V1_19).unwrap();
        let new = LootRuleset::from_toml_str(TWO_REVISIONS, RulesetVersion::V1_21).unwrap();

        assert_eq!(old.table(LootTableId(5)).unwrap().name, "old");
        assert_eq!(new.table(LootTableId(5)).unwrap().name, "new");
        assert!(old.items().resolve("bell").is_none());
        assert!(new.items().resolve("flint").is_none());
    }

    #[test]
    fn test_no_applicable_table() {
        let err = LootRuleset::from_toml_str(TWO_REVISIONS, RulesetVersion::V1_15).unwrap_err();
        assert_eq!(err, LootError::UnsupportedVersion(RulesetVersion::V1_15));
    }

    #[test]
    fn test_parse_errors_are_reported() {
        let err = LootRuleset::from_toml_str("[[tables]]\nid = \"x\"", RulesetVersion::V1_21)
            .unwrap_err();
        assert!(matches!(err, LootError::InvalidRuleset(_)));

        let bad_version = "[[tables]]\nid = 1\nname = \"t\"\nsince = \"2.0\"";
        assert!(LootRuleset::from_toml_str(bad_version, RulesetVersion::V1_21).is_err());
    }

    #[test]
    fn test_invalid_pool_names_its_table() {
        let source = r#"
            [[tables]]
            id = 3
            name = "broken"
            since = "1.16"
            [[tables.pools]]
            rolls = { min = 4, max = 2 }
        "#;
        let err = LootRuleset::from_toml_str(source, RulesetVersion::V1_21).unwrap_err();
        match err {
            LootError::InvalidRuleset(msg) => assert!(msg.contains("broken"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_embedded_ruleset_loads() {
        let ruleset = LootRuleset::for_version(RulesetVersion::V1_21).unwrap();
        assert_eq!(ruleset.table_count(), 1);
        assert!(ruleset.require_table(LootTableId::RUINED_PORTAL).is_ok());
        assert!(ruleset.require_item("enchanted_golden_apple").is_ok());
        assert_eq!(
            ruleset.require_item("diamond"),
            Err(LootError::UnknownItem("diamond".into()))
        );
    }
}
