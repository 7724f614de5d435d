//! # Loot Tables
//!
//! Weighted pools rolled from a single container seed.
//!
//! ## Generation
//!
//! ```text
//! container_seed ──> ChaCha8Rng
//!                      │
//!   for each pool:     ├── rolls = uniform [rolls.min, rolls.max]
//!     repeat rolls:    ├── entry = cumulative weight pick
//!                      └── count = uniform [count.min, count.max]
//! ```
//!
//! Stacks are emitted in roll order. Two rolls of the same entry produce
//! two stacks; nothing is merged.

use lootseek_shared::{LootTableId, RulesetVersion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LootError, LootResult};
use crate::item::{ItemId, ItemStack};

/// Inclusive integer range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    /// Lower bound.
    pub min: u32,
    /// Upper bound (inclusive).
    pub max: u32,
}

impl CountRange {
    /// A fixed count.
    #[must_use]
    pub const fn exactly(n: u32) -> Self {
        Self { min: n, max: n }
    }

    /// Draws a value in `[min, max]`.
    #[inline]
    fn roll(self, rng: &mut ChaCha8Rng) -> u32 {
        if self.min == self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

impl Default for CountRange {
    fn default() -> Self {
        Self::exactly(1)
    }
}

/// One weighted outcome of a pool roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LootEntry {
    /// Item produced.
    pub item: ItemId,
    /// Relative weight within the pool.
    pub weight: u32,
    /// Stack size.
    pub count: CountRange,
}

/// A pool: rolled `rolls` times, each roll picks one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LootPool {
    rolls: CountRange,
    entries: Vec<LootEntry>,
    total_weight: u32,
}

impl LootPool {
    /// Builds a pool, validating ranges and weights.
    ///
    /// # Errors
    ///
    /// Returns [`LootError::InvalidRuleset`] if a range is inverted or the
    /// pool has no positive weight.
    pub fn new(rolls: CountRange, entries: Vec<LootEntry>) -> LootResult<Self> {
        if rolls.min > rolls.max {
            return Err(LootError::InvalidRuleset(format!(
                "pool rolls {}..{} are inverted",
                rolls.min, rolls.max
            )));
        }
        if let Some(entry) = entries.iter().find(|e| e.count.min > e.count.max) {
            return Err(LootError::InvalidRuleset(format!(
                "entry {:?} count {}..{} is inverted",
                entry.item, entry.count.min, entry.count.max
            )));
        }
        let total_weight = entries
            .iter()
            .try_fold(0u32, |acc, e| acc.checked_add(e.weight))
            .ok_or_else(|| LootError::InvalidRuleset("pool weight overflows".into()))?;
        if total_weight == 0 {
            return Err(LootError::InvalidRuleset("pool has no weighted entries".into()));
        }
        Ok(Self {
            rolls,
            entries,
            total_weight,
        })
    }

    /// Roll range.
    #[must_use]
    pub const fn rolls(&self) -> CountRange {
        self.rolls
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[LootEntry] {
        &self.entries
    }

    /// Sum of all entry weights.
    #[must_use]
    pub const fn total_weight(&self) -> u32 {
        self.total_weight
    }

    fn pick(&self, rng: &mut ChaCha8Rng) -> &LootEntry {
        let mut roll = rng.gen_range(0..self.total_weight);
        for entry in &self.entries {
            if roll < entry.weight {
                return entry;
            }
            roll -= entry.weight;
        }
        // total_weight is the exact sum, so the walk always returns above
        &self.entries[self.entries.len() - 1]
    }
}

/// A complete loot table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LootTable {
    /// Table id referenced by container descriptors.
    pub id: LootTableId,
    /// Human-readable name, e.g. `chests/ruined_portal`.
    pub name: String,
    /// First ruleset version this revision applies to.
    pub since: RulesetVersion,
    /// Pools, rolled in order.
    pub pools: Vec<LootPool>,
}

impl LootTable {
    /// Generates the contents for `container_seed` into `out`.
    ///
    /// `out` is cleared first; its capacity is reused.
    pub fn generate_into(&self, container_seed: u64, out: &mut Vec<ItemStack>) {
        out.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(container_seed);
        for pool in &self.pools {
            let rolls = pool.rolls.roll(&mut rng);
            for _ in 0..rolls {
                let entry = pool.pick(&mut rng);
                let count = entry.count.roll(&mut rng);
                out.push(ItemStack {
                    item: entry.item,
                    count,
                });
            }
        }
    }

    /// Allocating convenience wrapper around [`generate_into`](Self::generate_into).
    #[must_use]
    pub fn generate(&self, container_seed: u64) -> Vec<ItemStack> {
        let mut out = Vec::new();
        self.generate_into(container_seed, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> LootTable {
        let pool = LootPool::new(
            CountRange { min: 2, max: 5 },
            vec![
                LootEntry {
                    item: ItemId(0),
                    weight: 70,
                    count: CountRange { min: 1, max: 3 },
                },
                LootEntry {
                    item: ItemId(1),
                    weight: 29,
                    count: CountRange::default(),
                },
                LootEntry {
                    item: ItemId(2),
                    weight: 1,
                    count: CountRange::exactly(1),
                },
            ],
        )
        .unwrap();

        LootTable {
            id: LootTableId(9),
            name: "test".into(),
            since: RulesetVersion::V1_16,
            pools: vec![pool],
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let table = create_test_table();
        for seed in 0..100 {
            assert_eq!(table.generate(seed), table.generate(seed));
        }
    }

    #[test]
    fn test_roll_and_count_bounds() {
        let table = create_test_table();
        for seed in 0..1000 {
            let stacks = table.generate(seed);
            assert!((2..=5).contains(&stacks.len()));
            for stack in stacks {
                match stack.item.0 {
                    0 => assert!((1..=3).contains(&stack.count)),
                    1 | 2 => assert_eq!(stack.count, 1),
                    other => panic!("unexpected item {other}"),
                }
            }
        }
    }

    #[test]
    fn test_weights_are_respected() {
        let table = create_test_table();
        let mut counts = [0u32; 3];
        for seed in 0..5000 {
            for stack in table.generate(seed) {
                counts[stack.item.0 as usize] += 1;
            }
        }
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
        assert!(counts[2] > 0);
    }

    #[test]
    fn test_generate_into_clears_buffer() {
        let table = create_test_table();
        let mut buffer = vec![ItemStack { item: ItemId(42), count: 99 }; 16];
        table.generate_into(7, &mut buffer);
        assert_eq!(buffer, table.generate(7));
    }

    #[test]
    fn test_invalid_pools_rejected() {
        assert!(LootPool::new(CountRange { min: 3, max: 1 }, vec![]).is_err());
        assert!(LootPool::new(CountRange::exactly(1), vec![]).is_err());
        let zero = LootEntry {
            item: ItemId(0),
            weight: 0,
            count: CountRange::default(),
        };
        assert!(LootPool::new(CountRange::exactly(1), vec![zero]).is_err());
        let inverted = LootEntry {
            item: ItemId(0),
            weight: 1,
            count: CountRange { min: 4, max: 2 },
        };
        assert!(LootPool::new(CountRange::exactly(1), vec![inverted]).is_err());
    }
}
