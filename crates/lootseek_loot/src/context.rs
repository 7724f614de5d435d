//! # Loot Contexts
//!
//! A `LootContext` is the mutable half of loot generation: it owns the
//! output buffer that every container is generated into. One context per
//! worker keeps generation lock-free; the ruleset itself is shared.

use std::sync::Arc;

use lootseek_shared::LootTableId;

use crate::item::ItemStack;
use crate::ruleset::LootRuleset;

/// Initial buffer capacity; the largest pool rolls 8 times.
const BUFFER_CAPACITY: usize = 16;

/// Per-worker loot generation state.
#[derive(Clone, Debug)]
pub struct LootContext {
    ruleset: Arc<LootRuleset>,
    buffer: Vec<ItemStack>,
    generated: u64,
}

impl LootContext {
    /// Creates a context over a shared ruleset.
    #[must_use]
    pub fn new(ruleset: Arc<LootRuleset>) -> Self {
        Self {
            ruleset,
            buffer: Vec::with_capacity(BUFFER_CAPACITY),
            generated: 0,
        }
    }

    /// The ruleset this context generates from.
    #[must_use]
    pub fn ruleset(&self) -> &LootRuleset {
        &self.ruleset
    }

    /// Generates the contents of one container.
    ///
    /// Returns `None` if `table` is not part of the ruleset. The returned
    /// slice is valid until the next call; the result never depends on
    /// earlier calls.
    pub fn generate(&mut self, table: LootTableId, container_seed: u64) -> Option<&[ItemStack]> {
        let table = self.ruleset.table(table)?;
        table.generate_into(container_seed, &mut self.buffer);
        self.generated += 1;
        Some(&self.buffer)
    }

    /// Containers generated by this context so far.
    #[must_use]
    pub const fn generated(&self) -> u64 {
        self.generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootseek_shared::RulesetVersion;

    fn context() -> LootContext {
        let ruleset = LootRuleset::for_version(RulesetVersion::V1_21).unwrap();
        LootContext::new(Arc::new(ruleset))
    }

    #[test]
    fn test_history_does_not_leak() {
        let mut warm = context();
        for seed in 0..50 {
            let _ = warm.generate(LootTableId::RUINED_PORTAL, seed);
        }
        let warm_result = warm.generate(LootTableId::RUINED_PORTAL, 777).unwrap().to_vec();

        let mut cold = context();
        let cold_result = cold.generate(LootTableId::RUINED_PORTAL, 777).unwrap().to_vec();

        assert_eq!(warm_result, cold_result);
        assert_eq!(warm.generated(), 51);
    }

    #[test]
    fn test_unknown_table() {
        let mut ctx = context();
        assert!(ctx.generate(LootTableId(99), 1).is_none());
        assert_eq!(ctx.generated(), 0);
    }

    #[test]
    fn test_ruined_portal_roll_count() {
        let mut ctx = context();
        for seed in 0..200 {
            let stacks = ctx.generate(LootTableId::RUINED_PORTAL, seed).unwrap();
            assert!((4..=8).contains(&stacks.len()));
        }
    }
}
