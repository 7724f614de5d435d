//! # Container Evaluation
//!
//! Generates a container's contents and reduces them to the number of
//! target items.
//!
//! The loot session is reached through [`LootAccess`]:
//!
//! - `Owned`: the worker's own session, no locking.
//! - `Shared`: one session for the whole run behind the generation lock.
//!   The lock is held for generation and counting only, never while
//!   writing output.

use lootseek_loot::{ContainerContents, ItemId, ItemStack};
use lootseek_world::ContainerDescriptor;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::collab::LootSession;
use crate::guard::contained;

/// How an evaluator reaches its loot session.
pub enum LootAccess<'a, S> {
    /// Per-worker session.
    Owned(S),
    /// Run-wide session behind the generation lock.
    Shared(&'a Mutex<S>),
}

/// Which contents an evaluation keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeepContents {
    /// Only for containers holding the target (search).
    Matches,
    /// For every container (inspection).
    All,
}

/// Result of evaluating one container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// Sum of counts of target stacks.
    pub matched_quantity: u32,
    /// Generated stacks, or empty when not kept.
    pub contents: ContainerContents,
}

/// Reduces contents to the target count.
#[inline]
#[must_use]
pub fn matched_quantity(stacks: &[ItemStack], target: ItemId) -> u32 {
    stacks
        .iter()
        .filter(|stack| stack.item == target)
        .map(|stack| stack.count)
        .sum()
}

fn score(stacks: &[ItemStack], target: ItemId, keep: KeepContents) -> Evaluation {
    let matched = matched_quantity(stacks, target);
    let contents = if keep == KeepContents::All || matched > 0 {
        stacks.to_vec()
    } else {
        Vec::new()
    };
    Evaluation {
        matched_quantity: matched,
        contents,
    }
}

/// Per-worker container evaluator.
pub struct ContainerEvaluator<'a, S> {
    access: LootAccess<'a, S>,
    target: ItemId,
    keep: KeepContents,
}

impl<'a, S: LootSession> ContainerEvaluator<'a, S> {
    /// Evaluator counting `target`.
    pub fn new(access: LootAccess<'a, S>, target: ItemId, keep: KeepContents) -> Self {
        Self {
            access,
            target,
            keep,
        }
    }

    /// Item being counted.
    #[must_use]
    pub const fn target(&self) -> ItemId {
        self.target
    }

    /// Evaluates one container. `None` if its table is unknown to the
    /// loot collaborator or the collaborator panicked; the container is
    /// skipped.
    pub fn evaluate(&mut self, container: &ContainerDescriptor) -> Option<Evaluation> {
        let (target, keep) = (self.target, self.keep);
        let access = &mut self.access;
        let generated = contained(|| match access {
            LootAccess::Owned(session) => session
                .generate_contents(container.table, container.container_seed)
                .map(|stacks| score(stacks, target, keep)),
            LootAccess::Shared(lock) => {
                // released on unwind; parking_lot locks do not poison
                let mut session = lock.lock();
                session
                    .generate_contents(container.table, container.container_seed)
                    .map(|stacks| score(stacks, target, keep))
            }
        });

        let evaluation = match generated {
            Ok(evaluation) => evaluation,
            Err(panic) => {
                warn!(
                    table = %container.table,
                    position = %container.position,
                    container_seed = container.container_seed,
                    %panic,
                    "loot collaborator panicked, skipping container"
                );
                return None;
            }
        };

        if evaluation.is_none() {
            debug!(
                table = %container.table,
                position = %container.position,
                "unknown loot table, skipping container"
            );
        }
        evaluation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootseek_shared::{BlockPos, LootTableId};

    /// Emits `seed % 4` target items plus one filler stack.
    struct ModSession {
        buffer: Vec<ItemStack>,
    }

    impl LootSession for ModSession {
        fn generate_contents(&mut self, table: LootTableId, seed: u64) -> Option<&[ItemStack]> {
            if table != LootTableId::RUINED_PORTAL {
                return None;
            }
            self.buffer.clear();
            self.buffer.push(ItemStack { item: ItemId(0), count: 3 });
            if seed % 4 > 0 {
                self.buffer.push(ItemStack { item: ItemId(1), count: (seed % 4) as u32 });
            }
            Some(&self.buffer)
        }
    }

    fn container(seed: u64, table: LootTableId) -> ContainerDescriptor {
        ContainerDescriptor {
            position: BlockPos::new(1, 2),
            container_seed: seed,
            table,
        }
    }

    #[test]
    fn test_matched_quantity_sums_target_stacks() {
        let stacks = [
            ItemStack { item: ItemId(7), count: 1 },
            ItemStack { item: ItemId(2), count: 9 },
            ItemStack { item: ItemId(7), count: 2 },
        ];
        assert_eq!(matched_quantity(&stacks, ItemId(7)), 3);
        assert_eq!(matched_quantity(&stacks, ItemId(5)), 0);
        assert_eq!(matched_quantity(&[], ItemId(7)), 0);
    }

    #[test]
    fn test_contents_kept_only_for_matches() {
        let session = ModSession { buffer: Vec::new() };
        let mut evaluator =
            ContainerEvaluator::new(LootAccess::Owned(session), ItemId(1), KeepContents::Matches);

        let miss = evaluator.evaluate(&container(4, LootTableId::RUINED_PORTAL)).unwrap();
        assert_eq!(miss.matched_quantity, 0);
        assert!(miss.contents.is_empty());

        let hit = evaluator.evaluate(&container(6, LootTableId::RUINED_PORTAL)).unwrap();
        assert_eq!(hit.matched_quantity, 2);
        assert_eq!(hit.contents.len(), 2);
    }

    #[test]
    fn test_unknown_table_is_skipped() {
        let session = ModSession { buffer: Vec::new() };
        let mut evaluator =
            ContainerEvaluator::new(LootAccess::Owned(session), ItemId(1), KeepContents::All);
        assert!(evaluator.evaluate(&container(1, LootTableId(77))).is_none());
    }

    #[test]
    fn test_shared_access_matches_owned() {
        let lock = Mutex::new(ModSession { buffer: Vec::new() });
        let mut shared =
            ContainerEvaluator::new(LootAccess::Shared(&lock), ItemId(1), KeepContents::All);
        let mut owned = ContainerEvaluator::new(
            LootAccess::Owned(ModSession { buffer: Vec::new() }),
            ItemId(1),
            KeepContents::All,
        );

        for seed in 0..20 {
            let c = container(seed, LootTableId::RUINED_PORTAL);
            assert_eq!(shared.evaluate(&c), owned.evaluate(&c));
        }
    }

    #[test]
    fn test_panicking_session_skips_container() {
        struct Flaky(ModSession);

        impl LootSession for Flaky {
            fn generate_contents(&mut self, table: LootTableId, seed: u64) -> Option<&[ItemStack]> {
                assert_ne!(seed, 5, "torn loot table");
                self.0.generate_contents(table, seed)
            }
        }

        let lock = Mutex::new(Flaky(ModSession { buffer: Vec::new() }));
        let mut evaluator =
            ContainerEvaluator::new(LootAccess::Shared(&lock), ItemId(1), KeepContents::All);

        assert!(evaluator.evaluate(&container(5, LootTableId::RUINED_PORTAL)).is_none());
        // the shared lock was released by the unwind
        assert!(!lock.is_locked());
        let next = evaluator.evaluate(&container(6, LootTableId::RUINED_PORTAL)).unwrap();
        assert_eq!(next.matched_quantity, 2);
    }
}
