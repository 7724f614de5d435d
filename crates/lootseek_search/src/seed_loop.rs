//! # Seed Search Loop
//!
//! Drives enumeration, resolution and evaluation over a single seed.
//!
//! ```text
//! Start ─> Enumerate ─┬─> Resolve ─┬─> Evaluate (per container) ─┐
//!             ^       │            └─ not viable / unsupported ──┤
//!             └───────┴──────────────────────────────────────────┘
//!          exhausted ─> Score ─> Hit | NoHit
//! ```
//!
//! `check_seed` depends only on the seed, the config and the
//! collaborators. The world session is re-seeded at the start of every
//! call and the accumulators live on the stack, so nothing carries over
//! between seeds.

use lootseek_loot::{ContainerContents, ItemId};
use lootseek_shared::BlockPos;
use lootseek_world::{ContainerDescriptor, PortalVariant};

use crate::collab::{LootSession, WorldModel, WorldSession};
use crate::config::{AnchorMode, ScoreMode, SearchConfig};
use crate::enumerate::RegionWindow;
use crate::evaluate::{ContainerEvaluator, KeepContents, LootAccess};
use crate::resolve::{Resolution, Resolver};

/// One container holding the target item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerHit {
    /// Position of the structure the container belongs to.
    pub structure: BlockPos,
    /// Variant of that structure.
    pub variant: PortalVariant,
    /// The container itself.
    pub container: ContainerDescriptor,
    /// Target items in this container.
    pub matched_quantity: u32,
    /// Full contents, for reporting.
    pub contents: ContainerContents,
}

/// A seed that passed the threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedResult {
    /// The seed.
    pub seed: u64,
    /// Anchor the distances were measured from.
    pub anchor: BlockPos,
    /// Target items across all containers in range.
    pub total_matched: u64,
    /// Largest single-container quantity.
    pub best_container: u32,
    /// Structures resolved in range.
    pub structures_checked: u32,
    /// Containers evaluated.
    pub containers_checked: u32,
    /// The value compared against the threshold: `total_matched` or
    /// `best_container`, depending on the score mode.
    pub score: u64,
    /// Smallest container quantity that gets a machine line. 1 when
    /// scoring the total; the threshold when scoring single containers.
    pub machine_line_min: u32,
    /// Structure holding the best container (the first one on ties).
    pub best_structure: Option<BlockPos>,
    /// Recorded matching containers, in enumeration order.
    pub hits: Vec<ContainerHit>,
    /// Matching containers beyond the recording cap.
    pub unrecorded_hits: u32,
}

/// Per-seed pipeline counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedStats {
    /// Candidates within range.
    pub candidates: u64,
    /// Candidates failing the placement check.
    pub not_viable: u64,
    /// Candidates with no rules for their variant, or whose resolution
    /// panicked.
    pub unsupported: u64,
    /// Structures resolved.
    pub structures: u64,
    /// Containers evaluated.
    pub containers: u64,
    /// Containers skipped for an unknown table or a loot panic.
    pub skipped_containers: u64,
    /// Seeds abandoned after a collaborator panic outside any single
    /// candidate or container.
    pub failed_seeds: u64,
}

impl std::ops::AddAssign for SeedStats {
    fn add_assign(&mut self, rhs: Self) {
        self.candidates += rhs.candidates;
        self.not_viable += rhs.not_viable;
        self.unsupported += rhs.unsupported;
        self.structures += rhs.structures;
        self.containers += rhs.containers;
        self.skipped_containers += rhs.skipped_containers;
        self.failed_seeds += rhs.failed_seeds;
    }
}

/// What `check_seed` found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Pipeline counts for this seed.
    pub stats: SeedStats,
    /// `Some` on a hit.
    pub result: Option<SeedResult>,
}

/// One worker's search pipeline.
pub struct SeedSearch<'a, W: WorldModel, S> {
    world: &'a W,
    session: W::Session,
    evaluator: ContainerEvaluator<'a, S>,
    resolver: Resolver,
    config: &'a SearchConfig,
}

impl<'a, W: WorldModel, S: LootSession> SeedSearch<'a, W, S> {
    /// Builds a pipeline with its own world session.
    pub fn new(world: &'a W, loot: LootAccess<'a, S>, target: ItemId, config: &'a SearchConfig) -> Self {
        Self {
            world,
            session: world.open_session(),
            evaluator: ContainerEvaluator::new(loot, target, KeepContents::Matches),
            resolver: Resolver::new(config),
            config,
        }
    }

    /// Evaluates one seed.
    pub fn check_seed(&mut self, seed: u64) -> SeedOutcome {
        self.session.apply_seed(seed);
        let anchor = match self.config.anchor {
            AnchorMode::Origin => BlockPos::ORIGIN,
            AnchorMode::Spawn => self.session.estimate_spawn(),
        };

        let mut stats = SeedStats::default();
        let mut total: u64 = 0;
        let mut best: u32 = 0;
        let mut best_structure = None;
        let mut hits = Vec::new();
        let mut unrecorded = 0u32;

        let world = self.world;
        let window = RegionWindow::around(anchor, self.config.max_distance, world.region_size());

        for candidate in window.candidates(world, seed) {
            stats.candidates += 1;

            let structure = match self.resolver.resolve(&self.session, &candidate) {
                Resolution::Resolved(structure) => structure,
                Resolution::NotViable => {
                    stats.not_viable += 1;
                    continue;
                }
                Resolution::Unsupported => {
                    stats.unsupported += 1;
                    continue;
                }
            };
            stats.structures += 1;

            for container in structure.containers() {
                let Some(evaluation) = self.evaluator.evaluate(container) else {
                    stats.skipped_containers += 1;
                    continue;
                };
                stats.containers += 1;

                let matched = evaluation.matched_quantity;
                if matched == 0 {
                    continue;
                }
                total += u64::from(matched);
                if matched > best {
                    best = matched;
                    best_structure = Some(structure.position);
                }

                if hits.len() < self.config.max_recorded_hits {
                    hits.push(ContainerHit {
                        structure: structure.position,
                        variant: structure.variant,
                        container: *container,
                        matched_quantity: matched,
                        contents: evaluation.contents,
                    });
                } else {
                    unrecorded += 1;
                }
            }
        }

        let (score, machine_line_min) = match self.config.score_mode {
            ScoreMode::Total => (total, 1),
            ScoreMode::SingleContainer => (u64::from(best), self.config.min_match_threshold.max(1)),
        };

        let result = self.config.passes(score).then(|| SeedResult {
            seed,
            anchor,
            total_matched: total,
            best_container: best,
            structures_checked: stats.structures as u32,
            containers_checked: stats.containers as u32,
            score,
            machine_line_min,
            best_structure,
            hits,
            unrecorded_hits: unrecorded,
        });

        SeedOutcome { stats, result }
    }
}
