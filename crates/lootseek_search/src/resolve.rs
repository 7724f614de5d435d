//! Viability and variant resolution for one candidate.

use lootseek_world::StructureInstance;
use tracing::{debug, warn};

use crate::collab::WorldSession;
use crate::config::SearchConfig;
use crate::enumerate::Candidate;
use crate::guard::contained;

/// What became of a candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A real structure with its containers.
    Resolved(StructureInstance),
    /// Failed the placement check.
    NotViable,
    /// No generation rules for this variant; skip the candidate.
    Unsupported,
}

/// Adapter over [`WorldSession`] that applies the viability policy.
#[derive(Clone, Copy, Debug)]
pub struct Resolver {
    fast_mode: bool,
}

impl Resolver {
    /// Resolver for `config`.
    #[must_use]
    pub const fn new(config: &SearchConfig) -> Self {
        Self {
            fast_mode: config.fast_mode,
        }
    }

    /// Resolves `candidate` against the session's current seed.
    ///
    /// Under fast mode the viability check is skipped entirely. A
    /// collaborator panic while resolving counts as [`Resolution::Unsupported`].
    pub fn resolve<S: WorldSession>(&self, session: &S, candidate: &Candidate) -> Resolution {
        let fast_mode = self.fast_mode;
        let resolved = contained(|| {
            if !fast_mode && !session.is_viable(candidate.position) {
                return Resolution::NotViable;
            }

            let context = session.sample_local_context(candidate.position);
            match session.resolve_structure(candidate.position, context) {
                Some(structure) => Resolution::Resolved(structure),
                None => {
                    debug!(
                        position = %candidate.position,
                        region = %candidate.region,
                        ?context,
                        "no generation rules for variant, skipping candidate"
                    );
                    Resolution::Unsupported
                }
            }
        });

        resolved.unwrap_or_else(|panic| {
            warn!(
                position = %candidate.position,
                region = %candidate.region,
                %panic,
                "world collaborator panicked, skipping candidate"
            );
            Resolution::Unsupported
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootseek_shared::{BlockPos, RegionCoord};

    /// Viable only at even x; panics instead of resolving at x = 13.
    struct Brittle;

    impl WorldSession for Brittle {
        type LocalContext = i32;
        fn apply_seed(&mut self, _: u64) {}
        fn estimate_spawn(&self) -> BlockPos {
            BlockPos::ORIGIN
        }
        fn is_viable(&self, pos: BlockPos) -> bool {
            pos.x % 2 == 0 || pos.x == 13
        }
        fn sample_local_context(&self, pos: BlockPos) -> i32 {
            pos.x
        }
        fn resolve_structure(&self, _: BlockPos, x: i32) -> Option<StructureInstance> {
            assert_ne!(x, 13, "corrupt template");
            None
        }
    }

    fn candidate(x: i32) -> Candidate {
        Candidate {
            position: BlockPos::new(x, 0),
            region: RegionCoord::new(0, 0),
        }
    }

    #[test]
    fn test_viability_gate_and_fast_mode() {
        let strict = Resolver::new(&SearchConfig::default());
        let fast = Resolver::new(&SearchConfig {
            fast_mode: true,
            ..SearchConfig::default()
        });

        assert_eq!(strict.resolve(&Brittle, &candidate(3)), Resolution::NotViable);
        assert_eq!(fast.resolve(&Brittle, &candidate(3)), Resolution::Unsupported);
        assert_eq!(strict.resolve(&Brittle, &candidate(4)), Resolution::Unsupported);
    }

    #[test]
    fn test_collaborator_panic_is_unsupported() {
        let resolver = Resolver::new(&SearchConfig::default());
        assert_eq!(resolver.resolve(&Brittle, &candidate(13)), Resolution::Unsupported);
        // the resolver is still usable afterwards
        assert_eq!(resolver.resolve(&Brittle, &candidate(5)), Resolution::NotViable);
    }
}
