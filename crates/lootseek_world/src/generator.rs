//! # World Generator
//!
//! The two halves of the world model:
//!
//! - [`PortalWorld`]: immutable, shared by every worker. Owns the ruleset
//!   version and placement rules; answers "where could a portal be".
//! - [`WorldGenerator`]: one per worker. Holds the per-seed noise state
//!   and answers everything that depends on the terrain.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let world = PortalWorld::new(RulesetVersion::V1_21)?;
//! let mut generator = world.generator();
//!
//! generator.apply_seed(seed);
//! if let Some(pos) = world.structure_position(seed, region) {
//!     let biome = generator.biome_at(pos);
//!     let portal = generator.resolve(pos, biome);
//! }
//! ```

use lootseek_shared::{BlockPos, RegionCoord, RulesetVersion};

use crate::biome::{Biome, BiomeClassifier};
use crate::error::{WorldError, WorldResult};
use crate::noise::WorldSeed;
use crate::placement::StructureConfig;
use crate::portal::PortalRules;
use crate::structure::StructureInstance;

/// Spawn search step in blocks.
const SPAWN_STEP: i32 = 16;
/// Spawn search gives up beyond this many blocks from the origin.
const SPAWN_RADIUS: i32 = 256;
/// Elevation difference over [`SLOPE_PROBE`] blocks above which the
/// surface is too steep for a portal.
const MAX_SLOPE: f64 = 0.08;
const SLOPE_PROBE: i32 = 8;

/// Shared, read-only half of the world model.
#[derive(Clone, Copy, Debug)]
pub struct PortalWorld {
    version: RulesetVersion,
    config: StructureConfig,
}

impl PortalWorld {
    /// Builds the world model for `version`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnsupportedStructure`] if the ruleset has no
    /// ruined portal placement rules.
    pub fn new(version: RulesetVersion) -> WorldResult<Self> {
        let config = StructureConfig::ruined_portal(version).ok_or(
            WorldError::UnsupportedStructure {
                structure: "ruined_portal",
                version,
            },
        )?;
        Ok(Self { version, config })
    }

    /// Ruleset version this model generates.
    #[must_use]
    pub const fn version(&self) -> RulesetVersion {
        self.version
    }

    /// Placement parameters.
    #[must_use]
    pub const fn config(&self) -> &StructureConfig {
        &self.config
    }

    /// Region tile width in blocks.
    #[must_use]
    pub const fn region_size(&self) -> i32 {
        self.config.region_blocks()
    }

    /// Candidate position in `region` for `seed`.
    #[must_use]
    pub fn structure_position(&self, seed: u64, region: RegionCoord) -> Option<BlockPos> {
        self.config.position(seed, region)
    }

    /// Opens a fresh per-worker generator.
    #[must_use]
    pub fn generator(&self) -> WorldGenerator {
        WorldGenerator::new(self.version, self.config.salt)
    }
}

/// Per-worker terrain state for the current seed.
///
/// Not shared between threads. Call [`apply_seed`](Self::apply_seed)
/// before every query; the generator carries nothing else over between
/// seeds.
#[derive(Clone)]
pub struct WorldGenerator {
    seed: u64,
    classifier: BiomeClassifier,
    rules: PortalRules,
}

impl WorldGenerator {
    /// Creates a generator primed with seed 0.
    #[must_use]
    pub fn new(version: RulesetVersion, salt: u64) -> Self {
        Self {
            seed: 0,
            classifier: BiomeClassifier::new(WorldSeed::new(0)),
            rules: PortalRules::new(version, salt),
        }
    }

    /// Seed currently applied.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Rebuilds the noise state for `seed`.
    pub fn apply_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.classifier = BiomeClassifier::new(WorldSeed::new(seed));
    }

    /// Approximate spawn point.
    ///
    /// Walks square rings outward from the origin and returns the first
    /// spawnable column. Falls back to the origin.
    #[must_use]
    pub fn estimate_spawn(&self) -> BlockPos {
        if self.classifier.biome_at(BlockPos::ORIGIN).is_spawnable() {
            return BlockPos::ORIGIN;
        }

        let mut ring = SPAWN_STEP;
        while ring <= SPAWN_RADIUS {
            let mut offset = -ring;
            while offset <= ring {
                for pos in [
                    BlockPos::new(offset, -ring),
                    BlockPos::new(ring, offset),
                    BlockPos::new(-offset, ring),
                    BlockPos::new(-ring, -offset),
                ] {
                    if self.classifier.biome_at(pos).is_spawnable() {
                        return pos;
                    }
                }
                offset += SPAWN_STEP;
            }
            ring += SPAWN_STEP;
        }

        BlockPos::ORIGIN
    }

    /// Biome at `pos`.
    #[must_use]
    pub fn biome_at(&self, pos: BlockPos) -> Biome {
        self.classifier.biome_at(pos)
    }

    /// Returns true if a portal could generate at `pos`: the biome allows
    /// one and the surface is not too steep.
    #[must_use]
    pub fn is_viable(&self, pos: BlockPos) -> bool {
        self.biome_at(pos).allows_ruined_portal()
            && self.classifier.slope_at(pos, SLOPE_PROBE) <= MAX_SLOPE
    }

    /// Resolves the portal at `pos`, or `None` if its kind is not
    /// generated by this ruleset.
    #[must_use]
    pub fn resolve(&self, pos: BlockPos, biome: Biome) -> Option<StructureInstance> {
        self.rules.resolve(self.seed, pos, biome)
    }
}
