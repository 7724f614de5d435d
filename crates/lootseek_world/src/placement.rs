//! # Structure Placement
//!
//! Structures are placed on a region grid. Each region of
//! `region_chunks x region_chunks` chunks holds at most one candidate
//! position per seed, chosen by an RNG keyed on `(seed, salt, region)`.
//!
//! ## Layout
//!
//! ```text
//!  region (40 x 40 chunks)
//!  ┌────────────────────────────┐
//!  │ placement range (25 x 25)  │
//!  │ ┌──────────────┐           │
//!  │ │      X       │           │  X = candidate chunk centre
//!  │ └──────────────┘           │
//!  └────────────────────────────┘
//! ```
//!
//! A candidate is not yet a structure: viability and variant resolution
//! decide whether anything is built there.

use lootseek_shared::{BlockPos, RegionCoord, RulesetVersion, CHUNK_WIDTH};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Region-grid placement parameters for one structure kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructureConfig {
    /// Per-structure salt mixed into the region RNG.
    pub salt: u64,
    /// Region width in chunks.
    pub region_chunks: i32,
    /// Chunks from the region corner in which the candidate may land.
    pub chunk_range: i32,
    /// Chance in 1/1000 that a region holds a candidate at all.
    pub frequency_permille: u32,
}

impl StructureConfig {
    /// Ruined portal placement. `None` before 1.16.
    #[must_use]
    pub const fn ruined_portal(version: RulesetVersion) -> Option<Self> {
        if version.minor() < 16 {
            return None;
        }
        Some(Self {
            salt: 34_222_645,
            region_chunks: 40,
            chunk_range: 25,
            frequency_permille: 850,
        })
    }

    /// Region width in blocks.
    #[inline]
    #[must_use]
    pub const fn region_blocks(&self) -> i32 {
        self.region_chunks * CHUNK_WIDTH
    }

    /// Candidate position for `region`, or `None` if the region is empty
    /// for this seed.
    ///
    /// Pure function of `(self, seed, region)`. The returned position is
    /// the centre of the chosen chunk and always lies inside the region.
    #[must_use]
    pub fn position(&self, seed: u64, region: RegionCoord) -> Option<BlockPos> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.region_seed(seed, region));

        if rng.gen_range(0..1000) >= self.frequency_permille {
            return None;
        }

        let chunk_x = region.x * self.region_chunks + rng.gen_range(0..self.chunk_range);
        let chunk_z = region.z * self.region_chunks + rng.gen_range(0..self.chunk_range);

        let half = CHUNK_WIDTH / 2;
        Some(BlockPos::new(chunk_x * CHUNK_WIDTH + half, chunk_z * CHUNK_WIDTH + half))
    }

    /// Mixes seed, salt and region index into one RNG seed.
    #[inline]
    const fn region_seed(&self, seed: u64, region: RegionCoord) -> u64 {
        (region.x as i64)
            .wrapping_mul(341_873_128_712)
            .wrapping_add((region.z as i64).wrapping_mul(132_897_987_541)) as u64
            ^ seed.wrapping_add(self.salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StructureConfig {
        StructureConfig::ruined_portal(RulesetVersion::V1_21).unwrap()
    }

    #[test]
    fn test_unavailable_before_1_16() {
        assert!(StructureConfig::ruined_portal(RulesetVersion::V1_15).is_none());
        assert!(StructureConfig::ruined_portal(RulesetVersion::V1_14).is_none());
        assert!(StructureConfig::ruined_portal(RulesetVersion::V1_16).is_some());
    }

    #[test]
    fn test_position_is_deterministic() {
        let cfg = config();
        for rx in -5..5 {
            for rz in -5..5 {
                let region = RegionCoord::new(rx, rz);
                assert_eq!(cfg.position(99, region), cfg.position(99, region));
            }
        }
    }

    #[test]
    fn test_position_stays_inside_its_region() {
        let cfg = config();
        let size = cfg.region_blocks();
        for seed in 0..20u64 {
            for rx in -3..3 {
                for rz in -3..3 {
                    let region = RegionCoord::new(rx, rz);
                    if let Some(pos) = cfg.position(seed, region) {
                        assert_eq!(RegionCoord::containing(pos, size), region);
                        let local_x = pos.x - rx * size;
                        assert!(local_x < cfg.chunk_range * CHUNK_WIDTH);
                    }
                }
            }
        }
    }

    #[test]
    fn test_some_regions_are_empty() {
        let cfg = config();
        let empty = (0..2000)
            .filter(|&i| cfg.position(7, RegionCoord::new(i, -i)).is_none())
            .count();
        // 15% nominal
        assert!(empty > 150 && empty < 450, "empty regions: {empty}/2000");
    }

    #[test]
    fn test_seed_changes_placement() {
        let cfg = config();
        let region = RegionCoord::new(1, 2);
        let distinct: std::collections::HashSet<_> =
            (0..50u64).filter_map(|s| cfg.position(s, region)).collect();
        assert!(distinct.len() > 10);
    }
}
