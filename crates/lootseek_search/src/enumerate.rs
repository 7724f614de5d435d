//! # Candidate Enumeration
//!
//! For one seed, walks every region that could hold a structure within
//! `max_distance` of the anchor and yields the candidate positions that
//! actually lie within range.
//!
//! ## Window
//!
//! ```text
//!   rx0 = floor((ax - R) / size) - 2      rx1 = floor((ax + R) / size) + 2
//!   rz0 = floor((az - R) / size) - 2      rz1 = floor((az + R) / size) + 2
//! ```
//!
//! The two extra regions on every side cover placements that land
//! outside the region their coordinates suggest. Division is floored so
//! negative anchors get the same margin as positive ones.
//!
//! Regions are visited row-major: `rz` outer, `rx` inner.

use lootseek_shared::{BlockPos, RegionCoord};

use crate::collab::WorldModel;

/// Extra regions added on every side of the window.
pub const SAFETY_MARGIN: i32 = 2;

/// A candidate position and the region it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// Candidate structure position.
    pub position: BlockPos,
    /// Region the position was placed from.
    pub region: RegionCoord,
}

/// Inclusive region bounds around an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionWindow {
    anchor: BlockPos,
    max_distance: u32,
    rx0: i32,
    rx1: i32,
    rz0: i32,
    rz1: i32,
}

impl RegionWindow {
    /// Window covering every region that may place a structure within
    /// `max_distance` blocks of `anchor`.
    #[must_use]
    pub fn around(anchor: BlockPos, max_distance: u32, region_size: i32) -> Self {
        let r = i64::from(max_distance);
        let size = i64::from(region_size.max(1));
        let lo = |c: i32| ((i64::from(c) - r).div_euclid(size) - i64::from(SAFETY_MARGIN)) as i32;
        let hi = |c: i32| ((i64::from(c) + r).div_euclid(size) + i64::from(SAFETY_MARGIN)) as i32;

        Self {
            anchor,
            max_distance,
            rx0: lo(anchor.x),
            rx1: hi(anchor.x),
            rz0: lo(anchor.z),
            rz1: hi(anchor.z),
        }
    }

    /// The anchor distances are measured from.
    #[must_use]
    pub const fn anchor(&self) -> BlockPos {
        self.anchor
    }

    /// Inclusive bounds `(rx0, rx1, rz0, rz1)`.
    #[must_use]
    pub const fn bounds(&self) -> (i32, i32, i32, i32) {
        (self.rx0, self.rx1, self.rz0, self.rz1)
    }

    /// Number of regions in the window.
    #[must_use]
    pub const fn region_count(&self) -> u64 {
        let w = (self.rx1 - self.rx0 + 1) as u64;
        let h = (self.rz1 - self.rz0 + 1) as u64;
        w * h
    }

    /// Regions in row-major order.
    #[must_use]
    pub const fn regions(&self) -> Regions {
        Regions {
            rx0: self.rx0,
            rx1: self.rx1,
            rz1: self.rz1,
            rx: self.rx0,
            rz: self.rz0,
        }
    }

    /// Candidates for `seed`, culled to `max_distance`.
    pub fn candidates<'w, W: WorldModel>(&self, world: &'w W, seed: u64) -> Candidates<'w, W> {
        let r = i64::from(self.max_distance);
        Candidates {
            world,
            seed,
            anchor: self.anchor,
            max_distance_sq: r * r,
            regions: self.regions(),
        }
    }
}

/// Row-major iterator over a window's regions.
#[derive(Clone, Debug)]
pub struct Regions {
    rx0: i32,
    rx1: i32,
    rz1: i32,
    rx: i32,
    rz: i32,
}

impl Iterator for Regions {
    type Item = RegionCoord;

    fn next(&mut self) -> Option<RegionCoord> {
        if self.rz > self.rz1 {
            return None;
        }
        let region = RegionCoord::new(self.rx, self.rz);
        if self.rx == self.rx1 {
            self.rx = self.rx0;
            self.rz += 1;
        } else {
            self.rx += 1;
        }
        Some(region)
    }
}

/// Lazy candidate sequence for one seed.
pub struct Candidates<'w, W> {
    world: &'w W,
    seed: u64,
    anchor: BlockPos,
    max_distance_sq: i64,
    regions: Regions,
}

impl<W: WorldModel> Iterator for Candidates<'_, W> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        for region in self.regions.by_ref() {
            let Some(position) = self.world.structure_position(self.seed, region) else {
                continue;
            };
            if position.distance_squared(self.anchor) > self.max_distance_sq {
                continue;
            }
            return Some(Candidate { position, region });
        }
        None
    }
}
