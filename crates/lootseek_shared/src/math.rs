//! Integer world coordinates.
//!
//! Everything here is exact integer math. Distances are compared squared,
//! never through a square root.

use serde::{Deserialize, Serialize};

/// Chunk width in blocks.
pub const CHUNK_WIDTH: i32 = 16;

/// A horizontal block position (world scale).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    /// X coordinate in blocks.
    pub x: i32,
    /// Z coordinate in blocks.
    pub z: i32,
}

impl BlockPos {
    /// The world origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new block position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Computed in `i64`; exact for any pair of `i32` coordinates whose
    /// per-axis difference stays within 2^31.
    #[inline]
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dz = self.z as i64 - other.z as i64;
        dx * dx + dz * dz
    }

    /// Returns true if `other` lies within `radius` blocks (inclusive).
    #[inline]
    #[must_use]
    pub const fn within(self, other: Self, radius: u32) -> bool {
        let r = radius as i64;
        self.distance_squared(other) <= r * r
    }

    /// Chunk X coordinate containing this block.
    #[inline]
    #[must_use]
    pub const fn chunk_x(self) -> i32 {
        self.x.div_euclid(CHUNK_WIDTH)
    }

    /// Chunk Z coordinate containing this block.
    #[inline]
    #[must_use]
    pub const fn chunk_z(self) -> i32 {
        self.z.div_euclid(CHUNK_WIDTH)
    }

    /// Offsets this position by `(dx, dz)`.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.z)
    }
}

/// One tile of a structure region grid.
///
/// A region is `region_size` blocks wide; the width is owned by the
/// structure placement rules, not by this type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionCoord {
    /// Region X index.
    pub x: i32,
    /// Region Z index.
    pub z: i32,
}

impl RegionCoord {
    /// Creates a new region coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Region containing block `pos` for a grid of `region_size` blocks.
    #[inline]
    #[must_use]
    pub const fn containing(pos: BlockPos, region_size: i32) -> Self {
        Self {
            x: pos.x.div_euclid(region_size),
            z: pos.z.div_euclid(region_size),
        }
    }
}

impl std::fmt::Display for RegionCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r[{},{}]", self.x, self.z)
    }
}
