//! # Simplex Noise
//!
//! Deterministic 2D noise used for the climate channels.
//!
//! Values are a pure function of the `WorldSeed`: the same seed gives
//! bit-identical samples on every platform. The permutation shuffle is driven by
//! `ChaCha8Rng`, never by a platform RNG.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The 64-bit world seed. Every noise channel of a world derives from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Wraps a raw seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// The raw value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Independent sub-seed for channel `purpose`.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0 ^ purpose.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

/// Gradient directions for 2D simplex noise.
const GRADIENTS: [(i8, i8); 12] = [
    (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1),
    (0, -1), (1, -1), (1, 0), (0, 1), (-1, 0), (0, -1),
];

/// Two-dimensional simplex noise.
///
/// Smooth, continuous values in `[-1, 1]`. Rebuilding one for a
/// new seed allocates nothing; the permutation table lives inline.
#[derive(Clone)]
pub struct SimplexNoise {
    /// Shuffled 0..256, stored twice so `i + 1` never wraps.
    perm: [u8; 512],
}

impl SimplexNoise {
    /// (sqrt(3) - 1) / 2
    const F2: f64 = 0.366_025_403_784_439;
    /// (3 - sqrt(3)) / 6
    const G2: f64 = 0.211_324_865_405_187;

    /// Noise for `seed`.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().take(256).enumerate() {
            *slot = i as u8;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed.value());
        for i in (1..256usize).rev() {
            let j = rng.gen_range(0..=i);
            perm.swap(i, j);
        }

        let (low, high) = perm.split_at_mut(256);
        high.copy_from_slice(low);

        Self { perm }
    }

    #[inline]
    fn hash(&self, index: usize) -> u8 {
        self.perm[index & 511]
    }

    /// Noise value at `(x, y)`, within `[-1, 1]`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * Self::F2;
        let (i, j) = (floor_i32(x + s), floor_i32(y + s));

        let unskew = f64::from(i + j) * Self::G2;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + Self::G2;
        let y1 = y0 - f64::from(j1) + Self::G2;
        let (x2, y2) = (x0 + Self::G2 * 2.0 - 1.0, y0 + Self::G2 * 2.0 - 1.0);

        let (ci, cj) = ((i & 255) as usize, (j & 255) as usize);

        let g0 = self.hash(ci + self.hash(cj) as usize);
        let g1 = self.hash(ci + i1 as usize + self.hash(cj + j1 as usize) as usize);
        let g2 = self.hash(ci + 1 + self.hash(cj + 1) as usize);

        70.0 * (corner(x0, y0, g0) + corner(x1, y1, g1) + corner(x2, y2, g2))
    }

    /// Fractal noise: `octaves` layers, each at `lacunarity` times the
    /// frequency and `persistence` times the amplitude of the previous one.
    ///
    /// Normalized back to roughly `[-1, 1]`.
    #[must_use]
    pub fn octaved(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut norm = 0.0;

        for _ in 0..octaves {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            norm += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        if norm > 0.0 { total / norm } else { 0.0 }
    }
}

/// Contribution of one simplex corner.
#[inline]
fn corner(x: f64, y: f64, hash: u8) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let (gx, gy) = GRADIENTS[usize::from(hash % 12)];
    let t2 = t * t;
    t2 * t2 * (x * f64::from(gx) + y * f64::from(gy))
}

#[inline]
fn floor_i32(v: f64) -> i32 {
    let t = v as i32;
    if v < f64::from(t) { t - 1 } else { t }
}
