//! # Biomes
//!
//! The local context a portal variant is resolved from.
//!
//! Three noise channels feed a small climate model: elevation picks the
//! terrain band (ocean, shore, land, peaks), then temperature and
//! humidity bands pick the land biome. Temperature drops with height.
//!
//! Sampling is quarter resolution: all 16 blocks of a 4x4 column share
//! the sample at `(x >> 2, z >> 2)`.

use lootseek_shared::BlockPos;

use crate::noise::{SimplexNoise, WorldSeed};

/// Biome at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Biome {
    /// Elevation below -0.5.
    DeepOcean = 0,
    /// Elevation in `[-0.5, -0.2)`.
    Ocean = 1,
    /// Thin shoreline band above the ocean.
    Beach = 2,
    /// Temperate default.
    Plains = 3,
    /// Temperate and damp.
    Forest = 4,
    /// Warm and wet.
    Jungle = 5,
    /// Warm and dry.
    Desert = 6,
    /// Frozen flats.
    Tundra = 7,
    /// Cold and damp.
    Taiga = 8,
    /// Elevation above 0.7.
    Mountains = 9,
    /// Elevation above 0.7, cold.
    SnowyPeaks = 10,
    /// Temperate, wet and low.
    Swamp = 11,
    /// Warm, somewhat dry.
    Savanna = 12,
    /// Hot, neither dry nor wet.
    Badlands = 13,
}

impl Biome {
    /// Returns true for water biomes.
    #[must_use]
    pub const fn is_ocean(self) -> bool {
        matches!(self, Self::DeepOcean | Self::Ocean)
    }

    /// Returns true where a player spawn may be placed.
    #[must_use]
    pub const fn is_spawnable(self) -> bool {
        matches!(
            self,
            Self::Plains | Self::Forest | Self::Jungle | Self::Taiga | Self::Savanna | Self::Swamp
        )
    }

    /// Returns whether ruined portals may be placed in this biome.
    #[must_use]
    pub const fn allows_ruined_portal(self) -> bool {
        !matches!(self, Self::SnowyPeaks | Self::Beach)
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DeepOcean => "deep_ocean",
            Self::Ocean => "ocean",
            Self::Beach => "beach",
            Self::Plains => "plains",
            Self::Forest => "forest",
            Self::Jungle => "jungle",
            Self::Desert => "desert",
            Self::Tundra => "tundra",
            Self::Taiga => "taiga",
            Self::Mountains => "mountains",
            Self::SnowyPeaks => "snowy_peaks",
            Self::Swamp => "swamp",
            Self::Savanna => "savanna",
            Self::Badlands => "badlands",
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Climate noise for one world seed.
///
/// Rebuilding it for a new seed is cheap and allocation-free, so each
/// worker keeps its own.
#[derive(Clone)]
pub struct BiomeClassifier {
    elevation: SimplexNoise,
    temperature: SimplexNoise,
    humidity: SimplexNoise,
}

impl BiomeClassifier {
    // Block-to-noise scales. Smaller means broader features.
    const ELEVATION_FREQ: f64 = 1.0 / 400.0;
    const TEMPERATURE_FREQ: f64 = 1.0 / 500.0;
    const HUMIDITY_FREQ: f64 = 1.0 / 333.0;
    const LAPSE_RATE: f64 = 0.5;

    /// Classifier for `seed`; each channel gets its own derived seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            elevation: SimplexNoise::new(seed.derive(3)),
            temperature: SimplexNoise::new(seed.derive(1)),
            humidity: SimplexNoise::new(seed.derive(2)),
        }
    }

    /// Biome at a block position, sampled at quarter resolution.
    #[must_use]
    pub fn biome_at(&self, pos: BlockPos) -> Biome {
        let qx = f64::from(pos.x >> 2) * 4.0;
        let qz = f64::from(pos.z >> 2) * 4.0;
        self.classify(qx, qz)
    }

    /// Biome at unquantized world coordinates.
    #[must_use]
    pub fn classify(&self, x: f64, z: f64) -> Biome {
        self.climate(x, z).biome()
    }

    /// Raw climate sample at world coordinates.
    #[must_use]
    pub fn climate(&self, x: f64, z: f64) -> Climate {
        let elevation = self.elevation(x, z);
        let base = self
            .temperature
            .sample(x * Self::TEMPERATURE_FREQ, z * Self::TEMPERATURE_FREQ);
        Climate {
            elevation,
            temperature: (base - elevation.max(0.0) * Self::LAPSE_RATE).clamp(-1.0, 1.0),
            humidity: self
                .humidity
                .octaved(x * Self::HUMIDITY_FREQ, z * Self::HUMIDITY_FREQ, 3, 0.5, 2.0),
        }
    }

    /// Elevation in roughly `[-1, 1]`. Below -0.2 is water, above 0.7 is
    /// mountain.
    #[must_use]
    pub fn elevation(&self, x: f64, z: f64) -> f64 {
        self.elevation
            .octaved(x * Self::ELEVATION_FREQ, z * Self::ELEVATION_FREQ, 4, 0.5, 2.0)
    }

    /// Largest elevation difference between `pos` and the four points
    /// `radius` blocks away along each axis.
    #[must_use]
    pub fn slope_at(&self, pos: BlockPos, radius: i32) -> f64 {
        let center = self.elevation(f64::from(pos.x), f64::from(pos.z));
        [(radius, 0), (-radius, 0), (0, radius), (0, -radius)]
            .into_iter()
            .map(|(dx, dz)| {
                let p = pos.offset(dx, dz);
                (self.elevation(f64::from(p.x), f64::from(p.z)) - center).abs()
            })
            .fold(0.0, f64::max)
    }
}

/// One climate sample, each channel in roughly `[-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Climate {
    /// Terrain height.
    pub elevation: f64,
    /// Temperature after height cooling.
    pub temperature: f64,
    /// Humidity.
    pub humidity: f64,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Heat {
    Frozen,
    Cold,
    Temperate,
    Warm,
    Hot,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Moisture {
    Arid,
    Dry,
    Moderate,
    Damp,
    Wet,
}

impl Climate {
    /// Biome for this sample.
    #[must_use]
    pub fn biome(self) -> Biome {
        match self.elevation {
            e if e < -0.5 => return Biome::DeepOcean,
            e if e < -0.2 => return Biome::Ocean,
            e if e < -0.15 => return Biome::Beach,
            e if e > 0.7 && self.temperature < -0.2 => return Biome::SnowyPeaks,
            e if e > 0.7 => return Biome::Mountains,
            _ => {}
        }

        match (self.heat(), self.moisture()) {
            (Heat::Frozen, _) => Biome::Tundra,
            (Heat::Cold, Moisture::Damp | Moisture::Wet) => Biome::Taiga,
            (Heat::Cold, _) => Biome::Tundra,
            (Heat::Warm | Heat::Hot, Moisture::Arid) => Biome::Desert,
            (Heat::Warm | Heat::Hot, Moisture::Wet) => Biome::Jungle,
            (Heat::Hot, _) => Biome::Badlands,
            (Heat::Warm, Moisture::Dry) => Biome::Savanna,
            (_, Moisture::Wet) if self.elevation < 0.1 => Biome::Swamp,
            (_, Moisture::Damp | Moisture::Wet) => Biome::Forest,
            _ => Biome::Plains,
        }
    }

    fn heat(self) -> Heat {
        match self.temperature {
            t if t < -0.5 => Heat::Frozen,
            t if t < -0.2 => Heat::Cold,
            t if t > 0.6 => Heat::Hot,
            t if t > 0.3 => Heat::Warm,
            _ => Heat::Temperate,
        }
    }

    fn moisture(self) -> Moisture {
        match self.humidity {
            h if h < -0.3 => Moisture::Arid,
            h if h < 0.0 => Moisture::Dry,
            h if h > 0.45 => Moisture::Wet,
            h if h > 0.2 => Moisture::Damp,
            _ => Moisture::Moderate,
        }
    }
}
