//! # Ruined Portals
//!
//! Variant and piece resolution for ruined portals.
//!
//! The variant depends on the local biome (kind), plus a per-chunk RNG
//! roll for rotation, mirroring, template and the giant flag. Every
//! resolved portal is one template piece holding one chest.
//!
//! Not every kind has generation rules in every ruleset: mountain
//! portals only exist from 1.18 on. Resolving an unsupported kind yields
//! `None`; the caller skips the candidate.

use std::hash::Hasher;

use lootseek_shared::{BlockPos, LootTableId, RulesetVersion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use siphasher::sip::SipHasher13;

use crate::biome::Biome;
use crate::structure::{ContainerDescriptor, StructureInstance, StructurePiece};

/// Portal kind, chosen from the biome at the portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortalKind {
    /// Everything not covered below.
    Standard,
    /// Desert (partially buried).
    Desert,
    /// Jungle (overgrown).
    Jungle,
    /// Swamp (half sunk).
    Swamp,
    /// Mountains (in the cliffside).
    Mountain,
    /// Ocean floor.
    Ocean,
}

impl PortalKind {
    /// Kind for a biome.
    #[must_use]
    pub const fn from_biome(biome: Biome) -> Self {
        match biome {
            Biome::Desert => Self::Desert,
            Biome::Jungle => Self::Jungle,
            Biome::Swamp => Self::Swamp,
            Biome::Mountains | Biome::SnowyPeaks | Biome::Badlands => Self::Mountain,
            Biome::Ocean | Biome::DeepOcean => Self::Ocean,
            _ => Self::Standard,
        }
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Desert => "desert",
            Self::Jungle => "jungle",
            Self::Swamp => "swamp",
            Self::Mountain => "mountain",
            Self::Ocean => "ocean",
        }
    }

    /// Chance in 1/100 of a giant portal.
    const fn giant_chance(self) -> u32 {
        match self {
            Self::Desert | Self::Jungle => 0,
            _ => 5,
        }
    }

    /// Chance in 1/100 of an air pocket.
    const fn air_pocket_chance(self) -> u32 {
        match self {
            Self::Standard => 50,
            Self::Mountain | Self::Desert => 0,
            Self::Jungle | Self::Swamp | Self::Ocean => 100,
        }
    }
}

/// Quarter-turn rotation of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Unrotated.
    None,
    /// 90 degrees clockwise.
    Clockwise90,
    /// 180 degrees.
    Clockwise180,
    /// 90 degrees counter-clockwise.
    CounterClockwise90,
}

impl Rotation {
    const ALL: [Self; 4] = [
        Self::None,
        Self::Clockwise90,
        Self::Clockwise180,
        Self::CounterClockwise90,
    ];

    /// Rotates a template-local offset.
    #[must_use]
    pub const fn apply(self, dx: i32, dz: i32) -> (i32, i32) {
        match self {
            Self::None => (dx, dz),
            Self::Clockwise90 => (-dz, dx),
            Self::Clockwise180 => (-dx, -dz),
            Self::CounterClockwise90 => (dz, -dx),
        }
    }
}

/// A resolved portal variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortalVariant {
    /// Biome-derived kind.
    pub kind: PortalKind,
    /// Template rotation.
    pub rotation: Rotation,
    /// Mirrored along the X axis.
    pub mirror: bool,
    /// Giant template set.
    pub giant: bool,
    /// Surrounded by air instead of buried.
    pub air_pocket: bool,
    /// Template index within its set (1-based, like the template names).
    pub template: u8,
}

impl PortalVariant {
    /// Template name.
    #[must_use]
    pub const fn template_name(&self) -> &'static str {
        if self.giant {
            GIANT_TEMPLATES[(self.template - 1) as usize].0
        } else {
            TEMPLATES[(self.template - 1) as usize].0
        }
    }

    fn chest_offset(&self) -> (i32, i32) {
        let (_, dx, dz) = if self.giant {
            GIANT_TEMPLATES[(self.template - 1) as usize]
        } else {
            TEMPLATES[(self.template - 1) as usize]
        };
        let dx = if self.mirror { -dx } else { dx };
        self.rotation.apply(dx, dz)
    }
}

impl std::fmt::Display for PortalVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.name(), self.template_name())?;
        if self.mirror {
            f.write_str(" mirrored")?;
        }
        if self.air_pocket {
            f.write_str(" air-pocket")?;
        }
        Ok(())
    }
}

/// Template name plus chest offset from the portal origin.
const TEMPLATES: [(&str, i32, i32); 10] = [
    ("portal_1", 2, 3),
    ("portal_2", 1, 4),
    ("portal_3", 4, 2),
    ("portal_4", 3, 5),
    ("portal_5", 5, 1),
    ("portal_6", 2, 6),
    ("portal_7", 6, 3),
    ("portal_8", 1, 2),
    ("portal_9", 4, 4),
    ("portal_10", 3, 1),
];

const GIANT_TEMPLATES: [(&str, i32, i32); 3] = [
    ("giant_portal_1", 7, 9),
    ("giant_portal_2", 10, 6),
    ("giant_portal_3", 8, 11),
];

/// Which portal kinds a ruleset can generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortalRules {
    version: RulesetVersion,
    salt: u64,
}

impl PortalRules {
    /// Rules for `version`, keyed with the placement salt.
    #[must_use]
    pub const fn new(version: RulesetVersion, salt: u64) -> Self {
        Self { version, salt }
    }

    /// Returns true if `kind` has generation rules in this ruleset.
    #[must_use]
    pub const fn supports(&self, kind: PortalKind) -> bool {
        match kind {
            PortalKind::Mountain => self.version.minor() >= 18,
            _ => self.version.minor() >= 16,
        }
    }

    /// Resolves the portal at `position`.
    ///
    /// Returns `None` when the biome's portal kind has no rules in this
    /// ruleset.
    #[must_use]
    pub fn resolve(&self, seed: u64, position: BlockPos, biome: Biome) -> Option<StructureInstance> {
        let kind = PortalKind::from_biome(biome);
        if !self.supports(kind) {
            return None;
        }

        let variant = self.roll_variant(seed, position, kind);
        let (dx, dz) = variant.chest_offset();
        let chest = position.offset(dx, dz);

        let container = ContainerDescriptor {
            position: chest,
            container_seed: self.container_seed(seed, chest, 0),
            table: LootTableId::RUINED_PORTAL,
        };

        Some(StructureInstance {
            position,
            variant,
            pieces: vec![StructurePiece {
                template: variant.template_name(),
                origin: position,
                containers: vec![container],
            }],
        })
    }

    fn roll_variant(&self, seed: u64, position: BlockPos, kind: PortalKind) -> PortalVariant {
        let chunk_key = (i64::from(position.chunk_x()) << 32) ^ i64::from(position.chunk_z());
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ self.salt.rotate_left(17) ^ chunk_key as u64);

        let air_pocket = rng.gen_range(0..100) < kind.air_pocket_chance();
        let giant = rng.gen_range(0..100) < kind.giant_chance();
        let template = if giant {
            rng.gen_range(1..=GIANT_TEMPLATES.len() as u8)
        } else {
            rng.gen_range(1..=TEMPLATES.len() as u8)
        };
        let rotation = Rotation::ALL[rng.gen_range(0..4)];
        let mirror = rng.gen_bool(0.5);

        PortalVariant {
            kind,
            rotation,
            mirror,
            giant,
            air_pocket,
            template,
        }
    }

    fn container_seed(&self, seed: u64, chest: BlockPos, index: u8) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(seed, self.salt);
        hasher.write_i32(chest.x);
        hasher.write_i32(chest.z);
        hasher.write_u8(index);
        hasher.finish()
    }
}
