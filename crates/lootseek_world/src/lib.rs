//! # LOOTSEEK World Generation
//!
//! Deterministic world model used by the seed search.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and ruleset always produce the same world
//! 2. **Split ownership**: placement is shared and immutable, terrain state
//!    lives in one generator per worker
//! 3. **Absence is not failure**: empty regions and unsupported variants
//!    surface as `None`
//!
//! ## Core Components
//!
//! - `SimplexNoise`: 2D noise for the climate channels
//! - `BiomeClassifier`: local context at a position
//! - `StructureConfig`: region grid and candidate placement
//! - `PortalRules`: variant, piece and chest resolution
//! - `PortalWorld` / `WorldGenerator`: the shared and per-worker halves

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod biome;
pub mod error;
pub mod generator;
pub mod noise;
pub mod placement;
pub mod portal;
pub mod structure;

pub use biome::{Biome, BiomeClassifier, Climate};
pub use error::{WorldError, WorldResult};
pub use generator::{PortalWorld, WorldGenerator};
pub use noise::{SimplexNoise, WorldSeed};
pub use placement::StructureConfig;
pub use portal::{PortalKind, PortalRules, PortalVariant, Rotation};
pub use structure::{ContainerDescriptor, StructureInstance, StructurePiece};
