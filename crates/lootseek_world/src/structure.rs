//! Resolved structures and their containers.

use lootseek_shared::{BlockPos, LootTableId};

use crate::portal::PortalVariant;

/// A generation point that produces its contents from `container_seed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContainerDescriptor {
    /// Block position of the container.
    pub position: BlockPos,
    /// Seed fed to the loot table.
    pub container_seed: u64,
    /// Which loot table generates the contents.
    pub table: LootTableId,
}

/// One template piece of a structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructurePiece {
    /// Template name, e.g. `portal_3` or `giant_portal_1`.
    pub template: &'static str,
    /// Piece origin.
    pub origin: BlockPos,
    /// Containers in this piece, in template order.
    pub containers: Vec<ContainerDescriptor>,
}

/// A viable, fully resolved structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureInstance {
    /// Candidate position the structure was resolved at.
    pub position: BlockPos,
    /// Resolved geometric variant.
    pub variant: PortalVariant,
    /// Pieces, in generation order.
    pub pieces: Vec<StructurePiece>,
}

impl StructureInstance {
    /// All containers across all pieces, in piece order.
    pub fn containers(&self) -> impl Iterator<Item = &ContainerDescriptor> + '_ {
        self.pieces.iter().flat_map(|piece| piece.containers.iter())
    }
}
