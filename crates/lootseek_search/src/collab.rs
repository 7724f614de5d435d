//! # Collaborator Seams
//!
//! The search engine reaches world generation and loot generation only
//! through these traits. Each collaborator is split in two:
//!
//! | Half | Shared? | Holds |
//! |------|---------|-------|
//! | `WorldModel` / `LootModel` | yes, `&` across workers | rules, tables |
//! | `WorldSession` / `LootSession` | no, one per worker | per-seed state, buffers |
//!
//! Every method is deterministic in its inputs. "Nothing here" and
//! "no rules for this" are `None`, never errors.

use std::sync::Arc;

use lootseek_loot::{ItemId, ItemStack, LootContext, LootRuleset};
use lootseek_shared::{BlockPos, LootTableId, RegionCoord};
use lootseek_world::{Biome, PortalWorld, StructureInstance, WorldGenerator};

/// Shared, read-only half of the world collaborator.
pub trait WorldModel: Sync {
    /// Per-worker session type.
    type Session: WorldSession + Send;

    /// Region tile width in blocks.
    fn region_size(&self) -> i32;

    /// Candidate structure position in `region` for `seed`, if any.
    fn structure_position(&self, seed: u64, region: RegionCoord) -> Option<BlockPos>;

    /// Opens a fresh per-worker session.
    fn open_session(&self) -> Self::Session;
}

/// Per-worker half of the world collaborator.
pub trait WorldSession {
    /// Local context sampled at a position (a biome) and fed to variant
    /// resolution.
    type LocalContext: Copy + std::fmt::Debug;

    /// Switches the session to `seed`. Must be called before any query.
    fn apply_seed(&mut self, seed: u64);

    /// Estimated spawn point of the current seed.
    fn estimate_spawn(&self) -> BlockPos;

    /// Whether a structure is physically placed at `pos`.
    fn is_viable(&self, pos: BlockPos) -> bool;

    /// Local context at `pos`.
    fn sample_local_context(&self, pos: BlockPos) -> Self::LocalContext;

    /// Variant, pieces and containers of the structure at `pos`. `None`
    /// means the variant has no generation rules in this ruleset.
    fn resolve_structure(
        &self,
        pos: BlockPos,
        context: Self::LocalContext,
    ) -> Option<StructureInstance>;
}

/// Shared, read-only half of the loot collaborator.
pub trait LootModel: Sync {
    /// Per-worker session type.
    type Session: LootSession + Send;

    /// Opens a fresh per-worker session.
    fn open_session(&self) -> Self::Session;

    /// Item id for a name, with or without namespace.
    fn resolve_item(&self, name: &str) -> Option<ItemId>;

    /// Display name for an item id.
    fn item_name(&self, item: ItemId) -> Option<&str>;
}

/// Per-worker half of the loot collaborator.
pub trait LootSession {
    /// Contents of one container, in generation order. `None` if `table`
    /// is unknown. The slice is only valid until the next call.
    fn generate_contents(&mut self, table: LootTableId, container_seed: u64)
        -> Option<&[ItemStack]>;
}

impl WorldModel for PortalWorld {
    type Session = WorldGenerator;

    fn region_size(&self) -> i32 {
        PortalWorld::region_size(self)
    }

    fn structure_position(&self, seed: u64, region: RegionCoord) -> Option<BlockPos> {
        PortalWorld::structure_position(self, seed, region)
    }

    fn open_session(&self) -> WorldGenerator {
        self.generator()
    }
}

impl WorldSession for WorldGenerator {
    type LocalContext = Biome;

    fn apply_seed(&mut self, seed: u64) {
        WorldGenerator::apply_seed(self, seed);
    }

    fn estimate_spawn(&self) -> BlockPos {
        WorldGenerator::estimate_spawn(self)
    }

    fn is_viable(&self, pos: BlockPos) -> bool {
        WorldGenerator::is_viable(self, pos)
    }

    fn sample_local_context(&self, pos: BlockPos) -> Biome {
        self.biome_at(pos)
    }

    fn resolve_structure(&self, pos: BlockPos, biome: Biome) -> Option<StructureInstance> {
        self.resolve(pos, biome)
    }
}

impl LootModel for Arc<LootRuleset> {
    type Session = LootContext;

    fn open_session(&self) -> LootContext {
        LootContext::new(Arc::clone(self))
    }

    fn resolve_item(&self, name: &str) -> Option<ItemId> {
        self.items().resolve(name)
    }

    fn item_name(&self, item: ItemId) -> Option<&str> {
        self.items().name(item)
    }
}

impl LootSession for LootContext {
    fn generate_contents(&mut self, table: LootTableId, container_seed: u64) -> Option<&[ItemStack]> {
        self.generate(table, container_seed)
    }
}
