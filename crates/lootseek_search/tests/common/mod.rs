//! Stub collaborators and sink helpers shared by the integration tests.
//!
//! `StubWorld` places a single portal at (64, 64) for every seed. Its one
//! chest is seeded with the world seed. `StubLoot` fills that chest with
//! `seed % 3` enchanted golden apples, except seed 1000 which gets exactly
//! two.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lootseek_loot::{ItemId, ItemStack};
use lootseek_search::{LootModel, LootSession, StopFlag, WorldModel, WorldSession};
use lootseek_shared::{BlockPos, LootTableId, RegionCoord};
use lootseek_world::{
    ContainerDescriptor, PortalKind, PortalVariant, Rotation, StructureInstance, StructurePiece,
};
use parking_lot::Mutex;

pub const APPLE: ItemId = ItemId(0);
pub const NUGGET: ItemId = ItemId(1);
pub const PORTAL_AT: BlockPos = BlockPos { x: 64, z: 64 };

/// Apples the stub chest holds for `seed`.
pub fn apples_for(seed: u64) -> u32 {
    if seed == 1000 {
        2
    } else {
        (seed % 3) as u32
    }
}

pub struct StubWorld;

pub struct StubSession {
    seed: u64,
}

impl WorldModel for StubWorld {
    type Session = StubSession;

    fn region_size(&self) -> i32 {
        512
    }

    fn structure_position(&self, _seed: u64, region: RegionCoord) -> Option<BlockPos> {
        (region == RegionCoord::new(0, 0)).then_some(PORTAL_AT)
    }

    fn open_session(&self) -> StubSession {
        StubSession { seed: 0 }
    }
}

impl WorldSession for StubSession {
    type LocalContext = ();

    fn apply_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    fn estimate_spawn(&self) -> BlockPos {
        BlockPos::ORIGIN
    }

    fn is_viable(&self, _pos: BlockPos) -> bool {
        true
    }

    fn sample_local_context(&self, _pos: BlockPos) {}

    fn resolve_structure(&self, pos: BlockPos, (): ()) -> Option<StructureInstance> {
        Some(StructureInstance {
            position: pos,
            variant: PortalVariant {
                kind: PortalKind::Standard,
                rotation: Rotation::None,
                mirror: false,
                giant: false,
                air_pocket: false,
                template: 1,
            },
            pieces: vec![StructurePiece {
                template: "portal_1",
                origin: pos,
                containers: vec![ContainerDescriptor {
                    position: pos.offset(2, 3),
                    container_seed: self.seed,
                    table: LootTableId::RUINED_PORTAL,
                }],
            }],
        })
    }
}

pub struct StubLoot;

pub struct StubLootSession {
    buffer: Vec<ItemStack>,
}

impl LootModel for StubLoot {
    type Session = StubLootSession;

    fn open_session(&self) -> StubLootSession {
        StubLootSession { buffer: Vec::new() }
    }

    fn resolve_item(&self, name: &str) -> Option<ItemId> {
        match name.strip_prefix("minecraft:").unwrap_or(name) {
            "enchanted_golden_apple" => Some(APPLE),
            "gold_nugget" => Some(NUGGET),
            _ => None,
        }
    }

    fn item_name(&self, item: ItemId) -> Option<&str> {
        match item {
            APPLE => Some("enchanted_golden_apple"),
            NUGGET => Some("gold_nugget"),
            _ => None,
        }
    }
}

impl LootSession for StubLootSession {
    fn generate_contents(&mut self, table: LootTableId, seed: u64) -> Option<&[ItemStack]> {
        if table != LootTableId::RUINED_PORTAL {
            return None;
        }
        self.buffer.clear();
        self.buffer.push(ItemStack { item: NUGGET, count: 4 });
        let apples = apples_for(seed);
        if apples > 0 {
            self.buffer.push(ItemStack { item: APPLE, count: apples });
        }
        Some(&self.buffer)
    }
}

/// Where a [`FaultyWorld`] panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    /// While switching to the seed.
    ApplySeed,
    /// While resolving the portal.
    Resolve,
}

/// `StubWorld` that panics at `fault` for one seed.
pub struct FaultyWorld {
    pub fault: Fault,
    pub seed: u64,
    inner: StubWorld,
}

impl FaultyWorld {
    pub fn new(fault: Fault, seed: u64) -> Self {
        Self { fault, seed, inner: StubWorld }
    }
}

pub struct FaultySession {
    inner: StubSession,
    fault: Fault,
    panic_seed: u64,
}

impl WorldModel for FaultyWorld {
    type Session = FaultySession;

    fn region_size(&self) -> i32 {
        self.inner.region_size()
    }

    fn structure_position(&self, seed: u64, region: RegionCoord) -> Option<BlockPos> {
        self.inner.structure_position(seed, region)
    }

    fn open_session(&self) -> FaultySession {
        FaultySession {
            inner: self.inner.open_session(),
            fault: self.fault,
            panic_seed: self.seed,
        }
    }
}

impl WorldSession for FaultySession {
    type LocalContext = ();

    fn apply_seed(&mut self, seed: u64) {
        self.inner.apply_seed(seed);
        if self.fault == Fault::ApplySeed && seed == self.panic_seed {
            panic!("terrain cache corrupted for seed {seed}");
        }
    }

    fn estimate_spawn(&self) -> BlockPos {
        self.inner.estimate_spawn()
    }

    fn is_viable(&self, pos: BlockPos) -> bool {
        self.inner.is_viable(pos)
    }

    fn sample_local_context(&self, pos: BlockPos) {
        self.inner.sample_local_context(pos);
    }

    fn resolve_structure(&self, pos: BlockPos, (): ()) -> Option<StructureInstance> {
        if self.fault == Fault::Resolve && self.inner.seed == self.panic_seed {
            panic!("missing template piece at {pos}");
        }
        self.inner.resolve_structure(pos, ())
    }
}

/// `StubLoot` whose session panics for one container seed.
pub struct FaultyLoot {
    pub seed: u64,
    inner: StubLoot,
}

impl FaultyLoot {
    pub fn new(seed: u64) -> Self {
        Self { seed, inner: StubLoot }
    }
}

pub struct FaultyLootSession {
    inner: StubLootSession,
    panic_seed: u64,
}

impl LootModel for FaultyLoot {
    type Session = FaultyLootSession;

    fn open_session(&self) -> FaultyLootSession {
        FaultyLootSession {
            inner: self.inner.open_session(),
            panic_seed: self.seed,
        }
    }

    fn resolve_item(&self, name: &str) -> Option<ItemId> {
        self.inner.resolve_item(name)
    }

    fn item_name(&self, item: ItemId) -> Option<&str> {
        self.inner.item_name(item)
    }
}

impl LootSession for FaultyLootSession {
    fn generate_contents(&mut self, table: LootTableId, seed: u64) -> Option<&[ItemStack]> {
        if seed == self.panic_seed {
            panic!("loot pool weights overflowed for {seed}");
        }
        self.inner.generate_contents(table, seed)
    }
}

/// `StubWorld` that logs every seed each session is switched to, and
/// raises `stop` once `stop_after` seeds have been started in total.
pub struct RecordingWorld {
    stop: StopFlag,
    stop_after: usize,
    started: Arc<AtomicUsize>,
    logs: Mutex<Vec<Arc<Mutex<Vec<u64>>>>>,
    inner: StubWorld,
}

impl RecordingWorld {
    pub fn new(stop: StopFlag, stop_after: usize) -> Self {
        Self {
            stop,
            stop_after,
            started: Arc::new(AtomicUsize::new(0)),
            logs: Mutex::new(Vec::new()),
            inner: StubWorld,
        }
    }

    /// Seeds seen by each session, in the order they were applied.
    pub fn logs(&self) -> Vec<Vec<u64>> {
        self.logs.lock().iter().map(|log| log.lock().clone()).collect()
    }
}

pub struct RecordingSession {
    inner: StubSession,
    log: Arc<Mutex<Vec<u64>>>,
    started: Arc<AtomicUsize>,
    stop: StopFlag,
    stop_after: usize,
}

impl WorldModel for RecordingWorld {
    type Session = RecordingSession;

    fn region_size(&self) -> i32 {
        self.inner.region_size()
    }

    fn structure_position(&self, seed: u64, region: RegionCoord) -> Option<BlockPos> {
        self.inner.structure_position(seed, region)
    }

    fn open_session(&self) -> RecordingSession {
        let log = Arc::new(Mutex::new(Vec::new()));
        self.logs.lock().push(Arc::clone(&log));
        RecordingSession {
            inner: self.inner.open_session(),
            log,
            started: Arc::clone(&self.started),
            stop: self.stop.clone(),
            stop_after: self.stop_after,
        }
    }
}

impl WorldSession for RecordingSession {
    type LocalContext = ();

    fn apply_seed(&mut self, seed: u64) {
        self.inner.apply_seed(seed);
        self.log.lock().push(seed);
        if self.started.fetch_add(1, Ordering::SeqCst) + 1 == self.stop_after {
            self.stop.request_stop();
        }
    }

    fn estimate_spawn(&self) -> BlockPos {
        self.inner.estimate_spawn()
    }

    fn is_viable(&self, pos: BlockPos) -> bool {
        self.inner.is_viable(pos)
    }

    fn sample_local_context(&self, pos: BlockPos) {
        self.inner.sample_local_context(pos);
    }

    fn resolve_structure(&self, pos: BlockPos, (): ()) -> Option<StructureInstance> {
        self.inner.resolve_structure(pos, ())
    }
}

/// In-memory sink whose contents stay readable after the run.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Accepts `remaining` writes, then fails every one after.
pub struct FailAfter {
    pub remaining: usize,
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::other("disk full"));
        }
        self.remaining -= 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
