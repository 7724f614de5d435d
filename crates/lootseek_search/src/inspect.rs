//! # Single-Seed Inspection
//!
//! Lists every candidate around the anchor for one seed, viable or not,
//! with the full loot of each container. Used to check a hit by hand.

use std::fmt::Write as _;

use lootseek_loot::{ContainerContents, ItemId};
use lootseek_shared::{BlockPos, RegionCoord};
use lootseek_world::{ContainerDescriptor, PortalVariant};

use crate::collab::{LootModel, WorldModel, WorldSession};
use crate::config::{AnchorMode, MAX_DISTANCE_LIMIT};
use crate::enumerate::RegionWindow;
use crate::error::{SearchError, SearchResult};
use crate::evaluate::{ContainerEvaluator, KeepContents, LootAccess};
use crate::report::write_contents;

/// One container and what it holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectedContainer {
    /// The container.
    pub descriptor: ContainerDescriptor,
    /// Target items inside, zero without a target.
    pub matched_quantity: u32,
    /// Generated contents; `None` if the table is unknown.
    pub contents: Option<ContainerContents>,
}

/// One candidate within range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectedStructure {
    /// Candidate position.
    pub position: BlockPos,
    /// Region it was placed from.
    pub region: RegionCoord,
    /// Whether it passes the placement check.
    pub viable: bool,
    /// Resolved variant; `None` when unsupported.
    pub variant: Option<PortalVariant>,
    /// Containers, in piece order.
    pub containers: Vec<InspectedContainer>,
}

/// Everything found around one seed's anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inspection {
    /// The seed.
    pub seed: u64,
    /// Anchor distances are measured from.
    pub anchor: BlockPos,
    /// Radius in blocks.
    pub radius: u32,
    /// Candidates, in enumeration order.
    pub structures: Vec<InspectedStructure>,
}

impl Inspection {
    /// Target items over viable structures only.
    #[must_use]
    pub fn viable_matched(&self) -> u64 {
        self.structures
            .iter()
            .filter(|s| s.viable)
            .flat_map(|s| &s.containers)
            .map(|c| u64::from(c.matched_quantity))
            .sum()
    }
}

/// Inspects `seed` within `radius` blocks of the anchor.
///
/// Unlike a search, non-viable candidates are resolved and listed too.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfig`] if `radius` is zero or larger
/// than [`MAX_DISTANCE_LIMIT`].
pub fn inspect_seed<W: WorldModel, L: LootModel>(
    world: &W,
    loot: &L,
    seed: u64,
    radius: u32,
    anchor: AnchorMode,
    target: Option<ItemId>,
) -> SearchResult<Inspection> {
    if radius == 0 || radius > MAX_DISTANCE_LIMIT {
        return Err(SearchError::InvalidConfig(format!(
            "radius must be in 1..={MAX_DISTANCE_LIMIT} blocks, got {radius}"
        )));
    }

    let mut session = world.open_session();
    session.apply_seed(seed);
    let anchor = match anchor {
        AnchorMode::Origin => BlockPos::ORIGIN,
        AnchorMode::Spawn => session.estimate_spawn(),
    };

    // without a target every count is zero; the id is never matched
    let counted = target.unwrap_or(ItemId(u32::MAX));
    let mut evaluator =
        ContainerEvaluator::new(LootAccess::Owned(loot.open_session()), counted, KeepContents::All);

    let window = RegionWindow::around(anchor, radius, world.region_size());
    let mut structures = Vec::new();
    for candidate in window.candidates(world, seed) {
        let viable = session.is_viable(candidate.position);
        let context = session.sample_local_context(candidate.position);
        let instance = session.resolve_structure(candidate.position, context);

        let containers = instance
            .iter()
            .flat_map(|s| s.containers())
            .map(|descriptor| {
                let evaluation = evaluator.evaluate(descriptor);
                InspectedContainer {
                    descriptor: *descriptor,
                    matched_quantity: evaluation.as_ref().map_or(0, |e| e.matched_quantity),
                    contents: evaluation.map(|e| e.contents),
                }
            })
            .collect();

        structures.push(InspectedStructure {
            position: candidate.position,
            region: candidate.region,
            viable,
            variant: instance.map(|s| s.variant),
            containers,
        });
    }

    Ok(Inspection {
        seed,
        anchor,
        radius,
        structures,
    })
}

/// Renders an inspection as a plain-text report.
#[must_use]
pub fn format_inspection<L: LootModel>(
    inspection: &Inspection,
    target: Option<ItemId>,
    loot: &L,
) -> String {
    let mut out = String::with_capacity(1024);
    let _ = writeln!(
        out,
        "seed {} anchor {} radius {}: {} candidates",
        inspection.seed,
        inspection.anchor,
        inspection.radius,
        inspection.structures.len()
    );

    for structure in &inspection.structures {
        let distance = (structure.position.distance_squared(inspection.anchor) as f64).sqrt();
        let _ = write!(
            out,
            "\nportal {} {} dist={distance:.0}",
            structure.position, structure.region
        );
        match &structure.variant {
            Some(variant) => {
                let _ = write!(out, " {variant}");
            }
            None => out.push_str(" unsupported"),
        }
        if !structure.viable {
            out.push_str(" (not viable)");
        }
        out.push('\n');

        for container in &structure.containers {
            let _ = write!(
                out,
                "  chest {} table={} seed={:#018x}",
                container.descriptor.position,
                container.descriptor.table,
                container.descriptor.container_seed
            );
            if target.is_some() {
                let _ = write!(out, " matched={}", container.matched_quantity);
            }
            out.push('\n');
            match &container.contents {
                Some(stacks) if stacks.is_empty() => out.push_str("    (empty)\n"),
                Some(stacks) => write_contents(&mut out, "    ", stacks, target, loot),
                None => out.push_str("    (unknown loot table)\n"),
            }
        }
    }

    if target.is_some() {
        let _ = writeln!(out, "\nmatched in viable portals: {}", inspection.viable_matched());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lootseek_loot::LootRuleset;
    use lootseek_shared::RulesetVersion;
    use lootseek_world::PortalWorld;

    fn fixtures() -> (PortalWorld, Arc<LootRuleset>) {
        let world = PortalWorld::new(RulesetVersion::V1_21).unwrap();
        let loot = Arc::new(LootRuleset::for_version(RulesetVersion::V1_21).unwrap());
        (world, loot)
    }

    #[test]
    fn test_rejects_zero_radius() {
        let (world, loot) = fixtures();
        let err = inspect_seed(&world, &loot, 1, 0, AnchorMode::Origin, None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_lists_everything_in_range() {
        let (world, loot) = fixtures();
        let target = loot.resolve_item("gold_nugget");
        let inspection = inspect_seed(&world, &loot, 12345, 3000, AnchorMode::Origin, target).unwrap();

        assert!(!inspection.structures.is_empty());
        for structure in &inspection.structures {
            assert!(structure.position.within(inspection.anchor, 3000));
            if structure.variant.is_some() {
                assert!(!structure.containers.is_empty());
                for container in &structure.containers {
                    assert!(container.contents.is_some());
                }
            }
        }

        let text = format_inspection(&inspection, target, &loot);
        assert!(text.starts_with("seed 12345 anchor (0,0) radius 3000"));
        assert!(text.contains("matched in viable portals"));
    }

    #[test]
    fn test_inspection_is_deterministic() {
        let (world, loot) = fixtures();
        let a = inspect_seed(&world, &loot, 77, 2000, AnchorMode::Spawn, None).unwrap();
        let b = inspect_seed(&world, &loot, 77, 2000, AnchorMode::Spawn, None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.viable_matched(), 0);
    }
}
