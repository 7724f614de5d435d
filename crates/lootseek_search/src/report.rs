//! # Hit Formatting
//!
//! Text written for a hit:
//!
//! ```text
//! # seed 1000 anchor (0,0): total=2 best=2 structures=1 containers=1
//! #   portal (168,-88) standard portal_3 mirrored
//! #     chest (170,-85) seed=0x1f2e... x2
//! #       enchanted_golden_apple x2  <<<
//! #       gold_nugget x11
//! 1000 168 -88 2
//! ```
//!
//! Lines starting with `#` are the human-readable block. Every other line
//! is machine-readable: `<seed> <structure_x> <structure_z> <quantity>`.
//!
//! The block lists every recorded matching chest. Machine lines are
//! written only for chests that count toward the score: all of them when
//! scoring the total, those at or above the threshold when scoring single
//! containers. If none of those was recorded, one fallback line names the
//! structure holding the best chest and the seed's score.

use std::fmt::Write as _;

use lootseek_loot::{ItemId, ItemStack};

use crate::collab::LootModel;
use crate::seed_loop::SeedResult;

/// Marker after the target item in listings.
const TARGET_MARKER: &str = "<<<";

/// Appends one line per stack to `out`, each prefixed with `prefix`.
pub fn write_contents<L: LootModel>(
    out: &mut String,
    prefix: &str,
    stacks: &[ItemStack],
    target: Option<ItemId>,
    loot: &L,
) {
    for stack in stacks {
        out.push_str(prefix);
        match loot.item_name(stack.item) {
            Some(name) => out.push_str(name),
            None => {
                let _ = write!(out, "item#{}", stack.item.0);
            }
        }
        let _ = write!(out, " x{}", stack.count);
        if Some(stack.item) == target {
            let _ = write!(out, "  {TARGET_MARKER}");
        }
        out.push('\n');
    }
}

/// Formats the complete output block for one hit.
#[must_use]
pub fn format_hit<L: LootModel>(result: &SeedResult, target: ItemId, loot: &L) -> String {
    let mut out = String::with_capacity(256);

    let _ = writeln!(
        out,
        "# seed {} anchor {}: total={} best={} structures={} containers={}",
        result.seed,
        result.anchor,
        result.total_matched,
        result.best_container,
        result.structures_checked,
        result.containers_checked,
    );

    let mut last_structure = None;
    for hit in &result.hits {
        if last_structure != Some(hit.structure) {
            let _ = writeln!(out, "#   portal {} {}", hit.structure, hit.variant);
            last_structure = Some(hit.structure);
        }
        let _ = writeln!(
            out,
            "#     chest {} seed={:#018x} x{}",
            hit.container.position, hit.container.container_seed, hit.matched_quantity
        );
        write_contents(&mut out, "#       ", &hit.contents, Some(target), loot);
    }
    if result.unrecorded_hits > 0 {
        let _ = writeln!(out, "#   ... {} more matching chests not recorded", result.unrecorded_hits);
    }

    let mut lines = 0;
    for hit in result.hits.iter().filter(|h| h.matched_quantity >= result.machine_line_min) {
        let _ = writeln!(
            out,
            "{} {} {} {}",
            result.seed, hit.structure.x, hit.structure.z, hit.matched_quantity
        );
        lines += 1;
    }
    // the qualifying chests were all past the recording cap
    if lines == 0 {
        let pos = result.best_structure.unwrap_or_default();
        let _ = writeln!(out, "{} {} {} {}", result.seed, pos.x, pos.z, result.score);
    }

    out
}

/// Parses a machine line into `(seed, x, z, quantity)`. Returns `None`
/// for `#` lines and malformed input.
#[must_use]
pub fn parse_machine_line(line: &str) -> Option<(u64, i32, i32, u64)> {
    if line.starts_with('#') {
        return None;
    }
    let mut fields = line.split_ascii_whitespace();
    let seed = fields.next()?.parse().ok()?;
    let x = fields.next()?.parse().ok()?;
    let z = fields.next()?.parse().ok()?;
    let quantity = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((seed, x, z, quantity))
}
