//! # LOOTSEEK Inspector
//!
//! Prints every ruined portal within `radius_chunks * 16` blocks of one
//! seed's anchor, with each chest's seed and full loot listing.
//!
//! ```bash
//! lootseek-inspect 0x1f2e3d 20 --anchor spawn -v 1.20
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lootseek_cli::{init_tracing, report_failure, InspectArgs};
use lootseek_loot::LootRuleset;
use lootseek_search::{format_inspection, inspect_seed, LootModel, SearchError};
use lootseek_world::PortalWorld;

fn main() -> ExitCode {
    let args = InspectArgs::parse();
    init_tracing();

    match run(&args) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(&err),
    }
}

fn run(args: &InspectArgs) -> anyhow::Result<String> {
    let radius = args.radius_blocks()?;

    let world = PortalWorld::new(args.version)
        .map_err(SearchError::from)
        .context("loading world rules")?;
    let loot = LootRuleset::for_version(args.version)
        .map(Arc::new)
        .map_err(SearchError::from)
        .context("loading loot tables")?;

    let target = loot.resolve_item(&args.item).ok_or_else(|| {
        SearchError::InvalidConfig(format!("unknown target item '{}'", args.item))
    })?;

    let inspection = inspect_seed(&world, &loot, args.seed, radius, args.anchor, Some(target))?;
    Ok(format_inspection(&inspection, Some(target), &loot))
}
