//! # LOOTSEEK
//!
//! Scans a range of world seeds for ruined portals whose chests hold an
//! enchanted golden apple (or any other item) near spawn.
//!
//! ```bash
//! # seeds with 2+ apples within 500 blocks of spawn, 8 threads
//! lootseek 2 500 --anchor spawn -t 8 -s 0 -e 0xffffff
//!
//! # resume a long run into the same log
//! lootseek 1 1000 -s 0x1000000 -o ega_seeds.txt
//! ```
//!
//! Ctrl+C stops the run cleanly: every worker finishes its current seed.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lootseek_cli::{init_tracing, report_failure, spawn_interrupt_handler, SearchArgs};
use lootseek_loot::LootRuleset;
use lootseek_search::{Aggregator, HitSink, RunSummary, SearchError, SearchRun, StopFlag};
use lootseek_world::PortalWorld;
use tracing::{info, warn};

fn main() -> ExitCode {
    let args = SearchArgs::parse();
    init_tracing();

    match run(&args) {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(&err),
    }
}

fn run(args: &SearchArgs) -> anyhow::Result<RunSummary> {
    let (config, range) = args.resolve()?;

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                         LOOTSEEK v{}", env!("CARGO_PKG_VERSION"));
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("  Item:       {} (>= {}, {:?})", config.target_item, config.min_match_threshold, config.score_mode);
    println!("  Radius:     {} blocks from {:?}", config.max_distance, config.anchor);
    println!("  Version:    {}", config.version);
    println!("  Seeds:      {range} ({} seeds)", range.len());
    println!("  Threads:    {} ({:?} loot)", config.concurrency, config.loot_context);
    println!("  Fast mode:  {}", if config.fast_mode { "ON (no terrain check)" } else { "off" });
    println!("  Output:     {}", args.output.display());
    println!();

    let world = PortalWorld::new(config.version)
        .map_err(SearchError::from)
        .context("loading world rules")?;
    let loot = LootRuleset::for_version(config.version)
        .map(Arc::new)
        .map_err(SearchError::from)
        .context("loading loot tables")?;
    info!(version = %config.version, tables = loot.table_count(), items = loot.items().len(), "rules loaded");

    let aggregator = Aggregator::new(HitSink::open_append(&args.output));
    let search = SearchRun::new(&world, &loot, &config, aggregator)?;

    let stop = StopFlag::new();
    if let Err(err) = spawn_interrupt_handler(stop.clone()) {
        warn!(error = %err, "Ctrl+C handler unavailable, the run can only be killed");
    }

    let summary = search.run(range, &stop)?;
    Ok(summary.into_result()?)
}

fn print_summary(summary: &RunSummary) {
    let stats = summary.stats();
    let secs = summary.elapsed.as_secs_f64();
    let rate = if secs > 0.0 { summary.checked as f64 / secs } else { 0.0 };

    println!();
    println!("═══════════════════════════════════════════════════════════════════");
    println!(
        "  {}",
        if summary.interrupted { "SEARCH INTERRUPTED" } else { "SEARCH COMPLETE" }
    );
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Seeds checked:   {}", summary.checked);
    println!("  Hits:            {}", summary.hits);
    println!("  Portals:         {} ({} not viable, {} unsupported)", stats.structures, stats.not_viable, stats.unsupported);
    println!("  Chests:          {} ({} skipped)", stats.containers, stats.skipped_containers);
    if stats.failed_seeds > 0 {
        println!("  Failed seeds:    {} (see warnings)", stats.failed_seeds);
    }
    println!("  Time:            {secs:.1}s ({rate:.0} seeds/s)");

    if summary.interrupted {
        for worker in &summary.per_worker {
            // resume point per worker
            let next = worker.range.start().saturating_add(worker.checked);
            if worker.range.contains(next) {
                println!("  Worker {} stopped at seed {next} of {}", worker.worker_id, worker.range);
            }
        }
    }
}
