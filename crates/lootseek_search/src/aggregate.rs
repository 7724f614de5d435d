//! # Aggregator
//!
//! The only state workers share.
//!
//! | Resource | Guard | Contended by |
//! |----------|-------|--------------|
//! | hit sink | output lock (`Mutex<HitSink>`) | `report_hit` |
//! | progress line | progress lock, `try_lock` only | `report_progress` |
//! | `checked`, `hits` | atomics | everyone |
//!
//! A hit's block is formatted before the output lock is taken, then
//! written and flushed in one critical section, and the hit counter is
//! bumped before the lock is released. Two hits can never interleave and
//! `hits` never runs ahead of the file.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use lootseek_loot::ItemId;
use parking_lot::Mutex;
use tracing::info;

use crate::collab::LootModel;
use crate::error::SearchResult;
use crate::report::format_hit;
use crate::seed_loop::SeedResult;
use crate::sink::HitSink;

/// Point-in-time copy of the run counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Seeds fully evaluated.
    pub checked: u64,
    /// Hits written to the sink.
    pub hits: u64,
}

/// Serialized hit output and run-wide counters.
#[derive(Debug)]
pub struct Aggregator {
    sink: Mutex<HitSink>,
    progress: Mutex<Instant>,
    checked: AtomicU64,
    hits: AtomicU64,
}

impl Aggregator {
    /// Aggregator writing to `sink`, counters at zero.
    #[must_use]
    pub fn new(sink: HitSink) -> Self {
        Self {
            sink: Mutex::new(sink),
            progress: Mutex::new(Instant::now()),
            checked: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    /// Writes one hit and counts it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Sink`](crate::SearchError::Sink) if the
    /// append fails; the hit is not counted.
    pub fn report_hit<L: LootModel>(
        &self,
        result: &SeedResult,
        target: ItemId,
        loot: &L,
    ) -> SearchResult<()> {
        let block = format_hit(result, target, loot);

        let mut sink = self.sink.lock();
        sink.append(&block)?;
        self.hits.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Adds `n` to the checked counter.
    #[inline]
    pub fn record_checked(&self, n: u64) {
        self.checked.fetch_add(n, Ordering::Relaxed);
    }

    /// Logs a progress line unless another worker is logging one.
    ///
    /// Never blocks. Returns whether the line was logged.
    pub fn report_progress(&self, worker_id: usize, checked: u64, range_size: u128) -> bool {
        let Some(started) = self.progress.try_lock() else {
            return false;
        };

        let counters = self.counters();
        let elapsed = started.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            counters.checked as f64 / elapsed
        } else {
            0.0
        };
        let percent = checked as f64 * 100.0 / range_size.max(1) as f64;

        info!(
            worker = worker_id,
            worker_checked = checked,
            worker_percent = format_args!("{percent:.2}"),
            checked = counters.checked,
            hits = counters.hits,
            seeds_per_sec = format_args!("{rate:.0}"),
            "progress"
        );
        true
    }

    /// Current counter values.
    #[must_use]
    pub fn counters(&self) -> CounterSnapshot {
        CounterSnapshot {
            checked: self.checked.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
        }
    }

    /// Sink description.
    #[must_use]
    pub fn sink_target(&self) -> String {
        self.sink.lock().target().to_owned()
    }
}
