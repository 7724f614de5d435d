//! # Search Runner
//!
//! Splits the range, runs one worker per partition on scoped threads and
//! collects their reports.
//!
//! ```text
//!              partition(range, N)
//!     ┌──────────────┼──────────────┐
//!  worker 0       worker 1  ...  worker N-1      (own world + loot session)
//!     │  check_seed, seed by seed, until end or stop
//!     ├── hits ──────────> Aggregator (output lock) ──> sink
//!     └── WorkerReport ──> channel ──> coordinator ──> RunSummary
//! ```

use std::time::{Duration, Instant};

use crossbeam_channel::unbounded;
use lootseek_loot::ItemId;
use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::aggregate::{Aggregator, CounterSnapshot};
use crate::collab::{LootModel, WorldModel};
use crate::config::{LootContextMode, SearchConfig, SearchRange};
use crate::error::{SearchError, SearchResult};
use crate::evaluate::LootAccess;
use crate::guard::contained;
use crate::partition::partition;
use crate::seed_loop::{SeedSearch, SeedStats};
use crate::stop::StopFlag;

/// What one worker did.
#[derive(Debug)]
pub struct WorkerReport {
    /// Worker index.
    pub worker_id: usize,
    /// Assigned range.
    pub range: SearchRange,
    /// Seeds fully evaluated.
    pub checked: u64,
    /// Hits this worker reported.
    pub hits: u64,
    /// Pipeline counts over all checked seeds.
    pub stats: SeedStats,
    /// Stopped before the end of its range.
    pub stopped: bool,
    /// Wall time.
    pub elapsed: Duration,
    /// Fatal error that ended the worker.
    pub error: Option<SearchError>,
}

/// Outcome of a whole run.
#[derive(Debug)]
pub struct RunSummary {
    /// Seeds fully evaluated.
    pub checked: u64,
    /// Hits written.
    pub hits: u64,
    /// Wall time.
    pub elapsed: Duration,
    /// A stop was requested before every range finished.
    pub interrupted: bool,
    /// Worker reports, by worker id.
    pub per_worker: Vec<WorkerReport>,
    /// First fatal error, if any.
    pub error: Option<SearchError>,
}

impl RunSummary {
    /// Pipeline counts summed over all workers.
    #[must_use]
    pub fn stats(&self) -> SeedStats {
        let mut total = SeedStats::default();
        for report in &self.per_worker {
            total += report.stats;
        }
        total
    }

    /// Converts a fatal worker error into `Err`.
    ///
    /// # Errors
    ///
    /// Returns the first error any worker hit.
    pub fn into_result(mut self) -> SearchResult<Self> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

/// A configured search, ready to run.
pub struct SearchRun<'a, W, L> {
    world: &'a W,
    loot: &'a L,
    config: &'a SearchConfig,
    target: ItemId,
    aggregator: Aggregator,
}

impl<'a, W: WorldModel, L: LootModel> SearchRun<'a, W, L> {
    /// Validates `config` and resolves its target item.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] for out-of-range values or
    /// a target item the loot collaborator does not know.
    pub fn new(
        world: &'a W,
        loot: &'a L,
        config: &'a SearchConfig,
        aggregator: Aggregator,
    ) -> SearchResult<Self> {
        config.validate()?;
        let target = loot.resolve_item(&config.target_item).ok_or_else(|| {
            SearchError::InvalidConfig(format!("unknown target item '{}'", config.target_item))
        })?;
        Ok(Self {
            world,
            loot,
            config,
            target,
            aggregator,
        })
    }

    /// Resolved target item.
    #[must_use]
    pub const fn target(&self) -> ItemId {
        self.target
    }

    /// Shared counters, readable while the run is in progress.
    #[must_use]
    pub fn counters(&self) -> CounterSnapshot {
        self.aggregator.counters()
    }

    /// Searches `range` with `config.concurrency` workers.
    ///
    /// Returns when every worker has finished its range or observed
    /// `stop`. A sink failure stops all workers and is returned in
    /// [`RunSummary::error`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if the range cannot be
    /// partitioned.
    pub fn run(&self, range: SearchRange, stop: &StopFlag) -> SearchResult<RunSummary> {
        let parts = partition(range, self.config.concurrency)?;
        let started = Instant::now();

        info!(
            %range,
            workers = parts.len(),
            version = %self.config.version,
            max_distance = self.config.max_distance,
            threshold = self.config.min_match_threshold,
            fast_mode = self.config.fast_mode,
            loot_context = ?self.config.loot_context,
            "search started"
        );

        // the generation lock, only in shared mode
        let shared_loot = match self.config.loot_context {
            LootContextMode::Shared => Some(Mutex::new(self.loot.open_session())),
            LootContextMode::PerWorker => None,
        };

        let mut per_worker = Vec::with_capacity(parts.len());
        std::thread::scope(|scope| {
            let (tx, rx) = unbounded();
            for (worker_id, part) in parts.iter().copied().enumerate() {
                let tx = tx.clone();
                let shared_loot = shared_loot.as_ref();
                scope.spawn(move || {
                    let access = match shared_loot {
                        Some(lock) => LootAccess::Shared(lock),
                        None => LootAccess::Owned(self.loot.open_session()),
                    };
                    let report = self.run_worker(worker_id, part, access, stop);
                    // coordinator outlives every worker
                    let _ = tx.send(report);
                });
            }
            drop(tx);

            for report in rx {
                match &report.error {
                    Some(err) => error!(worker = report.worker_id, error = %err, "worker failed"),
                    None => info!(
                        worker = report.worker_id,
                        range = %report.range,
                        checked = report.checked,
                        hits = report.hits,
                        stopped = report.stopped,
                        elapsed_ms = report.elapsed.as_millis() as u64,
                        "worker finished"
                    ),
                }
                per_worker.push(report);
            }
        });

        per_worker.sort_by_key(|r| r.worker_id);
        let error = per_worker.iter_mut().find_map(|r| r.error.take());
        let counters = self.aggregator.counters();

        Ok(RunSummary {
            checked: counters.checked,
            hits: counters.hits,
            elapsed: started.elapsed(),
            interrupted: per_worker.iter().any(|r| r.stopped),
            per_worker,
            error,
        })
    }

    fn run_worker(
        &self,
        worker_id: usize,
        range: SearchRange,
        access: LootAccess<'_, L::Session>,
        stop: &StopFlag,
    ) -> WorkerReport {
        let started = Instant::now();
        let mut search = SeedSearch::new(self.world, access, self.target, self.config);
        let mut stats = SeedStats::default();
        let mut checked = 0u64;
        let mut hits = 0u64;
        let mut stopped = false;
        let mut failure = None;

        for seed in range.seeds() {
            if stop.is_stopped() {
                stopped = true;
                break;
            }

            // a panic here escaped the per-candidate and per-container guards
            let found = match contained(|| search.check_seed(seed)) {
                Ok(outcome) => {
                    stats += outcome.stats;
                    outcome.result
                }
                Err(panic) => {
                    warn!(worker = worker_id, seed, %panic, "seed evaluation panicked, skipping seed");
                    stats.failed_seeds += 1;
                    None
                }
            };

            if let Some(result) = found {
                info!(
                    worker = worker_id,
                    seed,
                    total = result.total_matched,
                    best = result.best_container,
                    "hit"
                );
                if let Err(err) = self.aggregator.report_hit(&result, self.target, self.loot) {
                    stop.request_stop();
                    failure = Some(err);
                    break;
                }
                hits += 1;
            }

            checked += 1;
            self.aggregator.record_checked(1);
            if checked % self.config.progress_interval == 0 {
                self.aggregator.report_progress(worker_id, checked, range.len());
            }
        }

        WorkerReport {
            worker_id,
            range,
            checked,
            hits,
            stats,
            stopped: stopped || failure.is_some(),
            elapsed: started.elapsed(),
            error: failure,
        }
    }
}
