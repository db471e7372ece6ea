//! Scheduling loop.
//!
//! Runs cycles back to back with a fixed pause between them. A failed
//! cycle is logged and the loop carries on with the next attempt.

use crate::cycle::{run_cycle, CycleReport};
use crate::fetcher::Fetcher;
use rankwatch_core::errors::Result;
use rankwatch_store::RankStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep while waiting for the next cycle.
const STOP_POLL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct ScheduleOptions {
    /// Pause between the end of one cycle and the start of the next
    pub interval: Duration,
    /// Stop after this many cycles (successful or not); `None` runs until stopped
    pub max_cycles: Option<u64>,
}

impl ScheduleOptions {
    pub fn every_minutes(minutes: u64) -> Self {
        Self {
            interval: Duration::from_secs(minutes.saturating_mul(60)),
            max_cycles: None,
        }
    }
}

/// Cycle counts from one [`Scheduler::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub cycles: u64,
    pub failures: u64,
}

#[derive(Debug)]
pub struct Scheduler {
    options: ScheduleOptions,
    stop: Arc<AtomicBool>,
}

impl Scheduler {
    pub fn new(options: ScheduleOptions) -> Self {
        Self {
            options,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that ends the loop once raised; checked between cycles and while sleeping.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    fn stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Sleep for the interval, waking early if stopped. Returns false when stopped.
    ///
    /// An interval too long to land on a representable instant waits until stopped.
    fn wait_for_next(&self) -> bool {
        let deadline = Instant::now().checked_add(self.options.interval);
        loop {
            if self.stopped() {
                return false;
            }
            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return true;
                    }
                    (deadline - now).min(STOP_POLL)
                }
                None => STOP_POLL,
            };
            std::thread::sleep(pause);
        }
    }

    pub fn run(&self, store: &mut RankStore, fetcher: &dyn Fetcher) -> ScheduleSummary {
        self.run_with(store, fetcher, |_| {})
    }

    /// Run cycles until stopped or `max_cycles` is reached, handing every
    /// cycle's outcome to `on_cycle`.
    pub fn run_with<F>(
        &self,
        store: &mut RankStore,
        fetcher: &dyn Fetcher,
        mut on_cycle: F,
    ) -> ScheduleSummary
    where
        F: FnMut(&Result<CycleReport>),
    {
        let mut summary = ScheduleSummary::default();

        tracing::info!(
            interval_secs = self.options.interval.as_secs(),
            max_cycles = ?self.options.max_cycles,
            "Scheduler started"
        );

        while !self.stopped() {
            let outcome = run_cycle(store, fetcher);
            summary.cycles += 1;
            if let Err(err) = &outcome {
                summary.failures += 1;
                tracing::warn!(
                    cycle = summary.cycles,
                    err_code = err.code(),
                    "Cycle failed; retrying at the next interval"
                );
            }
            on_cycle(&outcome);

            if self
                .options
                .max_cycles
                .is_some_and(|max| summary.cycles >= max)
            {
                break;
            }
            if !self.wait_for_next() {
                break;
            }
        }

        tracing::info!(
            cycles = summary.cycles,
            failures = summary.failures,
            "Scheduler stopped"
        );
        summary
    }
}
