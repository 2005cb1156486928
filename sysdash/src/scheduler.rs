//! Fetch-and-render loop: one immediate cycle, then one cycle per trigger tick
//! until cancelled.
//!
//! Cycles never overlap. They run one after another on the calling task, and
//! [`IntervalTrigger`] skips ticks that fall due while a cycle is still in
//! flight instead of bursting to catch up.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::fetch::SnapshotSource;
use crate::widgets::Dashboard;

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(2000);
pub const MIN_PERIOD: Duration = Duration::from_millis(100);

/// Periodic wake-up source. Returns `false` once it can never fire again.
#[allow(async_fn_in_trait)]
pub trait Trigger {
    async fn tick(&mut self) -> bool;
}

/// Wall-clock trigger. The first tick lands one period after creation; the
/// scheduler's immediate cycle covers t = 0.
pub struct IntervalTrigger {
    interval: Interval,
}

impl IntervalTrigger {
    pub fn new(period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl Trigger for IntervalTrigger {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Redraw sink handed the dashboard after every applied snapshot.
pub trait Render {
    fn render(&mut self, dashboard: &Dashboard) -> io::Result<()>;
}

/// Stops a running [`Scheduler`], including one waiting on a fetch that never
/// answers. Dropping every handle has the same effect.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub cycles: u64,
    pub applied: u64,
    pub failed: u64,
}

pub struct Scheduler<S, T> {
    source: S,
    trigger: T,
    cancel: watch::Receiver<bool>,
    state: SchedulerState,
    stats: CycleStats,
}

impl<S: SnapshotSource, T: Trigger> Scheduler<S, T> {
    pub fn new(source: S, trigger: T) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let scheduler = Self {
            source,
            trigger,
            cancel: rx,
            state: SchedulerState::Idle,
            stats: CycleStats::default(),
        };
        (scheduler, CancelHandle { tx: Arc::new(tx) })
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    /// One fetch-and-render cycle. A failed fetch is logged and leaves the
    /// dashboard untouched; only a render error is returned.
    pub async fn run_cycle<R: Render>(
        &mut self,
        dashboard: &mut Dashboard,
        renderer: &mut R,
    ) -> io::Result<bool> {
        Self::cycle(&mut self.source, &mut self.stats, dashboard, renderer).await
    }

    // field borrows so it can share a select! with the cancel receiver
    async fn cycle<R: Render>(
        source: &mut S,
        stats: &mut CycleStats,
        dashboard: &mut Dashboard,
        renderer: &mut R,
    ) -> io::Result<bool> {
        stats.cycles += 1;
        match source.fetch().await {
            Ok(snapshot) => {
                dashboard.apply(&snapshot);
                stats.applied += 1;
                debug!(cycle = stats.cycles, "snapshot applied");
                renderer.render(dashboard)?;
                Ok(true)
            }
            Err(e) => {
                stats.failed += 1;
                warn!(cycle = stats.cycles, "metrics cycle skipped: {e}");
                Ok(false)
            }
        }
    }

    // false when cancellation won the race
    async fn cancellable_cycle<R: Render>(
        &mut self,
        dashboard: &mut Dashboard,
        renderer: &mut R,
    ) -> io::Result<bool> {
        let outcome = tokio::select! {
            biased;
            _ = self.cancel.changed() => None,
            res = Self::cycle(&mut self.source, &mut self.stats, dashboard, renderer) => Some(res),
        };
        match outcome {
            Some(res) => res.map(|_| true),
            None => {
                debug!(cycle = self.stats.cycles, "cycle abandoned on cancel");
                Ok(false)
            }
        }
    }

    /// Run until cancelled or the trigger is exhausted. Returns early without
    /// any cycle when cancellation happened before the call. Cancelling while
    /// a fetch is in flight drops that fetch.
    pub async fn run<R: Render>(
        &mut self,
        dashboard: &mut Dashboard,
        renderer: &mut R,
    ) -> io::Result<CycleStats> {
        if *self.cancel.borrow() || self.cancel.has_changed().is_err() {
            return Ok(self.stats);
        }
        self.state = SchedulerState::Running;
        info!("polling started");

        if self.cancellable_cycle(dashboard, renderer).await? {
            loop {
                let fired = tokio::select! {
                    biased;
                    _ = self.cancel.changed() => None,
                    more = self.trigger.tick() => Some(more),
                };
                match fired {
                    Some(true) => {
                        if !self.cancellable_cycle(dashboard, renderer).await? {
                            break;
                        }
                    }
                    Some(false) => {
                        debug!("trigger exhausted");
                        break;
                    }
                    None => break,
                }
            }
        }

        info!(
            cycles = self.stats.cycles,
            applied = self.stats.applied,
            failed = self.stats.failed,
            "polling stopped"
        );
        Ok(self.stats)
    }
}
