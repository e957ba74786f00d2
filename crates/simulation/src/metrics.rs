//! MetricsHook - built-in hook aggregating run statistics.
//!
//! Counts periods by outcome and tracks the wealth peak and the deepest
//! drawdown from it as periods complete.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::hooks::{PeriodSnapshot, RunStart, SimulationHook};

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    /// Periods that reached the experts.
    pub total_periods: u64,
    /// Periods whose rewards were accrued.
    pub accrued_periods: u64,
    /// Periods where the agent skipped its update.
    pub skipped_periods: u64,
    /// Most recent wealth.
    pub wealth: f64,
    /// Highest wealth seen, including the initial wealth.
    pub peak_wealth: f64,
    /// Largest peak-to-trough decline as a fraction.
    pub max_drawdown: f64,
}

#[derive(Debug, Default)]
struct WealthTracker {
    last: f64,
    peak: f64,
    max_drawdown: f64,
}

impl WealthTracker {
    fn observe(&mut self, wealth: f64) {
        self.last = wealth;
        if wealth > self.peak {
            self.peak = wealth;
        } else if self.peak > 0.0 {
            let drawdown = (self.peak - wealth) / self.peak;
            self.max_drawdown = self.max_drawdown.max(drawdown);
        }
    }
}

/// Built-in hook collecting run metrics.
///
/// # Example
///
/// ```ignore
/// use simulation::MetricsHook;
/// use std::sync::Arc;
///
/// let metrics = Arc::new(MetricsHook::new());
/// sim.add_hook(metrics.clone());
/// sim.run()?;
/// println!("max drawdown: {:.2}%", metrics.snapshot().max_drawdown * 100.0);
/// ```
#[derive(Debug, Default)]
pub struct MetricsHook {
    periods: AtomicU64,
    accrued: AtomicU64,
    skipped: AtomicU64,
    wealth: Mutex<WealthTracker>,
}

impl MetricsHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let wealth = self.wealth.lock();
        MetricsSnapshot {
            total_periods: self.periods.load(Ordering::Relaxed),
            accrued_periods: self.accrued.load(Ordering::Relaxed),
            skipped_periods: self.skipped.load(Ordering::Relaxed),
            wealth: wealth.last,
            peak_wealth: wealth.peak,
            max_drawdown: wealth.max_drawdown,
        }
    }

    /// Reset all metrics.
    pub fn reset(&self) {
        self.periods.store(0, Ordering::Relaxed);
        self.accrued.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        *self.wealth.lock() = WealthTracker::default();
    }
}

impl SimulationHook for MetricsHook {
    fn name(&self) -> &str {
        "Metrics"
    }

    fn on_run_start(&self, start: &RunStart) {
        self.reset();
        self.wealth.lock().observe(start.initial_wealth);
    }

    fn on_period_end(&self, snapshot: &PeriodSnapshot) {
        self.periods.fetch_add(1, Ordering::Relaxed);
        if snapshot.accrued {
            self.accrued.fetch_add(1, Ordering::Relaxed);
        }
        if !snapshot.outcome.logged() {
            self.skipped.fetch_add(1, Ordering::Relaxed);
        }
        self.wealth.lock().observe(snapshot.wealth);
    }
}
