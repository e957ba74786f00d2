//! Simulation hooks for observing run lifecycle events.
//!
//! Hooks are **observers**: they receive snapshots of simulation state at
//! fixed points and cannot modify it. Hook-owned state lives behind interior
//! mutability so hooks can be shared as `Arc<dyn SimulationHook>`.
//!
//! # Lifecycle
//!
//! ```text
//! on_run_start()            <- first call to step()
//!   on_period_end()         <- after accrual, once per simulated period
//! on_run_end()              <- when the run stops
//! ```
//!
//! Periods discarded before the start date produce no callbacks.

use std::sync::Arc;

use agents::UpdateOutcome;
use types::{AssetUniverse, NaiveDate, Period};

use crate::summary::RunSummary;

// =============================================================================
// Hook Context
// =============================================================================

/// Run-level information passed to [`SimulationHook::on_run_start`].
#[derive(Debug, Clone)]
pub struct RunStart {
    pub universe: AssetUniverse,
    pub agent: String,
    pub initial_wealth: f64,
}

/// Owned view of one completed period.
#[derive(Debug, Clone)]
pub struct PeriodSnapshot {
    pub period: Period,
    pub date: NaiveDate,
    /// Agent weights after the update.
    pub weights: Vec<f64>,
    /// Rewards the agent read this period.
    pub rewards: Vec<f64>,
    pub wealth_before: f64,
    pub wealth: f64,
    pub outcome: UpdateOutcome,
    pub accrued: bool,
}

// =============================================================================
// SimulationHook Trait
// =============================================================================

/// Trait for simulation observers.
pub trait SimulationHook: Send + Sync {
    /// Human-readable name for logging and debugging.
    fn name(&self) -> &str;

    #[allow(unused_variables)]
    fn on_run_start(&self, start: &RunStart) {}

    /// Called after every simulated period.
    #[allow(unused_variables)]
    fn on_period_end(&self, snapshot: &PeriodSnapshot) {}

    /// Called once when the run stops.
    #[allow(unused_variables)]
    fn on_run_end(&self, summary: &RunSummary) {}
}

// =============================================================================
// HookRunner
// =============================================================================

/// Manages hook registration and sequential invocation.
///
/// Hooks are called in registration order.
#[derive(Default)]
pub struct HookRunner {
    hooks: Vec<Arc<dyn SimulationHook>>,
}

impl HookRunner {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a hook.
    pub fn add(&mut self, hook: Arc<dyn SimulationHook>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    pub fn on_run_start(&self, start: &RunStart) {
        for hook in &self.hooks {
            hook.on_run_start(start);
        }
    }

    pub fn on_period_end(&self, snapshot: &PeriodSnapshot) {
        for hook in &self.hooks {
            hook.on_period_end(snapshot);
        }
    }

    pub fn on_run_end(&self, summary: &RunSummary) {
        for hook in &self.hooks {
            hook.on_run_end(summary);
        }
    }
}

impl std::fmt::Debug for HookRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRunner")
            .field("hooks", &self.hook_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Default)]
    struct CountingHook {
        starts: AtomicU64,
        periods: AtomicU64,
    }

    impl SimulationHook for CountingHook {
        fn name(&self) -> &str {
            "CountingHook"
        }

        fn on_run_start(&self, _start: &RunStart) {
            self.starts.fetch_add(1, Ordering::Relaxed);
        }

        fn on_period_end(&self, _snapshot: &PeriodSnapshot) {
            self.periods.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn snapshot() -> PeriodSnapshot {
        PeriodSnapshot {
            period: Period::ZERO,
            date: types::parse_date("2000-01-03").unwrap(),
            weights: vec![1.0],
            rewards: vec![1.0],
            wealth_before: 1.0,
            wealth: 1.0,
            outcome: UpdateOutcome::Held,
            accrued: true,
        }
    }

    #[test]
    fn test_hooks_called_in_registration_order() {
        let first = Arc::new(CountingHook::default());
        let second = Arc::new(CountingHook::default());
        let mut runner = HookRunner::new();
        runner.add(first.clone());
        runner.add(second.clone());
        assert_eq!(runner.hook_names(), vec!["CountingHook", "CountingHook"]);

        runner.on_run_start(&RunStart {
            universe: AssetUniverse::new(["A"]).unwrap(),
            agent: "EG".into(),
            initial_wealth: 1.0,
        });
        runner.on_period_end(&snapshot());
        runner.on_period_end(&snapshot());

        for hook in [&first, &second] {
            assert_eq!(hook.starts.load(Ordering::Relaxed), 1);
            assert_eq!(hook.periods.load(Ordering::Relaxed), 2);
        }
    }

    #[test]
    fn test_empty_runner() {
        let runner = HookRunner::new();
        assert!(runner.is_empty());
        runner.on_period_end(&snapshot());
    }
}
