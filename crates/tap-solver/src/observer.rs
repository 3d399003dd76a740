//! Solver observer trait for progress reporting.

use std::time::Duration;

use crate::solver::SolveOutcome;

/// Statistics available once bush construction and the initial loading are
/// done.
#[derive(Clone, Debug)]
pub struct InitStats {
    /// Total reasonable arcs across all origins.
    pub num_bush_links: u64,
    /// Total reasonable paths to positive-demand destinations (saturating).
    pub num_bush_paths: u64,
    /// Wall time spent on initialization.
    pub elapsed: Duration,
}

/// Callbacks invoked by [`solve`][crate::solve] at key points in the MSA
/// loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The solver itself never prints; sinks
/// decide what to do with each event.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SolveObserver for ProgressPrinter {
///     fn on_iteration(&mut self, iteration: u32, flow_diff: f64, elapsed: Duration) {
///         println!("iteration {iteration}: flow diff {flow_diff:.3}, {elapsed:.3?}");
///     }
/// }
/// ```
pub trait SolveObserver {
    /// Called once after bushes are built and initial flows are loaded.
    fn on_init(&mut self, _stats: &InitStats) {}

    /// Called every iteration with the freshly measured flow gap.
    fn on_iteration(&mut self, _iteration: u32, _flow_diff: f64, _elapsed: Duration) {}

    /// Called once with the final outcome, before `solve` returns.
    fn on_end(&mut self, _outcome: &SolveOutcome) {}
}

/// A [`SolveObserver`] that does nothing.
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}
