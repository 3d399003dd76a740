//! The MSA fixed-point loop.
//!
//! # One run
//!
//! ```text
//! build bushes (free-flow Dijkstra per origin, once)
//! flows ← Dial-sum target under free-flow costs
//! loop:
//!   refresh arc costs from flows (BPR)
//!   target ← Σ over origins of Dial's loading at current costs
//!   diff   ← mean |flow − target|
//!   stop when diff < tolerance (converged) or a cap fires (not converged)
//!   flows ← flows + λ (target − flows)
//! ```
//!
//! Bushes are never rebuilt: the reasonable-link sets are fixed by free-flow
//! costs at initialization, and only arc costs move between iterations.
//! Constant-λ MSA is not a contraction, so termination leans on the caps;
//! a capped run still leaves a valid (just non-equilibrium) flow pattern on
//! the network.

use std::time::Instant;

use tap_core::NodeId;
use tap_bush::Bushes;
use tap_network::Network;

use crate::error::SolveResult;
use crate::observer::{InitStats, SolveObserver};
use crate::settings::MsaSettings;

// ── Outcome ───────────────────────────────────────────────────────────────────

/// What a [`solve`] run produced.  The flows themselves are left on
/// `network.arcs[*].flow`.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    /// `true` if the flow gap dropped below tolerance; `false` if an
    /// iteration or wall-clock cap fired first.
    pub converged: bool,
    /// Number of MSA shifts applied.
    pub iterations: u32,
    /// Final mean absolute arc-flow gap to the target.
    pub flow_diff: f64,
    /// Total wall time of the run.
    pub elapsed: std::time::Duration,
    /// Total reasonable arcs across all bushes.
    pub num_bush_links: u64,
    /// Total reasonable paths to positive-demand destinations.
    pub num_bush_paths: u64,
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Solve for stochastic user equilibrium on `network` and leave the final
/// flows on its arcs.
///
/// The network must already carry arc and demand data; flows and costs are
/// overwritten.  Fails on invalid settings, a cyclic bush (a bug, not an
/// input condition), or a non-finite cost during refresh.
pub fn solve<O: SolveObserver>(
    network: &mut Network,
    settings: &MsaSettings,
    observer: &mut O,
) -> SolveResult<SolveOutcome> {
    settings.validate()?;
    let start = Instant::now();

    // ── Initialization: bushes + stochastic loading at free flow ──────────
    let mut bushes = Bushes::build(network)?;
    let (num_bush_links, num_bush_paths) = bushes.totals();

    let mut target = vec![0.0; network.num_arcs()];
    calculate_target(network, &mut bushes, settings.theta, &mut target);
    for (arc, &t) in network.arcs.iter_mut().zip(&target) {
        arc.flow = t;
    }
    observer.on_init(&InitStats {
        num_bush_links,
        num_bush_paths,
        elapsed: start.elapsed(),
    });

    // ── MSA iteration ─────────────────────────────────────────────────────
    let mut iteration = 0u32;
    let (converged, flow_diff) = loop {
        network.update_link_costs()?;
        calculate_target(network, &mut bushes, settings.theta, &mut target);
        let diff = avg_flow_diff(network, &target);
        observer.on_iteration(iteration, diff, start.elapsed());

        if diff < settings.tolerance {
            break (true, diff);
        }
        if iteration >= settings.max_iterations || start.elapsed() >= settings.time_limit {
            break (false, diff);
        }

        shift_flows(network, &target, settings.lambda);
        iteration += 1;
    };

    let outcome = SolveOutcome {
        converged,
        iterations: iteration,
        flow_diff,
        elapsed: start.elapsed(),
        num_bush_links,
        num_bush_paths,
    };
    observer.on_end(&outcome);
    Ok(outcome)
}

// ── Loop pieces ───────────────────────────────────────────────────────────────

/// Sum every origin's Dial loading at current costs into `target`.
///
/// With the `parallel` Cargo feature, origins run on Rayon's thread pool,
/// each worker carrying its own scratch; the per-worker partial sums are
/// reduced elementwise, so the result can differ from the sequential sum by
/// floating-point association only.
fn calculate_target(
    network: &Network,
    bushes: &mut Bushes,
    theta: f64,
    target: &mut [f64],
) {
    #[cfg(not(feature = "parallel"))]
    {
        target.fill(0.0);
        for r in 0..network.num_zones {
            let flow = bushes.dial_flows(network, NodeId(r as u32), theta);
            for (t, &f) in target.iter_mut().zip(flow) {
                *t += f;
            }
        }
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        use tap_bush::{dial, DialScratch};

        let bushes = &*bushes;
        let num_arcs = network.num_arcs();
        let total = (0..network.num_zones)
            .into_par_iter()
            .fold(
                || (DialScratch::new(network.num_nodes, num_arcs), vec![0.0; num_arcs]),
                |(mut scratch, mut acc), r| {
                    let origin = NodeId(r as u32);
                    dial::load(bushes.bush(origin), network, origin, theta, &mut scratch);
                    for (t, &f) in acc.iter_mut().zip(&scratch.flow) {
                        *t += f;
                    }
                    (scratch, acc)
                },
            )
            .map(|(_, acc)| acc)
            .reduce(
                || vec![0.0; num_arcs],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x += y;
                    }
                    a
                },
            );
        target.copy_from_slice(&total);
    }
}

/// Mean absolute difference between current flows and the target.
pub fn avg_flow_diff(network: &Network, target: &[f64]) -> f64 {
    let total: f64 = network
        .arcs
        .iter()
        .zip(target)
        .map(|(arc, &t)| (arc.flow - t).abs())
        .sum();
    total / network.num_arcs() as f64
}

/// Move every arc's flow a step of size `lambda` toward the target.
pub fn shift_flows(network: &mut Network, target: &[f64], lambda: f64) {
    for (arc, &t) in network.arcs.iter_mut().zip(target) {
        arc.flow += lambda * (t - arc.flow);
    }
}
