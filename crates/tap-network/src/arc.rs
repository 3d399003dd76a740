//! Directed arcs and their BPR congestion cost.
//!
//! # Cost model
//!
//! Travel cost on an arc carrying flow `x` is
//!
//! ```text
//! cost = fixed + t0 * (1 + alpha * (x / capacity) ^ beta)
//! ```
//!
//! where `fixed = distance_factor * length + toll_factor * toll` is
//! precomputed at build time and `t0` is the free-flow travel time.  For
//! `x <= 0` the cost is `fixed + t0` — this sidesteps `0^0` and
//! negative-base powers without a branch inside `powf`.
//!
//! The two most common exponents get dedicated evaluators ([`CostFn::Linear`]
//! for β = 1, [`CostFn::Quartic`] for β = 4) that avoid `powf` entirely while
//! producing the same result as the general form at those exponents.

use tap_core::NodeId;

// ── Cost-function selector ────────────────────────────────────────────────────

/// Which BPR evaluator an arc uses, chosen once from β at build time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CostFn {
    /// β = 1: `fixed + t0 * (1 + alpha * x / c)`.
    Linear,
    /// β = 4: squared-squaring of `x / c` instead of `powf`.
    Quartic,
    /// Any other β, via `powf`.
    General,
}

impl CostFn {
    /// Select the evaluator matching `beta` (exact comparison; TNTP files
    /// carry 1 and 4 as literal values).
    pub fn for_beta(beta: f64) -> CostFn {
        if beta == 1.0 {
            CostFn::Linear
        } else if beta == 4.0 {
            CostFn::Quartic
        } else {
            CostFn::General
        }
    }
}

// ── Arc ───────────────────────────────────────────────────────────────────────

/// One directed arc with its TNTP attributes and mutable assignment state.
///
/// `flow` and `cost` are the only fields the solver mutates; everything else
/// is fixed after [`NetworkBuilder::build`](crate::NetworkBuilder::build).
#[derive(Clone, Debug)]
pub struct Arc {
    pub tail: NodeId,
    pub head: NodeId,

    /// Current assigned flow (vehicles per unit time).
    pub flow: f64,
    /// Current travel cost under `flow`.
    pub cost: f64,

    // ── Main link data ────────────────────────────────────────────────────
    pub free_flow_time: f64,
    pub capacity:       f64,
    pub length:         f64,
    pub toll:           f64,

    // ── BPR shape ─────────────────────────────────────────────────────────
    pub alpha: f64,
    pub beta:  f64,

    // ── Other data carried from TNTP input ────────────────────────────────
    pub speed_limit: f64,
    pub link_type:   i32,

    /// `distance_factor * length + toll_factor * toll`, precomputed.
    pub fixed_cost: f64,
    /// Evaluator selected from `beta`.
    pub cost_fn: CostFn,
}

impl Arc {
    /// Evaluate the BPR cost of this arc at its current flow.
    #[inline]
    pub fn bpr_cost(&self) -> f64 {
        // Protect against negative flow values and 0^0.
        if self.flow <= 0.0 {
            return self.fixed_cost + self.free_flow_time;
        }
        match self.cost_fn {
            CostFn::Linear => {
                self.fixed_cost
                    + self.free_flow_time * (1.0 + self.alpha * self.flow / self.capacity)
            }
            CostFn::Quartic => {
                let mut y = self.flow / self.capacity;
                y *= y;
                y *= y;
                self.fixed_cost + self.free_flow_time * (1.0 + self.alpha * y)
            }
            CostFn::General => {
                self.fixed_cost
                    + self.free_flow_time
                        * (1.0 + self.alpha * (self.flow / self.capacity).powf(self.beta))
            }
        }
    }

    /// Free-flow cost: travel time at zero flow plus the fixed component.
    #[inline]
    pub fn free_flow_cost(&self) -> f64 {
        self.fixed_cost + self.free_flow_time
    }
}
