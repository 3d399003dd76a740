//! Dial's probabilistic loading over one bush.
//!
//! # Pipeline
//!
//! Four passes per origin, all linear in the bush size thanks to the
//! topological order:
//!
//! 1. **Bush shortest path** — one forward sweep over `order` gives exact
//!    labels using bush arcs only.
//! 2. **Likelihoods** — `exp(θ · (L[j] − L[i] − cost))` per arc, zero when
//!    either endpoint is unreached.
//! 3. **Weights** — forward sweep: a node's weight is the sum of its
//!    incoming arc weights; an outgoing arc's weight is the node weight
//!    times the arc likelihood.
//! 4. **Flows** — reverse sweep: a node's throughput is its own demand plus
//!    everything departing downstream; incoming arcs split it in proportion
//!    to their weights.
//!
//! # Numerical policy
//!
//! Along bush arcs `L[j] − L[i] − cost ≤ 0`, so likelihoods lie in (0, 1]
//! and `exp` can only underflow — to zero, which correctly drops the
//! contribution.  Every division by a node weight is guarded: a zero weight
//! means no reasonable path reaches the node at finite cost, and its flow
//! share is zero, not NaN.

use tap_core::NodeId;
use tap_network::Network;

use crate::bushes::Bush;

// ── Scratch buffers ───────────────────────────────────────────────────────────

/// The six per-pass buffers, overwritten on every [`load`] call.
///
/// Kept as separate named arrays: likelihood/weight and node weight/flow
/// overlap only read-after-write across phases, and sharing storage would
/// silently mask phase-ordering bugs.  Sized once (nodes or arcs) and reused
/// for every origin, bounding scratch memory to O(N + A).
pub struct DialScratch {
    /// Shortest-path cost over bush arcs, per node.
    pub sp_cost: Vec<f64>,
    /// Origin's flow contribution, per arc.  The pipeline's output.
    pub flow: Vec<f64>,
    /// Throughput per node during the reverse sweep.
    pub node_flow: Vec<f64>,
    /// Path-weight mass per arc.
    pub weight: Vec<f64>,
    /// Path-weight mass per node.
    pub node_weight: Vec<f64>,
    /// Per-arc likelihood.
    pub likelihood: Vec<f64>,
}

impl DialScratch {
    pub fn new(num_nodes: usize, num_arcs: usize) -> Self {
        Self {
            sp_cost:     vec![0.0; num_nodes],
            flow:        vec![0.0; num_arcs],
            node_flow:   vec![0.0; num_nodes],
            weight:      vec![0.0; num_arcs],
            node_weight: vec![0.0; num_nodes],
            likelihood:  vec![0.0; num_arcs],
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Compute `origin`'s logit-consistent flow contribution at current arc
/// costs, leaving it in `scratch.flow`.
///
/// Arcs outside the bush always end with zero flow; nodes unreached on the
/// bush contribute nothing and produce no non-finite values.
pub fn load(
    bush: Bush<'_>,
    network: &Network,
    origin: NodeId,
    theta: f64,
    scratch: &mut DialScratch,
) {
    bush_shortest_path(bush, network, origin, scratch);

    // ── 2. Link likelihoods ───────────────────────────────────────────────
    for (ij, arc) in network.arcs.iter().enumerate() {
        let li = scratch.sp_cost[arc.tail.index()];
        let lj = scratch.sp_cost[arc.head.index()];
        scratch.likelihood[ij] = if li.is_finite() && lj.is_finite() {
            (theta * (lj - li - arc.cost)).exp()
        } else {
            0.0
        };
        scratch.flow[ij] = 0.0;
    }

    // ── 3. Node and link weights, forward sweep ───────────────────────────
    scratch.node_weight[origin.index()] = 1.0;
    for &ij in bush.fwd.arcs_of(origin) {
        scratch.weight[ij.index()] = scratch.likelihood[ij.index()];
    }
    for &i in &bush.order[1..] {
        let mut w = 0.0;
        for &hi in bush.rev.arcs_of(i) {
            w += scratch.weight[hi.index()];
        }
        scratch.node_weight[i.index()] = w;
        for &ij in bush.fwd.arcs_of(i) {
            scratch.weight[ij.index()] = w * scratch.likelihood[ij.index()];
        }
    }

    // ── 4. Node and link flows, reverse sweep ─────────────────────────────
    for &i in bush.order.iter().rev() {
        let mut f = if i.index() < network.num_zones {
            network.demand(origin, i)
        } else {
            0.0
        };
        for &ij in bush.fwd.arcs_of(i) {
            f += scratch.flow[ij.index()];
        }
        scratch.node_flow[i.index()] = f;

        let w = scratch.node_weight[i.index()];
        for &hi in bush.rev.arcs_of(i) {
            scratch.flow[hi.index()] = if w == 0.0 {
                0.0
            } else {
                f * scratch.weight[hi.index()] / w
            };
        }
    }
}

/// Exact shortest-path labels over bush arcs by one topological sweep.
///
/// Every bush predecessor of a node precedes it in `order`, so a single
/// min-reduction per node suffices; no queue, no re-relaxation.
fn bush_shortest_path(
    bush: Bush<'_>,
    network: &Network,
    origin: NodeId,
    scratch: &mut DialScratch,
) {
    scratch.sp_cost[origin.index()] = 0.0;
    for &i in &bush.order[1..] {
        let mut best = f64::INFINITY;
        for &hi in bush.rev.arcs_of(i) {
            let arc = &network.arcs[hi.index()];
            let via = scratch.sp_cost[arc.tail.index()] + arc.cost;
            if via < best {
                best = via;
            }
        }
        scratch.sp_cost[i.index()] = best;
    }
}
