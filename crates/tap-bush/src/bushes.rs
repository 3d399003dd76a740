//! Bush construction: one reasonable-link DAG per origin.
//!
//! # Reasonable links
//!
//! Arc (i, j) belongs to origin r's bush iff the free-flow shortest-path
//! labels satisfy `L_r(i) < L_r(j)` — travelling the arc moves strictly
//! farther from the origin.  The strict inequality excludes ties, self-loops,
//! and backward arcs, and proves acyclicity: every bush arc goes from a
//! strictly smaller label to a strictly larger one.
//!
//! Label ties on zero-cost arcs would break the strictness argument, so every
//! arc cost is clamped to at least [`MIN_LINK_COST`] before the free-flow
//! Dijkstra runs.
//!
//! # Persistence
//!
//! Bushes are built once and never updated: later solver iterations change
//! arc costs but keep the reasonable-link sets fixed.  The shared
//! [`DialScratch`] is the only mutable part, overwritten per origin.

use tap_core::{ArcId, NodeId, SearchQueue};
use tap_network::{shortest_path_labels, Network};

use crate::dial::{self, DialScratch};
use crate::error::{BushError, BushResult};
use crate::star::StarIndex;

/// Floor applied to arc costs for the initial free-flow Dijkstra, so label
/// orderings are strict even with zero-length arcs.
pub const MIN_LINK_COST: f64 = 1e-6;

// ── Bush view ─────────────────────────────────────────────────────────────────

/// Borrowed view of one origin's bush: inverse topological order plus the
/// restricted adjacency in both directions.
#[derive(Copy, Clone)]
pub struct Bush<'a> {
    /// Permutation of all node ids; position 0 is the origin, and every bush
    /// arc goes from an earlier position to a later one.
    pub order: &'a [NodeId],
    pub fwd: &'a StarIndex,
    pub rev: &'a StarIndex,
}

// ── Bushes ────────────────────────────────────────────────────────────────────

/// All per-origin bushes plus the shared Dial scratch buffers.
pub struct Bushes {
    order: Vec<Vec<NodeId>>,
    fwd: Vec<StarIndex>,
    rev: Vec<StarIndex>,
    num_links: Vec<u64>,
    num_paths: Vec<u64>,
    scratch: DialScratch,
}

impl Bushes {
    /// Build the bush for every origin zone from free-flow costs.
    ///
    /// Overwrites every arc's `cost` with its clamped free-flow value as a
    /// side effect; callers refresh costs before the next loading pass
    /// anyway.  Fails only if a constructed bush turns out cyclic, which the
    /// strict label selection rules out short of a bug.
    pub fn build(network: &mut Network) -> BushResult<Bushes> {
        let n = network.num_nodes;
        let num_zones = network.num_zones;

        for arc in &mut network.arcs {
            arc.cost = arc.free_flow_cost().max(MIN_LINK_COST);
        }

        let mut order = Vec::with_capacity(num_zones);
        let mut fwd = Vec::with_capacity(num_zones);
        let mut rev = Vec::with_capacity(num_zones);
        let mut num_links = Vec::with_capacity(num_zones);
        let mut num_paths = Vec::with_capacity(num_zones);

        let mut members = Vec::new();
        for r in 0..num_zones {
            let origin = NodeId(r as u32);
            let labels = shortest_path_labels(network, origin);

            // Ascending arc-id scan keeps every star slice in arc-id order.
            members.clear();
            for (ij, arc) in network.arcs.iter().enumerate() {
                if labels[arc.tail.index()] < labels[arc.head.index()] {
                    members.push(ArcId(ij as u32));
                }
            }

            let bush_fwd = StarIndex::forward(network, &members);
            let bush_rev = StarIndex::reverse(network, &members);
            let bush_order = topological_order(network, origin, &bush_fwd, &bush_rev)?;
            let paths = count_paths(network, origin, &bush_order, &bush_rev);

            num_links.push(bush_fwd.len() as u64);
            num_paths.push(paths);
            order.push(bush_order);
            fwd.push(bush_fwd);
            rev.push(bush_rev);
        }

        Ok(Bushes {
            order,
            fwd,
            rev,
            num_links,
            num_paths,
            scratch: DialScratch::new(n, network.num_arcs()),
        })
    }

    /// Borrow origin `r`'s bush.
    #[inline]
    pub fn bush(&self, origin: NodeId) -> Bush<'_> {
        Bush {
            order: &self.order[origin.index()],
            fwd: &self.fwd[origin.index()],
            rev: &self.rev[origin.index()],
        }
    }

    /// Number of reasonable arcs in origin `r`'s bush.
    pub fn num_links(&self, origin: NodeId) -> u64 {
        self.num_links[origin.index()]
    }

    /// Number of distinct reasonable paths from `origin` to its
    /// positive-demand destinations (diagnostic; saturates at `u64::MAX`).
    pub fn num_paths(&self, origin: NodeId) -> u64 {
        self.num_paths[origin.index()]
    }

    /// Totals over all origins: (reasonable arcs, reasonable paths).
    pub fn totals(&self) -> (u64, u64) {
        let links = self.num_links.iter().sum();
        let paths = self.num_paths.iter().fold(0u64, |acc, &p| acc.saturating_add(p));
        (links, paths)
    }

    /// Run Dial's loading for one origin at the current arc costs, using the
    /// shared scratch.  Returns the per-arc flow contribution of `origin`;
    /// the slice is invalidated by the next call.
    pub fn dial_flows(&mut self, network: &Network, origin: NodeId, theta: f64) -> &[f64] {
        let bush = Bush {
            order: &self.order[origin.index()],
            fwd: &self.fwd[origin.index()],
            rev: &self.rev[origin.index()],
        };
        dial::load(bush, network, origin, theta, &mut self.scratch);
        &self.scratch.flow
    }
}

// ── Topological order ─────────────────────────────────────────────────────────

/// Kahn's algorithm over one bush.
///
/// The origin is seeded first so it always lands in position 0; remaining
/// in-degree-zero nodes (typically nodes unreached from this origin) follow
/// in index order.  Emitting fewer than `n` nodes means a cycle.
fn topological_order(
    network: &Network,
    origin: NodeId,
    fwd: &StarIndex,
    rev: &StarIndex,
) -> BushResult<Vec<NodeId>> {
    let n = network.num_nodes;
    let mut indegree: Vec<u32> = (0..n).map(|v| rev.degree(NodeId(v as u32)) as u32).collect();

    let mut queue = SearchQueue::new(n, n);
    queue.push_back(origin);
    for v in 0..n {
        let v = NodeId(v as u32);
        if v != origin && indegree[v.index()] == 0 {
            queue.push_back(v);
        }
    }

    let mut order = Vec::with_capacity(n);
    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &ij in fwd.arcs_of(i) {
            let j = network.arcs[ij.index()].head;
            indegree[j.index()] -= 1;
            if indegree[j.index()] == 0 {
                queue.push_back(j);
            }
        }
    }

    if order.len() < n {
        return Err(BushError::Cycle(origin));
    }
    Ok(order)
}

// ── Path counting ─────────────────────────────────────────────────────────────

/// Count reasonable paths from the origin to each positive-demand zone.
///
/// One pass in topological order: the path count of a node is the sum over
/// its bush predecessors.  Counts saturate rather than wrap — they are a
/// size diagnostic, and real networks overflow 64 bits easily.
fn count_paths(
    network: &Network,
    origin: NodeId,
    order: &[NodeId],
    rev: &StarIndex,
) -> u64 {
    let mut path_count = vec![0u64; network.num_nodes];
    path_count[origin.index()] = 1;

    let mut total = 0u64;
    for &j in &order[1..] {
        let mut count = 0u64;
        for &hj in rev.arcs_of(j) {
            let h = network.arcs[hj.index()].tail;
            count = count.saturating_add(path_count[h.index()]);
        }
        path_count[j.index()] = count;

        if j.index() < network.num_zones && network.demand(origin, j) > 0.0 {
            total = total.saturating_add(count);
        }
    }
    total
}
