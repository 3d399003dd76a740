//! Network representation and builder.
//!
//! # Data layout
//!
//! Arcs live in one `Vec<Arc>` in input order, so `ArcId` is simply the
//! position in that vector.  Adjacency uses **Compressed Sparse Row (CSR)**
//! format in both directions: the arcs leaving node `v` are
//!
//! ```text
//! fwd_arcs[ fwd_start[v] .. fwd_start[v+1] ]
//! ```
//!
//! and symmetrically for `rev_arcs`/`rev_start` (arcs entering `v`).  Within
//! a node's slice, arc ids appear in ascending order — the deterministic
//! tie-break every traversal in the solver relies on.
//!
//! # Zones
//!
//! Nodes `0..num_zones` are zone centroids: they originate and terminate
//! demand but may not be transited.  Nodes below `first_through_node` are
//! never expanded by the shortest-path and connectivity searches.

use tap_core::{ArcId, NodeId};

use crate::arc::{Arc, CostFn};
use crate::error::{NetworkError, NetworkResult};

// ── Network ───────────────────────────────────────────────────────────────────

/// Directed network with a dense zone-to-zone demand matrix.
///
/// Fields are `pub` for direct indexed access on hot paths.  Do not construct
/// directly; use [`NetworkBuilder`].
pub struct Network {
    /// All arcs, indexed by `ArcId`.
    pub arcs: Vec<Arc>,

    /// Dense demand matrix, `demand[origin * num_zones + dest]`.
    pub demand: Vec<f64>,

    pub num_nodes: usize,
    pub num_zones: usize,

    /// Nodes below this index terminate traversal (centroid non-transit).
    pub first_through_node: usize,

    /// Conversion factors folded into each arc's fixed cost at build time.
    pub toll_factor:     f64,
    pub distance_factor: f64,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    fwd_start: Vec<u32>,
    fwd_arcs:  Vec<ArcId>,
    rev_start: Vec<u32>,
    rev_arcs:  Vec<ArcId>,
}

impl Network {
    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Arcs leaving `v`, in ascending arc-id order.
    #[inline]
    pub fn out_arcs(&self, v: NodeId) -> &[ArcId] {
        let start = self.fwd_start[v.index()] as usize;
        let end   = self.fwd_start[v.index() + 1] as usize;
        &self.fwd_arcs[start..end]
    }

    /// Arcs entering `v`, in ascending arc-id order.
    #[inline]
    pub fn in_arcs(&self, v: NodeId) -> &[ArcId] {
        let start = self.rev_start[v.index()] as usize;
        let end   = self.rev_start[v.index() + 1] as usize;
        &self.rev_arcs[start..end]
    }

    /// `true` if `v` may appear in the interior of a path.
    #[inline]
    pub fn is_through_node(&self, v: NodeId) -> bool {
        v.index() >= self.first_through_node
    }

    // ── Demand ────────────────────────────────────────────────────────────

    /// Demand from zone `origin` to zone `dest`.
    #[inline]
    pub fn demand(&self, origin: NodeId, dest: NodeId) -> f64 {
        self.demand[origin.index() * self.num_zones + dest.index()]
    }

    /// Sum of all entries in the demand matrix.
    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    // ── Cost refresh ──────────────────────────────────────────────────────

    /// Re-evaluate every arc's BPR cost at its current flow.
    ///
    /// Fails if any cost comes out non-finite (overflow in the power term),
    /// leaving the already-updated costs in place for inspection.
    pub fn update_link_costs(&mut self) -> NetworkResult<()> {
        for (ij, arc) in self.arcs.iter_mut().enumerate() {
            arc.cost = arc.bpr_cost();
            if !arc.cost.is_finite() {
                return Err(NetworkError::NonFiniteCost(ArcId(ij as u32)));
            }
        }
        Ok(())
    }
}

// ── Builder input ─────────────────────────────────────────────────────────────

/// Per-arc input to [`NetworkBuilder::add_arc`] — the TNTP link attributes.
#[derive(Clone, Debug)]
pub struct ArcInput {
    pub tail: NodeId,
    pub head: NodeId,
    pub capacity:       f64,
    pub length:         f64,
    pub free_flow_time: f64,
    pub alpha:          f64,
    pub beta:           f64,
    pub speed_limit:    f64,
    pub toll:           f64,
    pub link_type:      i32,
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// The node count and zone count are fixed up front; arcs and demand entries
/// arrive in any order.  `build()` validates the inputs, computes each arc's
/// fixed cost and evaluator, and assembles the CSR adjacency.
///
/// # Example
///
/// ```
/// use tap_core::NodeId;
/// use tap_network::{ArcInput, NetworkBuilder};
///
/// let mut b = NetworkBuilder::new(2, 2);
/// b.add_arc(ArcInput {
///     tail: NodeId(0), head: NodeId(1),
///     capacity: 100.0, length: 1.0, free_flow_time: 1.0,
///     alpha: 0.15, beta: 4.0, speed_limit: 0.0, toll: 0.0, link_type: 1,
/// });
/// b.set_demand(NodeId(0), NodeId(1), 50.0);
/// let net = b.build().unwrap();
/// assert_eq!(net.num_arcs(), 1);
/// ```
pub struct NetworkBuilder {
    num_nodes: usize,
    num_zones: usize,
    first_through_node: usize,
    toll_factor:     f64,
    distance_factor: f64,
    inputs: Vec<ArcInput>,
    demand: Vec<f64>,
}

impl NetworkBuilder {
    /// Builder for a network with `num_nodes` nodes, the first `num_zones`
    /// of which are centroids.  All nodes start as through nodes.
    pub fn new(num_nodes: usize, num_zones: usize) -> Self {
        Self {
            num_nodes,
            num_zones,
            first_through_node: 0,
            toll_factor:     0.0,
            distance_factor: 0.0,
            inputs: Vec::new(),
            demand: vec![0.0; num_zones * num_zones],
        }
    }

    /// Nodes below `n` may not be transited by any path.
    pub fn first_through_node(&mut self, n: usize) -> &mut Self {
        self.first_through_node = n;
        self
    }

    pub fn toll_factor(&mut self, f: f64) -> &mut Self {
        self.toll_factor = f;
        self
    }

    pub fn distance_factor(&mut self, f: f64) -> &mut Self {
        self.distance_factor = f;
        self
    }

    /// Add a directed arc and return its `ArcId` (sequential from 0).
    pub fn add_arc(&mut self, input: ArcInput) -> ArcId {
        let id = ArcId(self.inputs.len() as u32);
        self.inputs.push(input);
        id
    }

    /// Set demand from zone `origin` to zone `dest`.
    pub fn set_demand(&mut self, origin: NodeId, dest: NodeId, demand: f64) -> &mut Self {
        self.demand[origin.index() * self.num_zones + dest.index()] = demand;
        self
    }

    /// Consume the builder and produce a validated [`Network`].
    pub fn build(self) -> NetworkResult<Network> {
        let num_nodes = self.num_nodes;
        let num_arcs  = self.inputs.len();

        if self.num_zones > num_nodes {
            return Err(NetworkError::TooManyZones {
                num_zones: self.num_zones,
                num_nodes,
            });
        }
        if self.first_through_node > num_nodes {
            return Err(NetworkError::FirstThroughNodeOutOfRange {
                first_through_node: self.first_through_node,
                num_nodes,
            });
        }

        // ── Validate and materialise arcs ─────────────────────────────────
        let mut arcs = Vec::with_capacity(num_arcs);
        for (i, input) in self.inputs.into_iter().enumerate() {
            let id = ArcId(i as u32);
            for node in [input.tail, input.head] {
                if node.index() >= num_nodes {
                    return Err(NetworkError::EndpointOutOfRange {
                        arc: id,
                        node,
                        num_nodes,
                    });
                }
            }
            if input.capacity <= 0.0 {
                return Err(NetworkError::NonPositiveCapacity(id));
            }
            if input.free_flow_time < 0.0 {
                return Err(NetworkError::NegativeFreeFlowTime(id));
            }

            let fixed_cost = self.distance_factor * input.length
                + self.toll_factor * input.toll;
            arcs.push(Arc {
                tail: input.tail,
                head: input.head,
                flow: 0.0,
                cost: input.free_flow_time + fixed_cost,
                free_flow_time: input.free_flow_time,
                capacity:       input.capacity,
                length:         input.length,
                toll:           input.toll,
                alpha: input.alpha,
                beta:  input.beta,
                speed_limit: input.speed_limit,
                link_type:   input.link_type,
                fixed_cost,
                cost_fn: CostFn::for_beta(input.beta),
            });
        }

        for (i, &d) in self.demand.iter().enumerate() {
            if d < 0.0 {
                return Err(NetworkError::NegativeDemand {
                    origin: NodeId((i / self.num_zones) as u32),
                    dest:   NodeId((i % self.num_zones) as u32),
                });
            }
        }

        // ── CSR adjacency, both directions ────────────────────────────────
        //
        // Arcs are appended in ascending id, so each node's slice ends up in
        // arc-id order without an explicit sort.
        let (fwd_start, fwd_arcs) = csr(num_nodes, &arcs, |a| a.tail);
        let (rev_start, rev_arcs) = csr(num_nodes, &arcs, |a| a.head);

        Ok(Network {
            arcs,
            demand: self.demand,
            num_nodes,
            num_zones: self.num_zones,
            first_through_node: self.first_through_node,
            toll_factor:     self.toll_factor,
            distance_factor: self.distance_factor,
            fwd_start,
            fwd_arcs,
            rev_start,
            rev_arcs,
        })
    }
}

/// Build one CSR direction keyed by `end(arc)` (tail for forward, head for
/// reverse).
fn csr(num_nodes: usize, arcs: &[Arc], end: impl Fn(&Arc) -> NodeId) -> (Vec<u32>, Vec<ArcId>) {
    let mut start = vec![0u32; num_nodes + 1];
    for arc in arcs {
        start[end(arc).index() + 1] += 1;
    }
    for v in 1..=num_nodes {
        start[v] += start[v - 1];
    }

    let mut packed = vec![ArcId::INVALID; arcs.len()];
    let mut cursor = start.clone();
    for (i, arc) in arcs.iter().enumerate() {
        let slot = cursor[end(arc).index()];
        packed[slot as usize] = ArcId(i as u32);
        cursor[end(arc).index()] += 1;
    }
    (start, packed)
}
