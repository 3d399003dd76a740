//! Packed per-node arc lists for one bush.
//!
//! Each bush needs its own forward and reverse star restricted to the
//! origin's reasonable arcs.  Instead of per-node linked lists, a bush
//! direction is one prefix-sum `start` array plus one packed `arcs` array —
//! the same CSR shape the full network uses, built over a subset of arcs.
//! Iterating a node's slice is a contiguous scan, and member arcs keep their
//! ascending arc-id order.

use tap_core::{ArcId, NodeId};
use tap_network::Network;

/// One direction (forward or reverse) of a bush's adjacency.
pub struct StarIndex {
    /// Prefix sums: arcs of node `v` occupy `arcs[start[v]..start[v+1]]`.
    start: Vec<u32>,
    /// Member arc ids, grouped by node, ascending within each group.
    arcs: Vec<ArcId>,
}

impl StarIndex {
    /// Pack `members` (ascending arc ids) keyed by each arc's tail.
    pub fn forward(network: &Network, members: &[ArcId]) -> StarIndex {
        Self::build(network, members, |a| a.tail)
    }

    /// Pack `members` (ascending arc ids) keyed by each arc's head.
    pub fn reverse(network: &Network, members: &[ArcId]) -> StarIndex {
        Self::build(network, members, |a| a.head)
    }

    fn build(
        network: &Network,
        members: &[ArcId],
        key: impl Fn(&tap_network::Arc) -> NodeId,
    ) -> StarIndex {
        let n = network.num_nodes;
        let mut start = vec![0u32; n + 1];
        for &ij in members {
            start[key(&network.arcs[ij.index()]).index() + 1] += 1;
        }
        for v in 1..=n {
            start[v] += start[v - 1];
        }

        let mut arcs = vec![ArcId::INVALID; members.len()];
        let mut cursor = start.clone();
        for &ij in members {
            let v = key(&network.arcs[ij.index()]).index();
            arcs[cursor[v] as usize] = ij;
            cursor[v] += 1;
        }
        StarIndex { start, arcs }
    }

    /// Member arcs at node `v`, in ascending arc-id order.
    #[inline]
    pub fn arcs_of(&self, v: NodeId) -> &[ArcId] {
        let lo = self.start[v.index()] as usize;
        let hi = self.start[v.index() + 1] as usize;
        &self.arcs[lo..hi]
    }

    /// Number of member arcs at node `v`.
    #[inline]
    pub fn degree(&self, v: NodeId) -> usize {
        (self.start[v.index() + 1] - self.start[v.index()]) as usize
    }

    /// Total member arcs across all nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}
