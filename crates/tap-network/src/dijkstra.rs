//! Heap-based Dijkstra labelling.
//!
//! Used only while bushes are being constructed: the per-iteration shortest
//! paths inside the solver run on acyclic subgraphs where a single
//! topological sweep is enough.  Only labels are produced — reasonable-link
//! selection compares labels across an arc, never reconstructs paths.

use tap_core::{NodeHeap, NodeId};

use crate::network::Network;

/// Cost labels from `origin` to every node under current arc costs.
///
/// Unreached nodes keep the label `+∞`.
///
/// # Centroid non-transit
///
/// When a relaxation improves the label of a node below
/// `first_through_node`, the label is recorded but the node is never queued
/// for expansion: centroids can end a path but not continue one.  The origin
/// itself is expanded regardless, since every path must leave it.
pub fn shortest_path_labels(network: &Network, origin: NodeId) -> Vec<f64> {
    let mut heap = NodeHeap::new(network.num_nodes);
    heap.insert(origin, 0.0);

    while let Some(i) = heap.pop_min() {
        let label = heap.value(i);
        for &ij in network.out_arcs(i) {
            let arc = &network.arcs[ij.index()];
            let j = arc.head;
            let tentative = label + arc.cost;
            if tentative < heap.value(j) {
                if !network.is_through_node(j) {
                    heap.improve(j, tentative);
                    continue;
                }
                if heap.contains(j) {
                    heap.decrease_key(j, tentative);
                } else {
                    heap.insert(j, tentative);
                }
            }
        }
    }

    heap.into_values()
}
