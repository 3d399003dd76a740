//! Network connectivity search.
//!
//! Answers "which nodes can be reached from `origin`" (forward) or "which
//! nodes can reach `origin`" (reverse), returning the discovery order and a
//! parent tree.  The queue discipline selects breadth-first, depth-first, or
//! the double-ended variant that re-inserts previously seen nodes at the
//! front of the queue.

use tap_core::{NodeId, QueueHistory, SearchQueue};

use crate::network::Network;

/// Which adjacency the search walks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SearchDirection {
    /// Follow arcs tail → head: nodes reachable *from* the origin.
    Forward,
    /// Follow arcs head → tail: nodes that can *reach* the origin.
    Reverse,
}

/// Order in which discovered nodes are expanded.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum QueueDiscipline {
    /// Breadth-first.
    Fifo,
    /// Depth-first.
    Lifo,
    /// Never-dequeued nodes go to the back, re-inserted ones to the front.
    Deque,
}

/// Result of a [`search`]: discovery order and parent pointers.
pub struct SearchTree {
    /// 1-based discovery order; 0 means the node was never reached.
    pub order: Vec<u32>,
    /// Parent of each reached node (`origin` is its own parent);
    /// `NodeId::INVALID` for unreached nodes.
    pub parent: Vec<NodeId>,
}

impl SearchTree {
    /// `true` if `v` was reached by the search.
    #[inline]
    pub fn reached(&self, v: NodeId) -> bool {
        self.parent[v.index()] != NodeId::INVALID
    }
}

/// Sweep the network from `origin`, obeying the centroid non-transit rule:
/// nodes below `first_through_node` are discovered but never expanded.
pub fn search(
    network:    &Network,
    origin:     NodeId,
    discipline: QueueDiscipline,
    direction:  SearchDirection,
) -> SearchTree {
    let n = network.num_nodes;
    let mut order  = vec![0u32; n];
    let mut parent = vec![NodeId::INVALID; n];

    parent[origin.index()] = origin;
    let mut next = 1;
    order[origin.index()] = next;

    let mut queue = SearchQueue::new(n, n);
    queue.push_back(origin);

    while let Some(i) = queue.pop_front() {
        let arcs = match direction {
            SearchDirection::Forward => network.out_arcs(i),
            SearchDirection::Reverse => network.in_arcs(i),
        };
        for &ij in arcs {
            let arc = &network.arcs[ij.index()];
            let j = match direction {
                SearchDirection::Forward => arc.head,
                SearchDirection::Reverse => arc.tail,
            };
            if parent[j.index()] != NodeId::INVALID {
                continue;
            }
            parent[j.index()] = i;
            next += 1;
            order[j.index()] = next;
            if network.is_through_node(j) {
                match discipline {
                    QueueDiscipline::Fifo => queue.push_back(j),
                    QueueDiscipline::Lifo => queue.push_front(j),
                    QueueDiscipline::Deque => match queue.history(j) {
                        QueueHistory::NeverQueued => queue.push_back(j),
                        QueueHistory::WasQueued   => queue.push_front(j),
                    },
                }
            }
        }
    }

    SearchTree { order, parent }
}
