//! Network-subsystem error type.

use thiserror::Error;

use tap_core::{ArcId, NodeId};

/// Errors produced by `tap-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("arc {arc} endpoint {node} out of range (network has {num_nodes} nodes)")]
    EndpointOutOfRange {
        arc:       ArcId,
        node:      NodeId,
        num_nodes: usize,
    },

    #[error("arc {0} has non-positive capacity")]
    NonPositiveCapacity(ArcId),

    #[error("arc {0} has negative free-flow time")]
    NegativeFreeFlowTime(ArcId),

    #[error("negative demand from zone {origin} to zone {dest}")]
    NegativeDemand { origin: NodeId, dest: NodeId },

    #[error("zone count {num_zones} exceeds node count {num_nodes}")]
    TooManyZones { num_zones: usize, num_nodes: usize },

    #[error("first through node {first_through_node} out of range (network has {num_nodes} nodes)")]
    FirstThroughNodeOutOfRange {
        first_through_node: usize,
        num_nodes:          usize,
    },

    #[error("arc {0} cost is not finite after congestion update")]
    NonFiniteCost(ArcId),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
