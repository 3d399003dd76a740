//! Bush-subsystem error type.

use thiserror::Error;

use tap_core::NodeId;

/// Errors produced by `tap-bush`.
#[derive(Debug, Error)]
pub enum BushError {
    /// The reasonable-link subgraph for an origin contains a cycle.
    ///
    /// Unreachable when links are selected by strict label ordering; hitting
    /// this means the selection or the ordering code is broken.
    #[error("bush for origin {0} contains a cycle")]
    Cycle(NodeId),
}

pub type BushResult<T> = Result<T, BushError>;
