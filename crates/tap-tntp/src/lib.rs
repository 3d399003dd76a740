//! `tap-tntp` — TNTP file loading and flow output for the tap-rs traffic
//! assignment workspace.
//!
//! The [TNTP format](https://github.com/bstabler/TransportationNetworks) is
//! the de-facto interchange format for static assignment test networks: a
//! links file describing the graph and BPR parameters, and a trips file
//! carrying the zone-to-zone demand matrix.  [`load_network`] turns the pair
//! into a ready-to-solve [`Network`](tap_network::Network); [`write_flows`]
//! dumps the assigned flows as CSV afterwards.

pub mod error;
pub mod loader;
pub mod writer;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FileKind, TntpError, TntpResult};
pub use loader::{load_network, load_network_readers, TntpLoad};
pub use writer::{write_flows, write_flows_path};
