//! `tap-core` — foundational types for the tap-rs traffic assignment
//! workspace.
//!
//! This crate is a dependency of every other `tap-*` crate.  It intentionally
//! has no `tap-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`ids`]       | `NodeId`, `ArcId`                                   |
//! | [`heap`]      | `NodeHeap` — indexed min-heap with decrease-key     |
//! | [`queue`]     | `SearchQueue` — circular deque with id history      |
//! | [`verbosity`] | `Verbosity` severity scale for diagnostic sinks     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod heap;
pub mod ids;
pub mod queue;
pub mod verbosity;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use heap::NodeHeap;
pub use ids::{ArcId, NodeId};
pub use queue::{QueueHistory, SearchQueue};
pub use verbosity::Verbosity;
