//! `tap-bush` — per-origin bushes and Dial's loading for the tap-rs traffic
//! assignment workspace.
//!
//! # The shape of the computation
//!
//! ```text
//! build (once):   free-flow Dijkstra per origin
//!                   → reasonable arcs (strictly increasing labels)
//!                   → packed forward/reverse stars + topological order
//!
//! load (per origin, per solver iteration):
//!                   bush shortest path → likelihoods → weights → flows
//! ```
//!
//! The persistent DAGs live in [`Bushes`]; the six transient buffers live in
//! [`DialScratch`], owned by the same container and overwritten per origin.
//! Callers that fan origins out across threads borrow per-origin [`Bush`]
//! views and bring their own scratch to [`dial::load`].

pub mod bushes;
pub mod dial;
pub mod error;
pub mod star;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bushes::{Bush, Bushes, MIN_LINK_COST};
pub use dial::{load, DialScratch};
pub use error::{BushError, BushResult};
pub use star::StarIndex;
