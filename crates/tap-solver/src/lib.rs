//! `tap-solver` — stochastic user equilibrium by the method of successive
//! averages, for the tap-rs traffic assignment workspace.
//!
//! The entry point is [`solve`]: given a populated
//! [`Network`](tap_network::Network) and [`MsaSettings`], it builds the
//! per-origin bushes once, then drives arc flows toward the logit-consistent
//! target with a fixed step size until the flow gap closes or a cap fires.
//! Progress surfaces through the [`SolveObserver`] hooks; the crate itself
//! never prints.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Per-origin loading passes run on Rayon's thread pool.   |

pub mod error;
pub mod observer;
pub mod settings;
pub mod solver;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SolveError, SolveResult};
pub use observer::{InitStats, NoopObserver, SolveObserver};
pub use settings::MsaSettings;
pub use solver::{avg_flow_diff, shift_flows, solve, SolveOutcome};
