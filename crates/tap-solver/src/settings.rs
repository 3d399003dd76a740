//! Solver parameters.

use std::time::Duration;

use crate::error::{SolveError, SolveResult};

/// Parameters for the fixed-step MSA iteration.
///
/// θ and λ come from the caller; the stopping criteria default to the usual
/// assignment-run limits and can be tightened per run.
#[derive(Clone, Debug)]
pub struct MsaSettings {
    /// Logit dispersion θ > 0.  Higher values concentrate flow on cheap
    /// paths; θ → ∞ approaches all-or-nothing loading.
    pub theta: f64,

    /// Fixed step size λ ∈ (0, 1] toward the target each iteration.  This is
    /// classical constant-step MSA, not the harmonic 1/k schedule.
    pub lambda: f64,

    /// Stop when the mean absolute arc-flow gap to the target drops below
    /// this.  Default `1e-3`.
    pub tolerance: f64,

    /// Hard iteration cap.  Default 100.
    pub max_iterations: u32,

    /// Wall-clock cap, checked once per iteration.  Default 3600 s.
    pub time_limit: Duration,
}

impl MsaSettings {
    /// Settings with the given θ and λ and default stopping criteria.
    pub fn new(theta: f64, lambda: f64) -> Self {
        Self {
            theta,
            lambda,
            tolerance: 1e-3,
            max_iterations: 100,
            time_limit: Duration::from_secs(3600),
        }
    }

    pub(crate) fn validate(&self) -> SolveResult<()> {
        if !(self.theta > 0.0 && self.theta.is_finite()) {
            return Err(SolveError::Settings(format!(
                "dispersion theta must be positive and finite, got {}",
                self.theta
            )));
        }
        if !(self.lambda > 0.0 && self.lambda <= 1.0) {
            return Err(SolveError::Settings(format!(
                "step size lambda must lie in (0, 1], got {}",
                self.lambda
            )));
        }
        Ok(())
    }
}
