//! Solver error type.

use thiserror::Error;

use tap_bush::BushError;
use tap_network::NetworkError;

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("solver settings error: {0}")]
    Settings(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Bush(#[from] BushError),
}

pub type SolveResult<T> = Result<T, SolveError>;
