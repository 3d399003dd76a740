//! TNTP I/O error type.

use std::fmt;

use thiserror::Error;

use tap_network::NetworkError;

/// Which of the two TNTP inputs an error refers to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FileKind {
    Links,
    Trips,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Links => write!(f, "links"),
            FileKind::Trips => write!(f, "trips"),
        }
    }
}

/// Errors produced by `tap-tntp`.
#[derive(Debug, Error)]
pub enum TntpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{file} file line {line}: {message}")]
    Parse {
        file:    FileKind,
        line:    usize,
        message: String,
    },

    #[error("{file} file is missing required metadata <{tag}>")]
    MissingMetadata { file: FileKind, tag: &'static str },

    #[error("zone counts disagree: {links} in the links file, {trips} in the trips file")]
    ZoneMismatch { links: usize, trips: usize },

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),
}

pub type TntpResult<T> = Result<T, TntpError>;
