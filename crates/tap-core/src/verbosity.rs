//! Diagnostic severity levels.
//!
//! The solver core never prints; it reports progress through observer hooks.
//! `Verbosity` is the shared scale that sinks (the CLI progress printer, test
//! collectors) use to decide which messages to keep.  Levels are ordered so a
//! sink keeps a message when `message_level <= self.threshold`.

use std::fmt;

/// How much diagnostic output a sink should produce.
///
/// `None` suppresses everything; `Debug` keeps per-arc dumps.  The middle
/// levels match the usual assignment-solver reporting tiers: `Low` for
/// per-iteration progress, `Medium` for run statistics, `Full` for
/// per-component notifications.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verbosity {
    None,
    #[default]
    Low,
    Medium,
    Full,
    Debug,
}

impl Verbosity {
    /// `true` if a message at `level` should be emitted under this threshold.
    #[inline]
    pub fn admits(self, level: Verbosity) -> bool {
        level <= self
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verbosity::None   => "none",
            Verbosity::Low    => "low",
            Verbosity::Medium => "medium",
            Verbosity::Full   => "full",
            Verbosity::Debug  => "debug",
        };
        write!(f, "{s}")
    }
}
