//! Crate-wide error type.

use thiserror::Error;

/// Everything that can make a run fail fatally. Malformed input lines are
/// *not* represented here — the input reader skips them silently (and logs
/// a warning) instead, since a single bad line is routine, not fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// The flow table reached its configured capacity.
    #[error("flow table capacity exceeded (limit = {limit})")]
    CapacityExceeded {
        /// The configured maximum number of distinct flows.
        limit: usize,
    },

    /// Reading the input or writing a record failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
