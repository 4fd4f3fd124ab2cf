//! Errors reported by an iLO client implementation

use thiserror::Error;

/// Error type for raw iLO client calls
///
/// The management facade translates these into
/// [`gantry_common::Error::IloOperation`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IloClientError {
    /// Firmware does not implement the command (older iLO generations)
    #[error("command not supported: {0}")]
    CommandNotSupported(String),

    /// Transport or protocol failure
    #[error("{0}")]
    Operation(String),
}
