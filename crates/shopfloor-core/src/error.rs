//! Core domain errors.

use thiserror::Error;

/// Core domain errors for Shopfloor.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Part referenced by a request is not in the roster.
    #[error("Unknown part: {0}")]
    UnknownPart(String),

    /// Roster file could not be decoded or is inconsistent.
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    /// Standard-time table could not be decoded.
    #[error("Invalid standard-time table: {0}")]
    InvalidStandardTimes(String),
}
