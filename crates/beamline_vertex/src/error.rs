//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, weighted-selection invariant violations, geometry misses,
//! and out-of-order queries.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or empty probability table, or a malformed parameter. Raised at setup time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Weighted selection could not bracket a draw. Indicates a defect, not bad input.
    #[error("sampling invariant violated: {0}")]
    Sampling(String),

    /// No node of the geometry tree contains the point.
    #[error("no geometry node contains point ({x}, {y}, {z})")]
    GeometryMiss { x: f64, y: f64, z: f64 },

    /// A query that needs a selected segment was made before one exists.
    #[error("precondition failed: {0}")]
    Precondition(String),
}

impl Error {
    /// Returns `true` for errors scoped to a single event, which a batch run skips.
    pub fn is_per_event(&self) -> bool {
        matches!(self, Error::GeometryMiss { .. })
    }
}
