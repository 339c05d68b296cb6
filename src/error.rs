//! Error types for frame construction.
//!
//! Matching outcomes are never errors; a failed repetition resolves to a
//! [`MatchReason`](crate::session::MatchReason). The only hard failure is a
//! collaborator handing over a frame that breaks the skeleton contract.

use thiserror::Error;

/// A specialized `Result` for pose construction.
pub type PoseResult<T> = Result<T, PoseError>;

/// Contract violations raised while building a [`PoseFrame`](crate::pose::PoseFrame).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseError {
    /// Landmark count differs from the skeleton topology size
    #[error("landmark count mismatch: expected {expected}, got {actual}")]
    TopologyMismatch {
        /// Topology size
        expected: usize,
        /// Number of landmarks supplied
        actual: usize,
    },

    /// A coordinate or confidence was NaN or infinite
    #[error("non-finite value in landmark {index}")]
    NonFiniteCoordinate {
        /// Slot of the offending landmark
        index: usize,
    },

    /// Confidence outside [0, 1]
    #[error("confidence out of range in landmark {index}: {confidence}")]
    ConfidenceOutOfRange {
        /// Slot of the offending landmark
        index: usize,
        /// Value supplied
        confidence: f64,
    },
}
