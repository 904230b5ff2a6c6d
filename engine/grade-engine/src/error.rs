//! Error types for the grade engine

use player_registry::RegistryError;
use thiserror::Error;

/// Result type for grading operations
pub type Result<T> = std::result::Result<T, GradeError>;

/// Caller misuse rejected at the call boundary.
///
/// Data gaps (unmatched players, missing positions, no bye weeks) are reported
/// as warnings on the grade instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradeError {
    #[error("Invalid grading settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid grading weights: {0}")]
    InvalidWeights(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Grading task failed: {0}")]
    TaskFailed(String),
}
