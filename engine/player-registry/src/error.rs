//! Error types for the player registry

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised when a caller hands the registry malformed input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid position code: '{0}'")]
    InvalidPosition(String),

    #[error("Unsupported scoring format: '{0}'")]
    UnsupportedScoringFormat(String),

    #[error("Player '{0}' not found in registry")]
    PlayerNotFound(String),
}
