//! Error types for the lineup optimizer

use player_registry::RegistryError;
use thiserror::Error;

/// Result type for lineup operations
pub type Result<T> = std::result::Result<T, LineupError>;

/// Errors raised for caller misuse; roster data gaps never produce one
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineupError {
    #[error("Invalid slot configuration: {0}")]
    InvalidSlotConfig(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
