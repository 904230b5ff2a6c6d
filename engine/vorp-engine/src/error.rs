//! Error types for the VORP engine

use thiserror::Error;

/// Result type for VORP engine operations
pub type Result<T> = std::result::Result<T, VorpError>;

/// Errors that can occur while configuring or running the VORP engine.
///
/// Gaps in the projection data are not errors; they surface as warnings on
/// the calculation result.
#[derive(Error, Debug)]
pub enum VorpError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),
}
