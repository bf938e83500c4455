//! Error types for the water surface
//!
//! - **WaterError**: every failure mode the core reports
//! - **Result**: alias for `Result<T, WaterError>`

use thiserror::Error;

/// Result type alias for water surface operations
pub type Result<T> = std::result::Result<T, WaterError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaterError {
    /// Degenerate or out-of-range configuration, detected before allocation
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration JSON could not be parsed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Buffers were already released; the instance is torn down
    #[error("wave buffers already released")]
    AlreadyReleased,

    /// An operation needed the wave buffers before the first tick built them
    #[error("wave buffers not allocated")]
    NotAllocated,
}

impl WaterError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for WaterError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
