//! Error types for seagraph-ir
//!
//! Feature errors convert into `SeagraphError` at the crate boundary.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::ir_generation::GenerationError;

/// Main error type for seagraph-ir operations
#[derive(Debug, Error)]
pub enum SeagraphError {
    /// IR generation error
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SeagraphError {
    /// Compiler bug rather than bad input
    pub fn is_internal(&self) -> bool {
        match self {
            SeagraphError::Generation(err) => err.is_internal(),
            _ => false,
        }
    }
}

/// Result type alias for seagraph operations
pub type Result<T> = std::result::Result<T, SeagraphError>;
