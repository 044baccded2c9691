//! Error types for the backdrop pipeline

use thiserror::Error;

/// Result type alias for backdrop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the backdrop pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to compose the backdrop image
    #[error("Image composition failed: {0}")]
    ComposeError(String),

    /// Failed to resolve or bind the effect engine module
    #[error("Engine load failed: {0}")]
    EngineLoadError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
