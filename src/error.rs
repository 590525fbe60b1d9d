//! Error types for Destek.

use thiserror::Error;

/// Library-level error type for Destek operations.
#[derive(Error, Debug)]
pub enum DestekError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Answer generation failed: {0}")]
    Generation(String),

    #[error("Response was blocked by the provider's safety filter")]
    SafetyFiltered,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Destek operations.
pub type Result<T> = std::result::Result<T, DestekError>;
