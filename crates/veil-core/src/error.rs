//! Error types for Veil

use thiserror::Error;

/// The main error type for Veil operations
#[derive(Debug, Error)]
pub enum VeilError {
    /// A required host collaborator (scene, pointer source) was not supplied.
    #[error("Initialization skipped: {0}")]
    InitializationSkipped(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown control: {0}")]
    UnknownControl(String),

    #[error("Invalid value for control {control}: {value}")]
    InvalidControlValue { control: String, value: String },

    #[error("Orb index {index} out of range (orb count {count})")]
    OrbIndexOutOfRange { index: usize, count: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Veil operations
pub type Result<T> = std::result::Result<T, VeilError>;

impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for VeilError {
    fn from(err: toml::ser::Error) -> Self {
        VeilError::TomlSerError(err.to_string())
    }
}
