//! Sort configuration and rule resolution errors

use thiserror::Error;

/// Errors raised while setting up sorting
///
/// Sorting itself never fails; everything here happens at startup.
#[derive(Debug, Error)]
pub enum SortError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be written
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No item rule registered under this name
    #[error("Unknown item sort rule: {0}")]
    UnknownItemRule(String),

    /// No metadata rule registered under this name
    #[error("Unknown nbt sort rule: {0}")]
    UnknownNbtRule(String),

    /// Rule registered twice
    #[error("Sort rule already registered: {0}")]
    DuplicateRule(String),

    /// Config value out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Sync message could not be encoded or decoded
    #[error("Sync encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Result type for sort setup
pub type SortResult<T> = Result<T, SortError>;
