use thiserror::Error;

/// Core error type shared across ecomgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The table catalog violates internal invariants.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    /// Foreign keys form a cycle, so no load order exists.
    #[error("foreign key cycle between tables: {}", .0.join(", "))]
    Cycle(Vec<String>),
    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

/// Convenience alias for results returned by ecomgen crates.
pub type Result<T> = std::result::Result<T, Error>;
