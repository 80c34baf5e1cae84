use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration, data loading, and chart rendering.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("no variable stored under '{0}'")]
    VariableNotStored(String),

    #[error("stored variable serialization failed: {0}")]
    Store(#[from] serde_json::Error),

    #[error("unknown storm '{0}'")]
    UnknownStorm(String),

    #[error("unknown Saffir-Simpson intensity code {0}")]
    UnknownIntensity(i64),

    #[error("column '{column}' not found in {path:?}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("chart rendering failed: {0}")]
    Render(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
