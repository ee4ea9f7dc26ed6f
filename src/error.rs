use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the export pipeline
#[derive(Debug, Error)]
pub enum ExportError {
    /// Bad or missing configuration (invalid directory, empty output name, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested template does not exist
    #[error("Template '{0}' not found. Use --list-templates to see available templates")]
    UnknownTemplate(String),

    /// An exclusion pattern failed to compile as a glob
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// Filesystem access failed, with the offending path attached
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Report serialization failed
    #[error("Failed to serialize report: {0}")]
    Render(#[from] serde_json::Error),
}

impl ExportError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}
