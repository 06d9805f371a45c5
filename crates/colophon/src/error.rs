//! Error types for configuration loading and about-page assembly.

use std::io;
use std::path::PathBuf;

/// Errors raised while loading configuration or composing the about page.
#[derive(Debug, thiserror::Error)]
pub enum ColophonError {
    /// A file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A YAML (or JSON) document did not match the expected shape.
    #[error("Invalid document {origin}: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The about template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl ColophonError {
    pub(crate) fn yaml(origin: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::Yaml {
            origin: origin.into(),
            source,
        }
    }
}

/// Result type for colophon operations.
pub type Result<T> = std::result::Result<T, ColophonError>;
