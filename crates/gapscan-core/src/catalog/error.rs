use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or canonicalizing capability patterns.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Malformed capability pattern: {0}")]
    MalformedPattern(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pattern source error: {0}")]
    Source(String),
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        CatalogError::MalformedPattern(reason.into())
    }
}
