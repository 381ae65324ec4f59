use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures. Any of these aborts the run before an artifact is written.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid XML in {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
    #[error("no annotations found in {path}")]
    MissingAnnotations { path: PathBuf },
    #[error("invalid code point '{token}'")]
    InvalidCodepoint { token: String },
    #[error("failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}
