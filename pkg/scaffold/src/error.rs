//! Error taxonomy of the scaffolding engine.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid image reference provided: '{reference}'")]
    InvalidReference { reference: String },

    /// Display is the bare message; callers and tests match on it verbatim.
    #[error("{0}")]
    Validation(String),

    #[error("failed to read runtime config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn invalid_reference(reference: impl Into<String>) -> Self {
        Error::InvalidReference {
            reference: reference.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}
