//! Error types for labeler-git

use std::path::PathBuf;

/// Result type for labeler-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying repository state
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("No git repository found at or above {path}")]
    NotARepository { path: PathBuf },

    #[error("Repository has no commits yet")]
    EmptyRepository,

    #[error("Repository at {path} is bare; a work tree is required")]
    BareRepository { path: PathBuf },

    #[error("{path} is outside the repository work tree")]
    OutsideWorkTree { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
