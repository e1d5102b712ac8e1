//! Error types for labeler-content

/// Result type for labeler-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while updating design-file content
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON root must be an object")]
    RootNotObject,

    #[error("`text_variables` must be a JSON object")]
    VariablesNotObject,

    #[error("No `{name}` block found")]
    BlockNotFound { name: String },

    #[error("No `{anchor}` header to anchor a new `{block}` block")]
    AnchorNotFound { anchor: String, block: String },
}
