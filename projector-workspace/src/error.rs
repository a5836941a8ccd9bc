//! Error types for projector-workspace.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from reading, reconciling and writing a
/// workspace description.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The workspace file does not exist. Read side only; callers treat it
    /// as "use the default document".
    #[error("workspace file not found at {path}")]
    NotFound { path: PathBuf },

    /// The workspace file exists but is not valid JSON of the expected shape.
    #[error("failed to parse workspace file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No workspace root could be resolved for the current action.
    #[error("cannot determine the workspace root; open a workspace or pass --root")]
    ConfigurationMissing,

    /// JSON serialization error (write path).
    #[error("workspace JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`WorkspaceError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> WorkspaceError {
    WorkspaceError::Io {
        path: path.into(),
        source,
    }
}
