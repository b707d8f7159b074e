//! Error types for nafuda-pipeline.

use std::path::PathBuf;

use thiserror::Error;

use nafuda_renderer::RenderError;
use nafuda_roster::ResolveError;

/// The destination could not be created or written.
#[derive(Debug, Error)]
pub enum SinkError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (report / records side files).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal errors from a pipeline run. Skipped members are not errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The roster could not be enumerated.
    #[error("roster error: {0}")]
    Resolve(#[from] ResolveError),

    /// Template or layout failure; nothing was written.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The rendered document could not be written.
    #[error("write error: {0}")]
    Sink(#[from] SinkError),
}

/// Convenience constructor for [`SinkError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SinkError {
    SinkError::Io {
        path: path.into(),
        source,
    }
}
