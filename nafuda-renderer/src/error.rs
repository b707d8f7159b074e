//! Error types for nafuda-renderer.

use std::path::PathBuf;

use thiserror::Error;

use nafuda_core::LayoutError;

/// All errors that can arise while building or executing a badge template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error (syntax error, missing variable, ...).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Filesystem error while loading user templates.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An explicit template directory that does not exist or is not a directory.
    #[error("template directory not found: {path}")]
    TemplateDir { path: PathBuf },

    /// The layout describes an impossible grid.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The layout names a template that is neither embedded nor overridden.
    #[error("layout '{layout}' uses unknown template '{template}'")]
    UnknownTemplate { layout: String, template: String },
}
