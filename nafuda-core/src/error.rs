//! Error types for nafuda-core.

use std::path::PathBuf;

use thiserror::Error;

/// Invocation inputs that are missing or malformed. Raised before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API token was supplied (flag or `SLACK_TOKEN`).
    #[error("missing API token; pass --token or set SLACK_TOKEN")]
    MissingToken,

    /// The token contained whitespace or was blank after trimming.
    #[error("API token is malformed: {reason}")]
    InvalidToken { reason: &'static str },

    /// No channel identifier was supplied.
    #[error("missing channel id; pass it as the first argument (e.g. C024BE91L)")]
    MissingChannel,

    /// The channel identifier is not a platform id (e.g. a `#name` was given).
    #[error("invalid channel id '{channel}': expected an alphanumeric id such as C024BE91L")]
    InvalidChannel { channel: String },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or pass --templates")]
    HomeNotFound,
}

/// Errors raised while loading or validating a [`LayoutSpec`](crate::layout::LayoutSpec).
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The layout file could not be read.
    #[error("cannot read layout file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse layout at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The layout parsed but describes an impossible geometry.
    #[error("invalid layout '{name}': {reason}")]
    Invalid { name: String, reason: String },

    /// A preset name that does not exist.
    #[error("unknown layout '{0}'; expected: simple, nafuda, a4")]
    UnknownPreset(String),
}
