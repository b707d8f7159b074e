//! Nafuda core library — member records, layouts, configuration, errors.
//!
//! - [`types`] — newtypes, [`MemberRecord`], [`RunReport`]
//! - [`layout`] — [`LayoutSpec`] and the built-in presets
//! - [`config`] — validated per-run inputs
//! - [`error`] — [`ConfigError`], [`LayoutError`]

pub mod config;
pub mod error;
pub mod layout;
pub mod types;

pub use config::{ApiToken, RunConfig};
pub use error::{ConfigError, LayoutError};
pub use layout::{FieldSet, Grid, LayoutKind, LayoutSpec, PaperSize};
pub use types::{ChannelId, MemberId, MemberRecord, RunReport, SkippedMember};
