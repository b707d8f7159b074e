//! # nafuda-roster
//!
//! Resolves a channel's membership into ordered badge records.
//!
//! [`resolve`] drives any [`RosterSource`]; [`SlackClient`] is the production
//! source and [`InMemorySource`] a scripted one for tests and offline use.

pub mod error;
pub mod memory;
pub mod resolver;
pub mod slack;
pub mod source;

pub use error::{ResolveError, SourceError};
pub use memory::InMemorySource;
pub use resolver::resolve;
pub use slack::SlackClient;
pub use source::{MemberPage, Profile, RosterSource, BADGE_IMAGE_SIZE};
