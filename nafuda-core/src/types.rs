//! Domain types shared by the resolver, renderer and CLI.
//!
//! Optional member fields are plain `String`s: absence is the empty string so
//! every template slot can always be addressed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A chat-platform channel identifier (e.g. `C024BE91L`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// An opaque member identifier as returned by the listing call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// MemberRecord
// ---------------------------------------------------------------------------

/// One row of badge data.
///
/// Fields are private; a record cannot change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    full_name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    image_ref: String,
}

impl MemberRecord {
    pub fn new(
        full_name: impl Into<String>,
        display_name: impl Into<String>,
        title: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            display_name: display_name.into(),
            title: title.into(),
            image_ref: image_ref.into(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Avatar URL at the 192px size, or `""`.
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }
}

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

/// A member excluded from the sheet because its profile could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedMember {
    pub member_id: MemberId,
    pub reason: String,
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub channel: ChannelId,
    /// Number of identifiers returned by the listing call (all pages).
    pub listed: usize,
    /// Number of records produced.
    pub resolved: usize,
    pub skipped: Vec<SkippedMember>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn new(channel: ChannelId) -> Self {
        let now = Utc::now();
        Self {
            channel,
            listed: 0,
            resolved: 0,
            skipped: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn skip(&mut self, member_id: MemberId, reason: impl Into<String>) {
        self.skipped.push(SkippedMember {
            member_id,
            reason: reason.into(),
        });
    }

    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
