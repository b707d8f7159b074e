//! The [`RosterSource`] seam and the profile shape it returns.

use std::collections::BTreeMap;

use nafuda_core::types::{ChannelId, MemberId};

use crate::error::SourceError;

/// The avatar size, in pixels, placed on every badge.
pub const BADGE_IMAGE_SIZE: u32 = 192;

/// One page of a channel's membership listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberPage {
    pub members: Vec<MemberId>,
    /// `None` (or empty) when this is the last page.
    pub next_cursor: Option<String>,
}

/// A member's profile as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub real_name: String,
    pub display_name: String,
    /// Short account handle (`name` on Slack).
    pub handle: String,
    pub title: String,
    /// Avatar URLs keyed by square pixel size.
    pub image_urls: BTreeMap<u32, String>,
}

/// A chat platform that can list a channel's members and fetch their profiles.
///
/// Implementations must give every call a finite timeout.
pub trait RosterSource {
    /// Fetch one page of member ids. `cursor` is `None` for the first page.
    fn list_members_page(
        &self,
        channel: &ChannelId,
        cursor: Option<&str>,
    ) -> Result<MemberPage, SourceError>;

    /// Fetch a single member's profile.
    fn get_profile(&self, member: &MemberId) -> Result<Profile, SourceError>;
}
