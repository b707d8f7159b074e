//! In-memory [`RosterSource`] with scripted pages and failures.

use std::cell::RefCell;
use std::collections::HashMap;

use nafuda_core::types::{ChannelId, MemberId};

use crate::error::SourceError;
use crate::source::{MemberPage, Profile, RosterSource, BADGE_IMAGE_SIZE};

/// A deterministic source: members are listed in insertion order, split into
/// pages of `page_size`, and each profile lookup returns whatever was scripted.
///
/// A member added without a profile fails with `user_not_found`.
#[derive(Debug)]
pub struct InMemorySource {
    members: Vec<MemberId>,
    profiles: HashMap<MemberId, Result<Profile, SourceError>>,
    page_size: usize,
    listing_error: Option<SourceError>,
    profile_requests: RefCell<Vec<MemberId>>,
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            profiles: HashMap::new(),
            page_size: usize::MAX,
            listing_error: None,
            profile_requests: RefCell::new(Vec::new()),
        }
    }

    /// Add a member whose profile lookup succeeds.
    pub fn with_member(mut self, id: impl Into<MemberId>, profile: Profile) -> Self {
        let id = id.into();
        self.members.push(id.clone());
        self.profiles.insert(id, Ok(profile));
        self
    }

    /// Add a member whose profile lookup fails with `error`.
    pub fn with_failing_member(mut self, id: impl Into<MemberId>, error: SourceError) -> Self {
        let id = id.into();
        self.members.push(id.clone());
        self.profiles.insert(id, Err(error));
        self
    }

    /// Split the listing into pages of `size` ids (minimum 1).
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Make every listing call fail.
    pub fn with_listing_error(mut self, error: SourceError) -> Self {
        self.listing_error = Some(error);
        self
    }

    /// Member ids passed to `get_profile`, in call order.
    pub fn profile_requests(&self) -> Vec<MemberId> {
        self.profile_requests.borrow().clone()
    }
}

/// Convenience profile with a 192px avatar derived from the handle.
pub fn profile(real_name: &str, display_name: &str, title: &str) -> Profile {
    let handle = display_name.to_lowercase();
    let mut image_urls = std::collections::BTreeMap::new();
    image_urls.insert(
        BADGE_IMAGE_SIZE,
        format!("https://avatars.example/{handle}_{BADGE_IMAGE_SIZE}.png"),
    );
    Profile {
        real_name: real_name.to_string(),
        display_name: display_name.to_string(),
        handle,
        title: title.to_string(),
        image_urls,
    }
}

impl RosterSource for InMemorySource {
    fn list_members_page(
        &self,
        _channel: &ChannelId,
        cursor: Option<&str>,
    ) -> Result<MemberPage, SourceError> {
        if let Some(err) = &self.listing_error {
            return Err(err.clone());
        }
        let start = match cursor {
            None => 0,
            Some(c) => c.parse::<usize>().map_err(|_| SourceError::Api {
                method: "conversations.members",
                error: "invalid_cursor".to_string(),
            })?,
        };
        let end = start.saturating_add(self.page_size).min(self.members.len());
        let members = self.members.get(start..end).unwrap_or_default().to_vec();
        let next_cursor = (end < self.members.len()).then(|| end.to_string());
        Ok(MemberPage {
            members,
            next_cursor,
        })
    }

    fn get_profile(&self, member: &MemberId) -> Result<Profile, SourceError> {
        self.profile_requests.borrow_mut().push(member.clone());
        match self.profiles.get(member) {
            Some(result) => result.clone(),
            None => Err(SourceError::Api {
                method: "users.info",
                error: "user_not_found".to_string(),
            }),
        }
    }
}
