//! Channel roster → ordered [`MemberRecord`]s.
//!
//! ## Resolution protocol
//!
//! 1. Page through the membership listing until the cursor runs out. Any
//!    listing failure is fatal; nothing is fetched until every page is in.
//! 2. Fetch each profile in listing order. A failed fetch is logged, recorded
//!    in the [`RunReport`] and skipped. It is never retried.
//! 3. Map each profile to a record (see [`to_record`]).

use std::collections::HashSet;

use chrono::Utc;

use nafuda_core::types::{ChannelId, MemberId, MemberRecord, RunReport};

use crate::error::ResolveError;
use crate::source::{Profile, RosterSource, BADGE_IMAGE_SIZE};

/// Enumerate every member of `channel`, aggregating all pages in order.
pub fn list_all_members<S: RosterSource + ?Sized>(
    channel: &ChannelId,
    source: &S,
) -> Result<Vec<MemberId>, ResolveError> {
    let mut members = Vec::new();
    let mut seen_cursors = HashSet::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = source
            .list_members_page(channel, cursor.as_deref())
            .map_err(|source| ResolveError::Listing {
                channel: channel.clone(),
                source,
            })?;
        tracing::debug!(
            "listed page of {} member(s) for {channel}",
            page.members.len()
        );
        members.extend(page.members);

        match page.next_cursor.filter(|c| !c.is_empty()) {
            None => break,
            Some(next) => {
                if !seen_cursors.insert(next.clone()) {
                    return Err(ResolveError::PaginationLoop {
                        channel: channel.clone(),
                        cursor: next,
                    });
                }
                cursor = Some(next);
            }
        }
    }

    Ok(members)
}

/// Map a fetched profile to a badge record.
///
/// `full_name` falls back from real name to display name to handle. The image
/// is always the 192px URL, or empty when the platform has none at that size.
pub fn to_record(profile: Profile) -> MemberRecord {
    let Profile {
        real_name,
        display_name,
        handle,
        title,
        mut image_urls,
    } = profile;

    let full_name = [real_name.as_str(), display_name.as_str(), handle.as_str()]
        .into_iter()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string();
    let image_ref = image_urls.remove(&BADGE_IMAGE_SIZE).unwrap_or_default();

    MemberRecord::new(full_name, display_name, title, image_ref)
}

/// Resolve a channel's roster into records, in listing order.
///
/// Returns `ResolveError` only when the listing itself fails; per-member
/// failures are recorded in the returned [`RunReport`].
pub fn resolve<S: RosterSource + ?Sized>(
    channel: &ChannelId,
    source: &S,
) -> Result<(Vec<MemberRecord>, RunReport), ResolveError> {
    let mut report = RunReport::new(channel.clone());

    tracing::info!("listing members of {channel}");
    let members = list_all_members(channel, source)?;
    report.listed = members.len();
    tracing::info!("{} member(s) listed for {channel}", members.len());

    let mut records = Vec::with_capacity(members.len());
    for member in members {
        match source.get_profile(&member) {
            Ok(profile) => {
                tracing::debug!("fetched profile for {member}");
                records.push(to_record(profile));
            }
            Err(e) => {
                tracing::warn!("skipping {member}: {e}");
                report.skip(member, e.to_string());
            }
        }
    }

    report.resolved = records.len();
    report.finished_at = Utc::now();
    Ok((records, report))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
