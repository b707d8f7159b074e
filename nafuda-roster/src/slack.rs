//! Slack Web API implementation of [`RosterSource`].
//!
//! | Operation            | Endpoint               | Notes                               |
//! |----------------------|------------------------|-------------------------------------|
//! | `list_members_page`  | `conversations.members`| cursor paginated, `limit=200`       |
//! | `get_profile`        | `users.info`           | `real_name`, `profile.*`            |
//!
//! Every request carries `Authorization: Bearer <token>` and runs on a blocking
//! `ureq` agent with a finite timeout. Slack reports most failures as HTTP 200
//! with `{"ok": false, "error": "..."}`; those become [`SourceError::Api`].

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use nafuda_core::config::ApiToken;
use nafuda_core::types::{ChannelId, MemberId};

use crate::error::SourceError;
use crate::source::{MemberPage, Profile, RosterSource};

pub const DEFAULT_API_BASE: &str = "https://slack.com/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const PAGE_LIMIT: &str = "200";
const MEMBERS_METHOD: &str = "conversations.members";
const USER_INFO_METHOD: &str = "users.info";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MembersResponse {
    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    user: SlackUser,
}

#[derive(Debug, Deserialize)]
struct SlackUser {
    #[serde(default)]
    name: String,
    #[serde(default)]
    real_name: String,
    #[serde(default)]
    profile: SlackProfile,
}

#[derive(Debug, Default, Deserialize)]
struct SlackProfile {
    #[serde(default)]
    real_name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    title: String,
    image_24: Option<String>,
    image_32: Option<String>,
    image_48: Option<String>,
    image_72: Option<String>,
    image_192: Option<String>,
    image_512: Option<String>,
    image_1024: Option<String>,
}

impl From<SlackUser> for Profile {
    fn from(user: SlackUser) -> Self {
        let p = user.profile;
        let image_urls: BTreeMap<u32, String> = [
            (24, p.image_24),
            (32, p.image_32),
            (48, p.image_48),
            (72, p.image_72),
            (192, p.image_192),
            (512, p.image_512),
            (1024, p.image_1024),
        ]
        .into_iter()
        .filter_map(|(size, url)| url.filter(|u| !u.is_empty()).map(|u| (size, u)))
        .collect();

        // Top-level real_name is canonical; the profile copy covers older payloads.
        let real_name = if user.real_name.is_empty() {
            p.real_name
        } else {
            user.real_name
        };

        Profile {
            real_name,
            display_name: p.display_name,
            handle: user.name,
            title: p.title,
            image_urls,
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn decode_err(method: &'static str, e: serde_json::Error) -> SourceError {
    SourceError::Decode {
        method,
        message: e.to_string(),
    }
}

/// Check the `ok` envelope, then decode the method-specific payload.
fn decode<T: DeserializeOwned>(method: &'static str, body: &str) -> Result<T, SourceError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| decode_err(method, e))?;
    let envelope: Envelope =
        serde_json::from_value(value.clone()).map_err(|e| decode_err(method, e))?;
    if !envelope.ok {
        return Err(SourceError::Api {
            method,
            error: envelope.error.unwrap_or_else(|| "unknown_error".to_string()),
        });
    }
    serde_json::from_value(value).map_err(|e| decode_err(method, e))
}

pub(crate) fn decode_members_page(body: &str) -> Result<MemberPage, SourceError> {
    let resp: MembersResponse = decode(MEMBERS_METHOD, body)?;
    let next_cursor = resp
        .response_metadata
        .map(|m| m.next_cursor)
        .filter(|c| !c.is_empty());
    Ok(MemberPage {
        members: resp.members.into_iter().map(MemberId::from).collect(),
        next_cursor,
    })
}

pub(crate) fn decode_profile(body: &str) -> Result<Profile, SourceError> {
    let resp: UserInfoResponse = decode(USER_INFO_METHOD, body)?;
    Ok(resp.user.into())
}

// ---------------------------------------------------------------------------
// SlackClient
// ---------------------------------------------------------------------------

/// Blocking Slack client. Create once per run and reuse; the agent pools connections.
pub struct SlackClient {
    agent: ureq::Agent,
    token: ApiToken,
    base_url: String,
}

impl SlackClient {
    pub fn new(token: ApiToken) -> Self {
        Self::with_options(token, DEFAULT_API_BASE, DEFAULT_TIMEOUT)
    }

    /// Construct with a custom API base (e.g. an enterprise proxy) and timeout.
    pub fn with_options(token: ApiToken, base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("nafuda/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn get(&self, method: &'static str, query: &[(&str, &str)]) -> Result<String, SourceError> {
        let url = format!("{}/{}", self.base_url, method);
        let mut request = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token.expose()));
        for (key, value) in query {
            request = request.query(key, value);
        }

        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(status, _) => SourceError::Status { method, status },
            ureq::Error::Transport(t) => SourceError::Transport {
                method,
                message: t.to_string(),
            },
        })?;
        response.into_string().map_err(|e| SourceError::Transport {
            method,
            message: e.to_string(),
        })
    }
}

impl RosterSource for SlackClient {
    fn list_members_page(
        &self,
        channel: &ChannelId,
        cursor: Option<&str>,
    ) -> Result<MemberPage, SourceError> {
        let mut query = vec![("channel", channel.0.as_str()), ("limit", PAGE_LIMIT)];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }
        let body = self.get(MEMBERS_METHOD, &query)?;
        decode_members_page(&body)
    }

    fn get_profile(&self, member: &MemberId) -> Result<Profile, SourceError> {
        let body = self.get(USER_INFO_METHOD, &[("user", member.0.as_str())])?;
        decode_profile(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
