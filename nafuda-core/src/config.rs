//! Per-invocation configuration.
//!
//! The credential and channel are explicit values threaded into the resolver;
//! nothing in the library crates reads the environment.
//!
//! # API pattern
//!
//! Home-relative lookups come in two forms, as elsewhere in the workspace:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::ChannelId;

// ---------------------------------------------------------------------------
// ApiToken
// ---------------------------------------------------------------------------

/// A pre-obtained chat-platform API token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Validate a raw token. Blank or whitespace-containing tokens are rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self, ConfigError> {
        let raw = raw.ok_or(ConfigError::MissingToken)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidToken {
                reason: "contains whitespace",
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Validate a channel identifier as supplied on the command line.
///
/// Channel *names* (`#general`) are rejected; only platform ids are accepted.
pub fn parse_channel(raw: Option<&str>) -> Result<ChannelId, ConfigError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ConfigError::MissingChannel);
    }
    if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::InvalidChannel {
            channel: raw.to_owned(),
        });
    }
    Ok(ChannelId::from(raw))
}

// ---------------------------------------------------------------------------
// RunConfig
// ---------------------------------------------------------------------------

/// Validated inputs for one `render` run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub token: ApiToken,
    pub channel: ChannelId,
}

impl RunConfig {
    /// Build from raw invocation values. Fails before any network call.
    pub fn new(token: Option<&str>, channel: Option<&str>) -> Result<Self, ConfigError> {
        let token = ApiToken::parse(token)?;
        let channel = parse_channel(channel)?;
        Ok(Self { token, channel })
    }
}

// ---------------------------------------------------------------------------
// Template override directory
// ---------------------------------------------------------------------------

/// `<home>/.nafuda/templates` — pure, no I/O.
pub fn template_dir_at(home: &Path) -> PathBuf {
    home.join(".nafuda").join("templates")
}

/// `template_dir_at` convenience wrapper.
pub fn template_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    Ok(template_dir_at(&home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn missing_token_is_rejected_first() {
        let err = RunConfig::new(None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_token_counts_as_missing(#[case] raw: &str) {
        assert!(matches!(
            ApiToken::parse(Some(raw)),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn token_with_inner_space_is_invalid() {
        assert!(matches!(
            ApiToken::parse(Some("xoxb-1 2")),
            Err(ConfigError::InvalidToken { .. })
        ));
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = ApiToken::parse(Some("xoxb-secret")).unwrap();
        assert!(!format!("{token:?}").contains("secret"));
        assert_eq!(token.expose(), "xoxb-secret");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn missing_channel(#[case] raw: Option<&str>) {
        let err = RunConfig::new(Some("xoxb-1"), raw).unwrap_err();
        assert!(matches!(err, ConfigError::MissingChannel));
    }

    #[rstest]
    #[case("#general")]
    #[case("C01 X")]
    fn channel_name_is_rejected(#[case] raw: &str) {
        let err = parse_channel(Some(raw)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChannel { .. }));
        assert!(err.to_string().contains(raw));
    }

    #[test]
    fn valid_config_trims_inputs() {
        let cfg = RunConfig::new(Some(" xoxb-1 "), Some(" C024BE91L ")).unwrap();
        assert_eq!(cfg.token.expose(), "xoxb-1");
        assert_eq!(cfg.channel, ChannelId::from("C024BE91L"));
    }

    #[test]
    fn template_dir_is_under_home() {
        let dir = template_dir_at(Path::new("/home/u"));
        assert_eq!(dir, PathBuf::from("/home/u/.nafuda/templates"));
    }
}
