//! Outbound header set for the authenticated web endpoint.
//!
//! The upstream only answers `web_profile_info` for requests that look like a
//! logged-in browser tab: a `sessionid` cookie, the public web app id, and
//! same-origin `Referer`/`Origin` headers.

use instalens_core::SessionSettings;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE, ORIGIN, REFERER,
    USER_AGENT,
};

use crate::error::CredentialError;

/// User-agent sent when `IG_USER_AGENT` is not configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Public identifier of the platform's web client.
pub const WEB_APP_ID: &str = "936619743392459";

const WEB_ORIGIN: &str = "https://www.instagram.com";
const WEB_REFERER: &str = "https://www.instagram.com/";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Presence-only view of the credential configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialStatus {
    pub has_session: bool,
    pub ua_set: bool,
}

/// Reports whether a session credential and a user-agent are available,
/// without exposing either value.
///
/// `ua_set` counts the built-in default, so it is `true` whenever an outbound
/// request would carry a user-agent.
#[must_use]
pub fn credential_status(settings: &SessionSettings) -> CredentialStatus {
    CredentialStatus {
        has_session: settings.session_id.is_some(),
        ua_set: !effective_user_agent(settings).is_empty(),
    }
}

/// User-agent that will be sent: the configured one, else [`DEFAULT_USER_AGENT`].
#[must_use]
pub fn effective_user_agent(settings: &SessionSettings) -> &str {
    settings.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
}

/// Builds the request headers for one upstream call.
///
/// A non-blank `credential_override` takes precedence over the configured
/// session id.
///
/// # Errors
///
/// - [`CredentialError::MissingSession`] when neither the override nor the
///   settings carry a session id.
/// - [`CredentialError::InvalidHeader`] when the session id or user-agent
///   contains bytes that cannot appear in a header value.
pub fn resolve_headers(
    settings: &SessionSettings,
    credential_override: Option<&str>,
) -> Result<HeaderMap, CredentialError> {
    let session_id = credential_override
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or(settings.session_id.as_deref())
        .ok_or(CredentialError::MissingSession)?;

    let user_agent = HeaderValue::from_str(effective_user_agent(settings))
        .map_err(|_| CredentialError::InvalidHeader { header: "User-Agent" })?;
    let cookie = HeaderValue::from_str(&format!("sessionid={session_id};"))
        .map_err(|_| CredentialError::InvalidHeader { header: "Cookie" })?;

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, user_agent);
    headers.insert(REFERER, HeaderValue::from_static(WEB_REFERER));
    headers.insert(ORIGIN, HeaderValue::from_static(WEB_ORIGIN));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
    );
    headers.insert(
        "x-requested-with",
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert("x-ig-app-id", HeaderValue::from_static(WEB_APP_ID));
    headers.insert(COOKIE, cookie);
    Ok(headers)
}
