use std::sync::Arc;
use std::time::Duration;

use instalens_core::SessionProvider;
use reqwest::{Client, StatusCode, Url};

use crate::credentials::{credential_status, resolve_headers, CredentialStatus};
use crate::error::FetchError;
use crate::graph::ProfileGraph;

use super::{FetchRequest, ProfileSource, SourceKind};

const PROFILE_INFO_PATH: &str = "api/v1/users/web_profile_info/";

/// Authenticated browser-session client for the `web_profile_info` endpoint.
///
/// Issues exactly one GET per call. Non-200 responses are surfaced as
/// [`FetchError::UpstreamStatus`] and not retried.
///
/// The session credential is looked up from the [`SessionProvider`] on every
/// call, never captured at construction.
pub struct WebProfileSource {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
    sessions: Arc<dyn SessionProvider>,
}

impl WebProfileSource {
    /// Creates a source against `base_url` (scheme + host, e.g.
    /// `https://i.instagram.com`).
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] if the underlying `reqwest::Client` cannot be built.
    /// - [`FetchError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        sessions: Arc<dyn SessionProvider>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        // Exactly one trailing slash, so `join` appends rather than replaces
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| FetchError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            timeout_secs,
            sessions,
        })
    }

    /// Presence of the currently configured credential and user-agent.
    #[must_use]
    pub fn credential_status(&self) -> CredentialStatus {
        credential_status(&self.sessions.current())
    }

    /// Builds the profile-info URL with `username` percent-encoded.
    fn profile_url(&self, username: &str) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(PROFILE_INFO_PATH)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("username", username);
        Ok(url)
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            FetchError::Http(err)
        }
    }
}

impl ProfileSource for WebProfileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Web
    }

    async fn fetch_graph(&self, request: &FetchRequest<'_>) -> Result<ProfileGraph, FetchError> {
        let headers = resolve_headers(&self.sessions.current(), request.credential_override)?;
        let url = self.profile_url(request.username)?;

        tracing::debug!(username = request.username, "requesting web_profile_info");
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = error_body(status, response.text().await);
            tracing::warn!(
                username = request.username,
                status = status.as_u16(),
                "web_profile_info returned non-200"
            );
            return Err(FetchError::upstream_status(status.as_u16(), &body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        Ok(ProfileGraph::from_slice(&body)?)
    }
}

/// Body of a non-200 response; empty when it could not be read.
fn error_body(status: StatusCode, body: Result<String, reqwest::Error>) -> String {
    body.unwrap_or_else(|e| {
        tracing::debug!(
            status = status.as_u16(),
            error = %e,
            "failed to read non-200 response body"
        );
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use instalens_core::{SessionSettings, StaticSessionProvider};

    use super::*;

    fn source(base_url: &str) -> WebProfileSource {
        let sessions = Arc::new(StaticSessionProvider::new(SessionSettings::default()));
        WebProfileSource::new(base_url, 30, sessions).expect("source construction")
    }

    #[test]
    fn profile_url_targets_web_profile_info() {
        let url = source("https://i.instagram.com").profile_url("natgeo").unwrap();
        assert_eq!(
            url.as_str(),
            "https://i.instagram.com/api/v1/users/web_profile_info/?username=natgeo"
        );
    }

    #[test]
    fn profile_url_strips_trailing_slash() {
        let url = source("https://i.instagram.com/").profile_url("a.b_c").unwrap();
        assert_eq!(
            url.as_str(),
            "https://i.instagram.com/api/v1/users/web_profile_info/?username=a.b_c"
        );
    }

    #[test]
    fn profile_url_encodes_username() {
        let url = source("https://i.instagram.com").profile_url("a&b=c").unwrap();
        assert!(
            url.as_str().ends_with("?username=a%26b%3Dc"),
            "username should be percent-encoded: {url}"
        );
    }

    #[test]
    fn unreadable_error_body_becomes_empty_excerpt() {
        let read_error = Client::new()
            .get("not a url")
            .build()
            .expect_err("relative URL should not build");
        let body = error_body(StatusCode::BAD_GATEWAY, Err(read_error));
        assert_eq!(body, "");
        assert_eq!(
            FetchError::upstream_status(502, &body).to_string(),
            "502: "
        );
    }

    #[test]
    fn readable_error_body_is_kept() {
        let body = error_body(StatusCode::TOO_MANY_REQUESTS, Ok("rate limited".to_string()));
        assert_eq!(body, "rate limited");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let sessions = Arc::new(StaticSessionProvider::default());
        let result = WebProfileSource::new("not a url", 30, sessions);
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
