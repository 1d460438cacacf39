use thiserror::Error;

/// Maximum number of characters of an upstream error body echoed back.
pub const ERROR_BODY_EXCERPT_CHARS: usize = 200;

/// Message for an upstream response without a `data.user` object.
pub const NOT_FOUND_OR_RESTRICTED: &str = "user not found or access restricted";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "no session credential: IG_SESSIONID is not set; configure the session credential in the service environment"
    )]
    MissingSession,

    #[error("invalid value for header {header}: contains characters not allowed in HTTP headers")]
    InvalidHeader { header: &'static str },
}

/// Every way a profile fetch can fail.
///
/// The `Display` output is what callers receive in the `error` field.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("{status}: {excerpt}")]
    UpstreamStatus { status: u16, excerpt: String },

    /// The upstream answered without a user object. Nonexistent and
    /// private/blocked accounts look identical here.
    #[error("user not found or access restricted")]
    NotFoundOrRestricted,

    #[error("profile {username} does not exist")]
    ProfileNotFound { username: String },

    #[error("upstream request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("{}", with_sources(.0))]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON in profile response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("snapshot read failed: {0}")]
    Snapshot(#[from] std::io::Error),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Builds [`FetchError::UpstreamStatus`] keeping only the first
    /// [`ERROR_BODY_EXCERPT_CHARS`] characters of `body`.
    #[must_use]
    pub fn upstream_status(status: u16, body: &str) -> Self {
        Self::UpstreamStatus {
            status,
            excerpt: body.chars().take(ERROR_BODY_EXCERPT_CHARS).collect(),
        }
    }

    /// Short machine-readable label used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Credential(CredentialError::MissingSession) => "missing_credential",
            Self::Credential(CredentialError::InvalidHeader { .. }) => "invalid_credential",
            Self::UpstreamStatus { .. } => "upstream_status",
            Self::NotFoundOrRestricted => "not_found_or_restricted",
            Self::ProfileNotFound { .. } => "profile_not_found",
            Self::Timeout { .. } => "timeout",
            Self::Http(_) => "http",
            Self::Decode(_) => "decode",
            Self::Snapshot(_) => "snapshot",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }
}

/// Renders `err` followed by each `source()` in its chain, `: `-separated.
fn with_sources(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !rendered.ends_with(&cause_text) {
            rendered.push_str(": ");
            rendered.push_str(&cause_text);
        }
        source = cause.source();
    }
    rendered
}
