//! Client-facing output schema for a profile analysis.
//!
//! Every `Option` field serializes as an explicit `null` rather than being
//! omitted: the dashboard reads a fixed shape.

use serde::{Deserialize, Serialize};

/// Upper bound on the number of posts returned by one analysis.
pub const MAX_POST_LIMIT: i64 = 60;

/// Flattened profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedProfile {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub followers: Option<i64>,
    pub followees: Option<i64>,
    pub mediacount: Option<i64>,
    pub is_private: Option<bool>,
    pub is_verified: Option<bool>,
    pub is_business_account: bool,
    pub biography: Option<String>,
    pub external_url: Option<String>,
    pub category_name: Option<String>,
}

/// Flattened post record, one per timeline edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPost {
    pub shortcode: Option<String>,
    /// `YYYY-MM-DDTHH:MM:SS` in UTC, no offset suffix.
    pub date_utc: Option<String>,
    pub is_video: Option<bool>,
    pub typename: String,
    /// Number of media items; `1` unless the post is a carousel.
    pub mediacount: i64,
    pub caption: Option<String>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
}

/// Outcome of an analysis: either profile + posts, or an error message.
///
/// Serialized untagged, so the wire shape is `{"profile": .., "posts": [..]}`
/// or `{"error": ".."}` and never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Success {
        profile: NormalizedProfile,
        posts: Vec<NormalizedPost>,
    },
    Failure {
        error: String,
    },
}

impl AnalysisResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the error message for a failed analysis.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success { .. } => None,
        }
    }

    #[must_use]
    pub fn post_count(&self) -> usize {
        match self {
            Self::Success { posts, .. } => posts.len(),
            Self::Failure { .. } => 0,
        }
    }
}
