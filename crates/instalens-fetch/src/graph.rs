//! The raw `web_profile_info` document.
//!
//! Relevant shape, as observed from the web endpoint:
//!
//! ```text
//! data.user
//!   username, full_name, biography, external_url, category_name
//!   is_private, is_verified, is_business_account
//!   edge_followed_by.count          followers
//!   edge_follow.count               followees
//!   edge_owner_to_timeline_media
//!     count                         total posts
//!     edges[].node                  newest first
//!       shortcode, __typename, is_video, taken_at_timestamp
//!       edge_media_to_caption.edges[0].node.text
//!       edge_sidecar_to_children.edges[]   only on carousels
//!       edge_liked_by.count
//!       edge_media_to_comment.count
//! ```
//!
//! Any of these may be missing or `null`; `data.user` itself is `null` for
//! unknown usernames and for accounts the session cannot see.

use serde_json::Value;

use crate::json_path::value_at;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileGraph(Value);

impl ProfileGraph {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when `body` is not valid JSON.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body).map(Self)
    }

    /// The `data.user` object, if present and non-empty.
    #[must_use]
    pub fn user(&self) -> Option<&Value> {
        value_at(&self.0, &["data", "user"])
            .filter(|user| user.as_object().is_some_and(|obj| !obj.is_empty()))
    }
}
