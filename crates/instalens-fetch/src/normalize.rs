//! Flattening of a [`ProfileGraph`] into [`NormalizedProfile`] and
//! [`NormalizedPost`] records.
//!
//! Every field goes through [`crate::json_path`], so a missing edge object
//! yields `None` for its count instead of an error.

use chrono::DateTime;
use instalens_core::{NormalizedPost, NormalizedProfile};
use serde_json::Value;

use crate::error::FetchError;
use crate::graph::ProfileGraph;
use crate::json_path::{array_at, bool_at, i64_at, str_at, value_at, value_at_or};

static MISSING: Value = Value::Null;

/// Normalizes the user object of a profile graph and its first `limit` posts.
///
/// Post order is preserved from the upstream timeline.
///
/// # Errors
///
/// Returns [`FetchError::NotFoundOrRestricted`] when the graph has no
/// `data.user` object.
pub fn normalize_graph(
    graph: &ProfileGraph,
    limit: usize,
) -> Result<(NormalizedProfile, Vec<NormalizedPost>), FetchError> {
    let user = graph.user().ok_or(FetchError::NotFoundOrRestricted)?;

    let profile = normalize_profile(user);
    let posts = array_at(user, &["edge_owner_to_timeline_media", "edges"])
        .iter()
        .take(limit)
        .map(|edge| normalize_post(value_at_or(edge, &["node"], &MISSING)))
        .collect();

    Ok((profile, posts))
}

/// Maps a `data.user` object to a [`NormalizedProfile`].
#[must_use]
pub fn normalize_profile(user: &Value) -> NormalizedProfile {
    NormalizedProfile {
        username: str_at(user, &["username"]),
        full_name: str_at(user, &["full_name"]),
        followers: i64_at(user, &["edge_followed_by", "count"]),
        followees: i64_at(user, &["edge_follow", "count"]),
        mediacount: i64_at(user, &["edge_owner_to_timeline_media", "count"]),
        is_private: bool_at(user, &["is_private"]),
        is_verified: bool_at(user, &["is_verified"]),
        is_business_account: bool_at(user, &["is_business_account"]).unwrap_or(false),
        biography: str_at(user, &["biography"]),
        external_url: str_at(user, &["external_url"]),
        category_name: str_at(user, &["category_name"]),
    }
}

/// Maps a timeline `node` to a [`NormalizedPost`].
#[must_use]
pub fn normalize_post(node: &Value) -> NormalizedPost {
    let caption = array_at(node, &["edge_media_to_caption", "edges"])
        .first()
        .and_then(|edge| str_at(edge, &["node", "text"]));

    NormalizedPost {
        shortcode: str_at(node, &["shortcode"]),
        date_utc: timestamp_secs(node).and_then(format_timestamp),
        is_video: bool_at(node, &["is_video"]),
        typename: str_at(node, &["__typename"]).unwrap_or_default(),
        mediacount: media_count(node),
        caption,
        likes: i64_at(node, &["edge_liked_by", "count"]),
        comments: i64_at(node, &["edge_media_to_comment", "count"]),
    }
}

/// Number of carousel children, or `1` for a single-media post.
fn media_count(node: &Value) -> i64 {
    let children = array_at(node, &["edge_sidecar_to_children", "edges"]).len();
    if children == 0 {
        1
    } else {
        i64::try_from(children).unwrap_or(i64::MAX)
    }
}

/// `taken_at_timestamp` in whole seconds. Fractional values are floored.
fn timestamp_secs(node: &Value) -> Option<i64> {
    let raw = value_at(node, &["taken_at_timestamp"])?;
    if let Some(secs) = raw.as_i64() {
        return Some(secs);
    }
    let secs = raw.as_f64()?.floor();
    // beyond chrono's range, and keeps the cast below in i64
    if secs.abs() >= 1e17 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let secs = secs as i64;
    Some(secs)
}

/// Formats a Unix timestamp as `YYYY-MM-DDTHH:MM:SS` in UTC.
///
/// Returns `None` for timestamps outside chrono's representable range.
#[must_use]
pub fn format_timestamp(secs: i64) -> Option<String> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
