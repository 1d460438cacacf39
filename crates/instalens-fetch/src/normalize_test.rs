use serde_json::json;

use super::*;

fn post_node(shortcode: &str) -> Value {
    json!({
        "__typename": "GraphImage",
        "shortcode": shortcode,
        "is_video": false,
        "taken_at_timestamp": 1_700_000_000,
        "edge_media_to_caption": {"edges": [{"node": {"text": "first caption"}}]},
        "edge_liked_by": {"count": 120},
        "edge_media_to_comment": {"count": 4}
    })
}

fn graph_with_posts(count: usize) -> ProfileGraph {
    let edges: Vec<Value> = (0..count)
        .map(|i| json!({"node": post_node(&format!("C{i}"))}))
        .collect();
    ProfileGraph::new(json!({
        "data": {
            "user": {
                "username": "natgeo",
                "full_name": "National Geographic",
                "biography": "Experience the world",
                "external_url": "https://natgeo.com",
                "category_name": "Media/news company",
                "is_private": false,
                "is_verified": true,
                "is_business_account": true,
                "edge_followed_by": {"count": 280_000_000},
                "edge_follow": {"count": 150},
                "edge_owner_to_timeline_media": {"count": 29_000, "edges": edges}
            }
        },
        "status": "ok"
    }))
}

// -----------------------------------------------------------------------
// normalize_graph
// -----------------------------------------------------------------------

#[test]
fn normalize_graph_maps_profile_fields() {
    let (profile, _) = normalize_graph(&graph_with_posts(0), 60).unwrap();
    assert_eq!(profile.username.as_deref(), Some("natgeo"));
    assert_eq!(profile.full_name.as_deref(), Some("National Geographic"));
    assert_eq!(profile.followers, Some(280_000_000));
    assert_eq!(profile.followees, Some(150));
    assert_eq!(profile.mediacount, Some(29_000));
    assert_eq!(profile.is_private, Some(false));
    assert_eq!(profile.is_verified, Some(true));
    assert!(profile.is_business_account);
    assert_eq!(profile.external_url.as_deref(), Some("https://natgeo.com"));
    assert_eq!(
        profile.category_name.as_deref(),
        Some("Media/news company")
    );
}

#[test]
fn normalize_graph_truncates_to_limit_preserving_order() {
    let (_, posts) = normalize_graph(&graph_with_posts(10), 3).unwrap();
    let codes: Vec<_> = posts.iter().filter_map(|p| p.shortcode.as_deref()).collect();
    assert_eq!(codes, ["C0", "C1", "C2"]);
}

#[test]
fn normalize_graph_returns_fewer_posts_than_limit_when_timeline_is_short() {
    let (_, posts) = normalize_graph(&graph_with_posts(2), 60).unwrap();
    assert_eq!(posts.len(), 2);
}

#[test]
fn normalize_graph_without_user_is_not_found() {
    for doc in [
        json!({}),
        json!({"data": {}}),
        json!({"data": {"user": null}}),
        json!({"data": {"user": {}}}),
        json!({"data": null}),
        json!(null),
    ] {
        let err = normalize_graph(&ProfileGraph::new(doc.clone()), 60).unwrap_err();
        assert!(
            matches!(err, FetchError::NotFoundOrRestricted),
            "expected NotFoundOrRestricted for {doc}, got: {err:?}"
        );
    }
}

#[test]
fn normalize_graph_without_timeline_yields_no_posts() {
    let graph = ProfileGraph::new(json!({"data": {"user": {"username": "ghost"}}}));
    let (profile, posts) = normalize_graph(&graph, 60).unwrap();
    assert!(posts.is_empty());
    assert_eq!(profile.mediacount, None);
}

#[test]
fn normalize_graph_is_deterministic() {
    let graph = graph_with_posts(5);
    let first = serde_json::to_string(&normalize_graph(&graph, 60).unwrap()).unwrap();
    let second = serde_json::to_string(&normalize_graph(&graph, 60).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn edge_without_node_becomes_empty_post() {
    let graph = ProfileGraph::new(json!({
        "data": {"user": {"username": "x", "edge_owner_to_timeline_media": {"edges": [{}]}}}
    }));
    let (_, posts) = normalize_graph(&graph, 60).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].shortcode, None);
    assert_eq!(posts[0].typename, "");
    assert_eq!(posts[0].mediacount, 1);
}

// -----------------------------------------------------------------------
// normalize_profile
// -----------------------------------------------------------------------

#[test]
fn normalize_profile_missing_edges_yield_null_counts() {
    let profile = normalize_profile(&json!({"username": "bare", "edge_follow": null}));
    assert_eq!(profile.followers, None);
    assert_eq!(profile.followees, None);
    assert_eq!(profile.mediacount, None);
    assert_eq!(profile.is_private, None);
    assert_eq!(profile.biography, None);
}

#[test]
fn normalize_profile_business_flag_defaults_to_false() {
    assert!(!normalize_profile(&json!({"username": "a"})).is_business_account);
    assert!(!normalize_profile(&json!({"is_business_account": null})).is_business_account);
}

// -----------------------------------------------------------------------
// normalize_post
// -----------------------------------------------------------------------

#[test]
fn normalize_post_maps_counts_and_caption() {
    let post = normalize_post(&post_node("Cxyz"));
    assert_eq!(post.shortcode.as_deref(), Some("Cxyz"));
    assert_eq!(post.caption.as_deref(), Some("first caption"));
    assert_eq!(post.likes, Some(120));
    assert_eq!(post.comments, Some(4));
    assert_eq!(post.is_video, Some(false));
    assert_eq!(post.typename, "GraphImage");
    assert_eq!(post.date_utc.as_deref(), Some("2023-11-14T22:13:20"));
}

#[test]
fn normalize_post_without_sidecar_is_single_media() {
    let post = normalize_post(&json!({"shortcode": "a"}));
    assert_eq!(post.mediacount, 1);
}

#[test]
fn normalize_post_with_empty_sidecar_is_single_media() {
    let post = normalize_post(&json!({"edge_sidecar_to_children": {"edges": []}}));
    assert_eq!(post.mediacount, 1);
}

#[test]
fn normalize_post_counts_sidecar_children() {
    let post = normalize_post(&json!({
        "__typename": "GraphSidecar",
        "edge_sidecar_to_children": {"edges": [{"node": {}}, {"node": {}}, {"node": {}}]}
    }));
    assert_eq!(post.mediacount, 3);
}

#[test]
fn normalize_post_without_caption_edges_has_null_caption() {
    let post = normalize_post(&json!({"edge_media_to_caption": {"edges": []}}));
    assert_eq!(post.caption, None);
    let post = normalize_post(&json!({}));
    assert_eq!(post.caption, None);
}

#[test]
fn normalize_post_uses_only_first_caption_edge() {
    let post = normalize_post(&json!({
        "edge_media_to_caption": {"edges": [
            {"node": {"text": "one"}},
            {"node": {"text": "two"}}
        ]}
    }));
    assert_eq!(post.caption.as_deref(), Some("one"));
}

#[test]
fn normalize_post_caption_edge_without_text_is_null() {
    let post = normalize_post(&json!({"edge_media_to_caption": {"edges": [{"node": {}}]}}));
    assert_eq!(post.caption, None);
}

#[test]
fn normalize_post_epoch_timestamp() {
    let post = normalize_post(&json!({"taken_at_timestamp": 0}));
    assert_eq!(post.date_utc.as_deref(), Some("1970-01-01T00:00:00"));
}

#[test]
fn normalize_post_float_timestamp_is_truncated_to_seconds() {
    let post = normalize_post(&json!({"taken_at_timestamp": 1_700_000_000.0}));
    assert_eq!(post.date_utc.as_deref(), Some("2023-11-14T22:13:20"));

    let post = normalize_post(&json!({"taken_at_timestamp": 1_700_000_000.75}));
    assert_eq!(post.date_utc.as_deref(), Some("2023-11-14T22:13:20"));
}

#[test]
fn normalize_post_non_numeric_timestamp_is_null() {
    let post = normalize_post(&json!({"taken_at_timestamp": "yesterday"}));
    assert_eq!(post.date_utc, None);
    let post = normalize_post(&json!({"taken_at_timestamp": 1e300}));
    assert_eq!(post.date_utc, None);
}

#[test]
fn normalize_post_missing_fields_are_null() {
    let post = normalize_post(&json!({}));
    assert_eq!(post.date_utc, None);
    assert_eq!(post.is_video, None);
    assert_eq!(post.likes, None);
    assert_eq!(post.comments, None);
    assert_eq!(post.typename, "");
}

#[test]
fn format_timestamp_out_of_range_is_none() {
    assert_eq!(format_timestamp(i64::MAX), None);
}
