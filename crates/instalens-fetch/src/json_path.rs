//! Defensive accessors over untyped JSON.
//!
//! Upstream profile graphs omit, null out, or reshape nested objects freely.
//! Each accessor walks a path of object keys and stops at the first segment
//! that is missing or not an object, so callers never branch on
//! intermediate nulls.

use serde_json::Value;

/// Returns the value at `path`, or `None` at the first missing or
/// non-object segment. An empty path returns `root`.
#[must_use]
pub fn value_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |node, key| node.as_object()?.get(*key))
}

/// Like [`value_at`], falling back to `default` when the path does not resolve.
#[must_use]
pub fn value_at_or<'a>(root: &'a Value, path: &[&str], default: &'a Value) -> &'a Value {
    value_at(root, path).unwrap_or(default)
}

/// String at `path`; `None` when absent, null, or not a string.
#[must_use]
pub fn str_at(root: &Value, path: &[&str]) -> Option<String> {
    value_at(root, path)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

/// Integer at `path`; `None` when absent, null, or not an integer.
#[must_use]
pub fn i64_at(root: &Value, path: &[&str]) -> Option<i64> {
    value_at(root, path).and_then(Value::as_i64)
}

/// Boolean at `path`; `None` when absent, null, or not a boolean.
#[must_use]
pub fn bool_at(root: &Value, path: &[&str]) -> Option<bool> {
    value_at(root, path).and_then(Value::as_bool)
}

/// Array at `path`; an empty slice when absent, null, or not an array.
#[must_use]
pub fn array_at<'a>(root: &'a Value, path: &[&str]) -> &'a [Value] {
    value_at(root, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
