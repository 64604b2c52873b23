//! Configuration tree primitives
//!
//! Layers are held as `serde_json` mappings. Keys are case-insensitive, so
//! every mapping key is lower-cased when a layer is installed and every
//! lookup path is lower-cased before searching.

pub use serde_json::{Map as JsonMap, Value};

/// A nested mapping from lower-cased keys to configuration values.
pub type Map = JsonMap<String, Value>;

/// Outcome of walking a dot path through one tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Lookup<'a> {
    Found(&'a Value),
    /// A prefix of the path holds a scalar or sequence, hiding anything below it.
    Shadowed,
    Missing,
}

/// Split a dot-delimited key into lower-cased path segments.
///
/// Returns an empty path for the empty key, which never resolves.
pub(crate) fn key_path(key: &str) -> Vec<String> {
    if key.is_empty() {
        return Vec::new();
    }
    key.split('.').map(str::to_lowercase).collect()
}

/// Lower-case every mapping key, recursively through sequences as well.
pub(crate) fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize_map(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

pub(crate) fn normalize_map(map: Map) -> Map {
    map.into_iter()
        .map(|(key, value)| (key.to_lowercase(), normalize(value)))
        .collect()
}

/// Walk `path` through `root`. Null values count as absent.
pub(crate) fn search<'a>(root: &'a Map, path: &[String]) -> Lookup<'a> {
    let Some((last, parents)) = path.split_last() else {
        return Lookup::Missing;
    };

    let mut current = root;
    for segment in parents {
        match current.get(segment) {
            None | Some(Value::Null) => return Lookup::Missing,
            Some(Value::Object(child)) => current = child,
            Some(_) => return Lookup::Shadowed,
        }
    }

    match current.get(last) {
        None | Some(Value::Null) => Lookup::Missing,
        Some(value) => Lookup::Found(value),
    }
}

/// Install `value` at `path`, creating (or replacing with) mappings along the way.
pub(crate) fn insert_path(root: &mut Map, path: &[String], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for segment in parents {
        if !matches!(current.get(segment), Some(Value::Object(_))) {
            current.insert(segment.clone(), Value::Object(Map::new()));
        }
        current = match current.get_mut(segment) {
            Some(Value::Object(child)) => child,
            _ => return,
        };
    }
    current.insert(last.clone(), value);
}

/// Deep-merge `top` onto `base`. Mappings merge key by key; anything else replaces.
pub(crate) fn overlay(base: &mut Map, top: &Map) {
    for (key, value) in top {
        match (base.get_mut(key), value) {
            (Some(Value::Object(base_child)), Value::Object(top_child)) => {
                overlay(base_child, top_child);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Collect dot paths of every leaf. Empty mappings count as leaves.
pub(crate) fn leaf_keys(root: &Map, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in root {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(child) if !child.is_empty() => leaf_keys(child, &path, out),
            _ => out.push(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map {
        match value {
            Value::Object(map) => map,
            other => panic!("expected mapping, got {other}"),
        }
    }

    #[test]
    fn test_key_path_lowercases_segments() {
        assert_eq!(key_path("envValue.URI"), vec!["envvalue", "uri"]);
        assert!(key_path("").is_empty());
    }

    #[test]
    fn test_normalize_lowercases_nested_keys() {
        let value = normalize(json!({"Outer": {"InnerKey": [{"Deep": 1}]}}));
        assert_eq!(value, json!({"outer": {"innerkey": [{"deep": 1}]}}));
    }

    #[test]
    fn test_search_finds_nested_value() {
        let root = map(json!({"redis": {"uri": "redis://local"}}));
        assert_eq!(
            search(&root, &key_path("redis.uri")),
            Lookup::Found(&json!("redis://local"))
        );
    }

    #[test]
    fn test_search_reports_shadowed_prefix() {
        let root = map(json!({"redis": "disabled"}));
        assert_eq!(search(&root, &key_path("redis.uri")), Lookup::Shadowed);
    }

    #[test]
    fn test_search_treats_null_as_missing() {
        let root = map(json!({"a": null, "b": {"c": null}}));
        assert_eq!(search(&root, &key_path("a")), Lookup::Missing);
        assert_eq!(search(&root, &key_path("b.c")), Lookup::Missing);
        assert_eq!(search(&root, &key_path("a.x")), Lookup::Missing);
    }

    #[test]
    fn test_insert_path_replaces_scalar_parent() {
        let mut root = map(json!({"a": 1}));
        insert_path(&mut root, &key_path("a.b"), json!(true));
        assert_eq!(Value::Object(root), json!({"a": {"b": true}}));
    }

    #[test]
    fn test_overlay_merges_mappings_and_replaces_leaves() {
        let mut base = map(json!({"sm": {"c": true}, "x": [1, 2], "y": 1}));
        let top = map(json!({"sm": {"a": 1}, "x": [3]}));
        overlay(&mut base, &top);
        assert_eq!(
            Value::Object(base),
            json!({"sm": {"a": 1, "c": true}, "x": [3], "y": 1})
        );
    }

    #[test]
    fn test_leaf_keys_flattens_paths() {
        let root = map(json!({"a": {"b": 1, "c": {}}, "d": [1]}));
        let mut keys = Vec::new();
        leaf_keys(&root, "", &mut keys);
        keys.sort();
        assert_eq!(keys, vec!["a.b", "a.c", "d"]);
    }
}
