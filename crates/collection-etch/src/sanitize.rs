//! Content sanitizing and size truncation
//!
//! Bodies are embedded in the generated pages only after two passes over
//! their parsed JSON value:
//!
//! 1. [`Sanitizer::sanitize`] redacts string leaves under sensitive keys,
//!    base64-looking strings and overly long strings.
//! 2. [`Sanitizer::truncate`] bounds the size of what is left: nesting depth,
//!    mapping width, array length and string length.
//!
//! Both passes are pure and always run in that order.

use crate::config::EtchConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

lazy_static! {
    /// Standard base64 alphabet with at most two padding characters
    static ref BASE64_REGEX: Regex = Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").unwrap();
}

/// Replacement for redacted string values
pub const REDACTED: &str = "...";

/// Replacement for subtrees nested deeper than the configured limit
pub const DEPTH_PLACEHOLDER: &str = "... (max depth reached)";

/// Key of the synthetic entry appended to cut-down mappings. Dots are
/// appended while the key is already taken.
pub const TRUNCATED_KEYS_ENTRY: &str = "...";

/// Minimum length for a string to be considered base64
const BASE64_MIN_LENGTH: usize = 100;

/// Characters kept from a string cut down by the truncation pass
const STRING_PREFIX_LENGTH: usize = 100;

const ITEMS_MARKER_PREFIX: &str = "... (";
const ITEMS_MARKER_SUFFIX: &str = " more items)";

/// Check whether a string looks like base64-encoded binary data.
///
/// All four conditions are required: at least 100 characters, a length
/// that is a multiple of 4, only base64 alphabet characters with up to two
/// trailing `=`, and a successful strict decode.
pub fn is_base64(s: &str) -> bool {
    s.len() >= BASE64_MIN_LENGTH
        && s.len() % 4 == 0
        && BASE64_REGEX.is_match(s)
        && STANDARD.decode(s).is_ok()
}

/// Stateless redaction and truncation transforms over JSON values
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer<'a> {
    config: &'a EtchConfig,
}

impl<'a> Sanitizer<'a> {
    /// Create a sanitizer reading its limits from `config`
    pub fn new(config: &'a EtchConfig) -> Self {
        Self { config }
    }

    /// Sanitize then truncate a value
    pub fn prepare(&self, value: &Value) -> Value {
        self.truncate(&self.sanitize(value, ""))
    }

    /// Redact sensitive, base64 and overly long string leaves.
    ///
    /// Mapping values are checked against their own key. Array elements
    /// inherit `parent_key`, so every element of a `password` array is
    /// redacted.
    pub fn sanitize(&self, value: &Value, parent_key: &str) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.sanitize(v, k)))
                    .collect(),
            ),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|v| self.sanitize(v, parent_key))
                    .collect(),
            ),
            Value::String(s) => {
                if self.config.is_sensitive_key(parent_key)
                    || is_base64(s)
                    || s.chars().count() > self.config.redact_string_length
                {
                    Value::String(REDACTED.to_string())
                } else {
                    value.clone()
                }
            }
            _ => value.clone(),
        }
    }

    /// Bound the size of a value. Applying it twice changes nothing.
    pub fn truncate(&self, value: &Value) -> Value {
        self.truncate_at(value, 0)
    }

    fn truncate_at(&self, value: &Value, depth: usize) -> Value {
        if depth > self.config.max_depth {
            return Value::String(DEPTH_PLACEHOLDER.to_string());
        }

        match value {
            Value::Object(map) => self.truncate_object(map, depth),
            Value::Array(items) => self.truncate_array(items, depth),
            Value::String(s) => Value::String(self.truncate_string(s)),
            _ => value.clone(),
        }
    }

    fn truncate_object(&self, map: &Map<String, Value>, depth: usize) -> Value {
        if map.len() <= self.config.max_object_keys {
            return Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.truncate_at(v, depth + 1)))
                    .collect(),
            );
        }

        let kept = self.config.kept_object_keys.min(map.len());
        let mut out: Map<String, Value> = map
            .iter()
            .take(kept)
            .map(|(k, v)| (k.clone(), self.truncate_at(v, depth + 1)))
            .collect();
        // never overwrite a kept key that happens to look like the marker
        let mut marker = TRUNCATED_KEYS_ENTRY.to_string();
        while out.contains_key(&marker) {
            marker.push('.');
        }
        out.insert(marker, Value::String(format!("{} more keys", map.len() - kept)));
        Value::Object(out)
    }

    fn truncate_array(&self, items: &[Value], depth: usize) -> Value {
        // A marker left by an earlier pass is not an item of its own
        let (items, already_dropped) = match items.split_last() {
            Some((last, rest)) => match last.as_str().and_then(parse_items_marker) {
                Some(count) => (rest, count),
                None => (items, 0),
            },
            None => (items, 0),
        };

        let max = self.config.max_array_items;
        let kept = items.len().min(max);
        let dropped = items.len() - kept + already_dropped;

        let mut out: Vec<Value> = items
            .iter()
            .take(kept)
            .map(|v| self.truncate_at(v, depth + 1))
            .collect();
        if dropped > 0 {
            out.push(Value::String(items_marker(dropped)));
        }
        Value::Array(out)
    }

    fn truncate_string(&self, s: &str) -> String {
        if is_base64(s) {
            return REDACTED.to_string();
        }

        let len = s.chars().count();
        if len > self.config.max_string_length {
            let prefix: String = s.chars().take(STRING_PREFIX_LENGTH).collect();
            format!("{}... (truncated, {} chars total)", prefix, len)
        } else {
            s.to_string()
        }
    }
}

fn items_marker(count: usize) -> String {
    format!("{}{}{}", ITEMS_MARKER_PREFIX, count, ITEMS_MARKER_SUFFIX)
}

fn parse_items_marker(s: &str) -> Option<usize> {
    s.strip_prefix(ITEMS_MARKER_PREFIX)?
        .strip_suffix(ITEMS_MARKER_SUFFIX)?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn encoded(bytes: usize) -> String {
        let data: Vec<u8> = (0..bytes).map(|i| (i * 7 % 256) as u8).collect();
        STANDARD.encode(data)
    }

    #[test]
    fn test_is_base64_boundaries() {
        let valid_100 = encoded(75);
        assert_eq!(valid_100.len(), 100);
        assert!(is_base64(&valid_100));

        let valid_96 = encoded(72);
        assert_eq!(valid_96.len(), 96);
        assert!(!is_base64(&valid_96));

        let mut invalid_char = valid_100.clone();
        invalid_char.replace_range(10..11, "!");
        assert!(!is_base64(&invalid_char));

        // Alphabet-only text whose length is not a multiple of 4
        let odd_length = "a".repeat(101);
        assert!(!is_base64(&odd_length));

        // Right shape, but non-zero trailing bits fail the strict decode
        let trailing_bits = format!("{}AAB=", "A".repeat(96));
        assert!(BASE64_REGEX.is_match(&trailing_bits));
        assert!(!is_base64(&trailing_bits));
    }

    #[test]
    fn test_sanitize_sensitive_keys() {
        let config = EtchConfig::default();
        let sanitizer = Sanitizer::new(&config);

        let value = json!({
            "user": {
                "name": "ana",
                "Password": "hunter2",
                "profile": { "oldPassword": "x" }
            },
            "password": ["a", "b", { "nested": "c" }],
            "attempts": 3
        });

        let out = sanitizer.sanitize(&value, "");
        assert_eq!(
            out,
            json!({
                "user": {
                    "name": "ana",
                    "Password": "...",
                    "profile": { "oldPassword": "..." }
                },
                "password": ["...", "...", { "nested": "c" }],
                "attempts": 3
            })
        );
    }

    #[test]
    fn test_sanitize_base64_and_long_strings() {
        let config = EtchConfig::default();
        let sanitizer = Sanitizer::new(&config);

        let value = json!({
            "file": encoded(75),
            "thumb": encoded(72),
            "notes": "x".repeat(801),
            "short": "x ".repeat(400),
            "flag": true
        });

        let out = sanitizer.sanitize(&value, "");
        assert_eq!(out["file"], json!("..."));
        assert_eq!(out["thumb"], json!(encoded(72)));
        assert_eq!(out["notes"], json!("..."));
        assert_eq!(out["short"], json!("x ".repeat(400)));
        assert_eq!(out["flag"], json!(true));
    }

    #[test]
    fn test_truncate_array() {
        let config = EtchConfig::default();
        let sanitizer = Sanitizer::new(&config);

        let out = sanitizer.truncate(&json!([1, 2, 3, 4, 5, 6, 7, 8]));
        assert_eq!(out, json!([1, 2, 3, 4, 5, "... (3 more items)"]));

        let short = json!([1, 2, 3]);
        assert_eq!(sanitizer.truncate(&short), short);
    }

    #[test]
    fn test_truncate_object() {
        let config = EtchConfig::default();
        let sanitizer = Sanitizer::new(&config);

        let wide: Map<String, Value> = (0..25)
            .map(|i| (format!("k{:02}", i), json!(i)))
            .collect();
        let out = sanitizer.truncate(&Value::Object(wide));
        let map = out.as_object().unwrap();

        assert_eq!(map.len(), 11);
        assert_eq!(map.keys().next().map(String::as_str), Some("k00"));
        assert_eq!(map.get("k09"), Some(&json!(9)));
        assert_eq!(map.get("k10"), None);
        assert_eq!(map.get(TRUNCATED_KEYS_ENTRY), Some(&json!("15 more keys")));
    }

    #[test]
    fn test_truncate_object_keeps_real_marker_key() {
        let config = EtchConfig::default();
        let sanitizer = Sanitizer::new(&config);

        let mut wide = Map::new();
        wide.insert(TRUNCATED_KEYS_ENTRY.to_string(), json!("kept"));
        for i in 0..24 {
            wide.insert(format!("k{:02}", i), json!(i));
        }
        let out = sanitizer.truncate(&Value::Object(wide));
        let map = out.as_object().unwrap();

        assert_eq!(map.len(), 11);
        assert_eq!(map.get(TRUNCATED_KEYS_ENTRY), Some(&json!("kept")));
        assert_eq!(map.get("...."), Some(&json!("15 more keys")));
        assert_eq!(sanitizer.truncate(&out), out);
    }

    #[test]
    fn test_truncate_depth() {
        let config = EtchConfig::default();
        let sanitizer = Sanitizer::new(&config);

        let deep = json!({"a": {"b": {"c": {"d": {"e": {"f": {"g": 1}}}}}}});
        let out = sanitizer.truncate(&deep);
        assert_eq!(
            out,
            json!({"a": {"b": {"c": {"d": {"e": {"f": DEPTH_PLACEHOLDER}}}}}})
        );
    }

    #[test]
    fn test_truncate_strings() {
        let config = EtchConfig::default();
        let sanitizer = Sanitizer::new(&config);

        let out = sanitizer.truncate(&json!("é".repeat(1200)));
        let s = out.as_str().unwrap();
        assert!(s.starts_with(&"é".repeat(100)));
        assert!(s.ends_with("... (truncated, 1200 chars total)"));

        // Short base64 strings are hidden even though no length cap applies
        assert_eq!(sanitizer.truncate(&json!(encoded(75))), json!("..."));
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let config = EtchConfig::default();
        let sanitizer = Sanitizer::new(&config);

        let wide: Map<String, Value> = (0..30)
            .map(|i| (format!("k{}", i), json!(vec![i; 9])))
            .collect();
        let list: Vec<u32> = (0..40).collect();
        let value = json!({
            "list": list,
            "wide": wide,
            "deep": {"a": {"b": {"c": {"d": {"e": {"f": {"g": [1, 2]}}}}}}},
            "text": "y".repeat(5000),
            "nested": [[1, 2, 3, 4, 5, 6], [7]]
        });

        let once = sanitizer.truncate(&value);
        let twice = sanitizer.truncate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_prepare_sanitizes_before_truncating() {
        let config = EtchConfig::default();
        let sanitizer = Sanitizer::new(&config);

        let value = json!({"password": ["a", "b", "c", "d", "e", "f", "g"]});
        assert_eq!(
            sanitizer.prepare(&value),
            json!({"password": ["...", "...", "...", "...", "...", "... (2 more items)"]})
        );
    }
}
