//! Run configuration
//!
//! [`EtchConfig`] carries every cap and policy the sanitizer, renderer and
//! walker consult. It is built once per run (defaults, then an optional TOML
//! file, then the environment) and passed down explicitly.

use crate::diagnostics::{EtchError, EtchResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Suffix identifying collection export files in an input directory
pub const DEFAULT_INPUT_SUFFIX: &str = ".postman_collection.json";

/// Immutable configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtchConfig {
    /// Maximum example responses rendered per request
    pub max_responses: usize,
    /// Maximum characters of raw (non-JSON) body text
    pub max_body_length: usize,
    /// Strings longer than this are cut down by the truncation pass
    pub max_string_length: usize,
    /// Strings longer than this are redacted by the sanitizer
    pub redact_string_length: usize,
    /// Maximum array items shown before a truncation marker
    pub max_array_items: usize,
    /// Maximum nesting depth shown before a depth placeholder
    pub max_depth: usize,
    /// Mappings with more entries than this are cut down
    pub max_object_keys: usize,
    /// Entries kept from a cut-down mapping
    pub kept_object_keys: usize,
    /// Key substrings whose string values are redacted (case-insensitive)
    pub sensitive_keys: Vec<String>,
    /// Response header names shown in example responses (case-insensitive)
    pub response_header_whitelist: Vec<String>,
    /// Maximum characters of folder and collection descriptions
    pub max_description_length: usize,
    /// Suffix of collection files picked up from the input directory
    pub input_suffix: String,
}

impl Default for EtchConfig {
    fn default() -> Self {
        Self {
            max_responses: 2,
            max_body_length: 5000,
            max_string_length: 1000,
            redact_string_length: 800,
            max_array_items: 5,
            max_depth: 5,
            max_object_keys: 20,
            kept_object_keys: 10,
            sensitive_keys: vec!["password".to_string()],
            response_header_whitelist: vec![],
            max_description_length: 500,
            input_suffix: DEFAULT_INPUT_SUFFIX.to_string(),
        }
    }
}

impl EtchConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys keep their defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> EtchResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EtchError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| EtchError::config(format!("{}: {}", path.display(), e)))
    }

    /// Overlay values from the process environment
    pub fn from_env(self) -> EtchResult<Self> {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup
    ///
    /// Unset or blank keys leave the current value untouched.
    pub fn with_lookup<F>(mut self, lookup: F) -> EtchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = lookup("MAX_RESPONSES") {
            self.max_responses = parse_number("MAX_RESPONSES", &v)?;
        }
        if let Some(v) = lookup("MAX_JSON_LENGTH") {
            self.max_body_length = parse_number("MAX_JSON_LENGTH", &v)?;
        }
        if let Some(v) = lookup("MAX_STRING_LENGTH") {
            self.max_string_length = parse_number("MAX_STRING_LENGTH", &v)?;
        }
        if let Some(v) = lookup("REDACT_STRING_LENGTH") {
            self.redact_string_length = parse_number("REDACT_STRING_LENGTH", &v)?;
        }
        if let Some(v) = lookup("MAX_ARRAY_ITEMS") {
            self.max_array_items = parse_number("MAX_ARRAY_ITEMS", &v)?;
        }
        if let Some(v) = lookup("MAX_DEPTH") {
            self.max_depth = parse_number("MAX_DEPTH", &v)?;
        }
        if let Some(v) = lookup("SENSITIVE_KEYS") {
            self.sensitive_keys = split_list(&v);
        }
        if let Some(v) = lookup("REQUEST_HEADERS_WHITELIST") {
            self.response_header_whitelist = split_list(&v);
        }

        Ok(self)
    }

    /// Check whether a mapping key names a sensitive field
    pub fn is_sensitive_key(&self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        let key = key.to_lowercase();
        self.sensitive_keys
            .iter()
            .filter(|s| !s.is_empty())
            .any(|s| key.contains(&s.to_lowercase()))
    }

    /// Check whether a response header should be displayed
    pub fn is_whitelisted_header(&self, key: &str) -> bool {
        self.response_header_whitelist
            .iter()
            .any(|h| h.eq_ignore_ascii_case(key.trim()))
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> EtchResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| EtchError::config(format!("{} must be a number, got {:?}", key, value)))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
