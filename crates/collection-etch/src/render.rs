//! Body rendering
//!
//! [`ContentRenderer`] turns a request or response body into a labeled
//! code block. Rendering never fails outward: a body that cannot be
//! formatted yields a visible error block instead.

use crate::config::EtchConfig;
use crate::diagnostics::EtchResult;
use crate::highlight::highlight_json;
use crate::sanitize::{is_base64, Sanitizer, REDACTED};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::fmt;

lazy_static! {
    /// Text that should be tried as JSON
    static ref JSON_START: Regex = Regex::new(r"^\s*[{\[]").unwrap();
}

/// Label shown for ZIP archives
pub const ZIP_LABEL: &str = "ZIP archive (binary content)";

/// Text shown when a body is empty
pub const EMPTY_BODY_TEXT: &str = "No content in the request/response body.";

/// Text shown when a body cannot be formatted
pub const RENDER_ERROR_TEXT: &str = "Error processing content";

/// Which side of an exchange a body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    Request,
    Response,
}

impl fmt::Display for BodyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyLabel::Request => write!(f, "Request body:"),
            BodyLabel::Response => write!(f, "Response body:"),
        }
    }
}

/// Renders body values as HTML code blocks
#[derive(Debug, Clone, Copy)]
pub struct ContentRenderer<'a> {
    config: &'a EtchConfig,
    sanitizer: Sanitizer<'a>,
}

impl<'a> ContentRenderer<'a> {
    /// Create a renderer using the limits in `config`
    pub fn new(config: &'a EtchConfig) -> Self {
        Self {
            config,
            sanitizer: Sanitizer::new(config),
        }
    }

    /// Render a body with the configured maximum raw-text length
    pub fn render(&self, content: &Value, label: BodyLabel) -> String {
        self.render_with_limit(content, label, self.config.max_body_length)
    }

    /// Render a body, cutting raw text after `max_length` characters
    pub fn render_with_limit(
        &self,
        content: &Value,
        label: BodyLabel,
        max_length: usize,
    ) -> String {
        if is_empty_content(content) {
            return empty_block(label);
        }

        match self.format_content(content, max_length) {
            Ok(formatted) => body_block(label, &formatted),
            Err(e) => {
                tracing::warn!("Error processing {} content: {}", label, e);
                error_block(label)
            }
        }
    }

    /// Format a non-empty body as escaped (or highlighted) HTML
    fn format_content(&self, content: &Value, max_length: usize) -> EtchResult<String> {
        match content {
            Value::String(s) => self.format_text(s.trim(), max_length),
            Value::Object(_) | Value::Array(_) => highlight_json(&self.sanitizer.prepare(content)),
            other => Ok(escape_truncated(&other.to_string(), max_length)),
        }
    }

    fn format_text(&self, text: &str, max_length: usize) -> EtchResult<String> {
        if JSON_START.is_match(text) {
            if let Ok(parsed) = serde_json::from_str::<Value>(text) {
                return highlight_json(&self.sanitizer.prepare(&parsed));
            }
        } else if text.starts_with("PK") {
            return Ok(html_escape::encode_text(ZIP_LABEL).to_string());
        }

        if is_base64(text) {
            Ok(REDACTED.to_string())
        } else {
            Ok(escape_truncated(text, max_length))
        }
    }
}

/// Whether a body counts as absent
fn is_empty_content(content: &Value) -> bool {
    match content {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Cut text after `max_length` characters, marking the cut, then escape it
pub(crate) fn escape_truncated(text: &str, max_length: usize) -> String {
    let mut shown: String = text.chars().take(max_length).collect();
    if text.chars().count() > max_length {
        shown.push_str("...");
    }
    html_escape::encode_text(&shown).to_string()
}

fn body_block(label: BodyLabel, formatted: &str) -> String {
    format!(
        "<div class=\"body\">\n<h4>{}</h4>\n<pre class=\"json-highlight\">{}</pre>\n</div>",
        label, formatted
    )
}

fn empty_block(label: BodyLabel) -> String {
    format!(
        "<div class=\"headers\">\n<h4>{}</h4>\n<ul><li>{}</li></ul>\n</div>",
        label, EMPTY_BODY_TEXT
    )
}

/// Block shown in place of a body that failed to render
pub fn error_block(label: BodyLabel) -> String {
    format!(
        "<div class=\"body\">\n<h4>{}</h4>\n<p class=\"error\">{}</p>\n</div>",
        label, RENDER_ERROR_TEXT
    )
}
