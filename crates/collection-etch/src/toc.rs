//! Table of contents
//!
//! The walker emits a flat, ordered list of [`TocEntry`] values carrying a
//! nesting level. [`render_toc`] turns that flat list back into nested
//! `<ul>` markup by opening and closing lists as the level changes between
//! consecutive entries.

use crate::collection::NodeKind;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

/// One entry of the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Display name
    pub name: String,
    /// Anchor id of the matching section
    pub id: String,
    /// Nesting level, 0 for top-level nodes
    pub level: usize,
    /// Folder or request
    pub kind: NodeKind,
    /// HTTP method, for requests and hybrid folders
    pub method: Option<String>,
    /// Hidden from the sidebar (requests without a URL)
    pub is_empty: bool,
}

impl TocEntry {
    /// Create a folder entry
    pub fn folder(name: impl Into<String>, id: impl Into<String>, level: usize) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            level,
            kind: NodeKind::Folder,
            method: None,
            is_empty: false,
        }
    }

    /// Create a request entry
    pub fn request(name: impl Into<String>, id: impl Into<String>, level: usize) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            level,
            kind: NodeKind::Request,
            method: None,
            is_empty: false,
        }
    }

    /// Set the HTTP method
    pub fn with_method(mut self, method: Option<String>) -> Self {
        self.method = method;
        self
    }

    /// Mark the entry as hidden from the sidebar
    pub fn empty(mut self, is_empty: bool) -> Self {
        self.is_empty = is_empty;
        self
    }
}

/// Icon shown in front of a request in the sidebar
pub fn method_icon(method: Option<&str>) -> &'static str {
    match method.map(str::to_uppercase).as_deref() {
        Some("GET") => "🔍",
        Some("POST") => "📝",
        Some("PUT") => "✏️",
        Some("DELETE") => "🗑️",
        Some("PATCH") => "🔧",
        Some("HEAD") => "👀",
        Some("OPTIONS") => "⚙️",
        _ => "📡",
    }
}

/// Render the sidebar list for a sequence of entries.
///
/// Entries flagged empty are skipped. Every list opened for a deeper level
/// is closed again before the outer list ends.
pub fn render_toc(entries: &[TocEntry]) -> String {
    let mut lines = vec![
        "<h2>📋 Contents</h2>".to_string(),
        "<input id=\"search-input\" placeholder=\"🔍 Search items...\" />".to_string(),
        "<ul class=\"toc-list\">".to_string(),
    ];

    let mut current_level = 0;
    for entry in entries.iter().filter(|e| !e.is_empty) {
        while current_level < entry.level {
            lines.push(format!("{}<ul>", indent(current_level)));
            current_level += 1;
        }
        while current_level > entry.level {
            current_level -= 1;
            lines.push(format!("{}</ul>", indent(current_level)));
        }

        let href = encode_double_quoted_attribute(&entry.id);
        let name = encode_text(&entry.name);
        let line = match entry.kind {
            NodeKind::Folder => format!("<li><a href=\"#{}\">📁 {}</a></li>", href, name),
            NodeKind::Request => format!(
                "<li class=\"item\"><a href=\"#{}\">{} {}</a></li>",
                href,
                method_icon(entry.method.as_deref()),
                name
            ),
        };
        lines.push(format!("{}{}", indent(current_level), line));
    }

    while current_level > 0 {
        current_level -= 1;
        lines.push(format!("{}</ul>", indent(current_level)));
    }
    lines.push("</ul>".to_string());

    lines.join("\n")
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}
