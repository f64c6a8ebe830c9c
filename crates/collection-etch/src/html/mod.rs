//! HTML page assembly
//!
//! This module turns the output of a collection traversal into complete,
//! self-contained HTML files: one page per collection and an index page
//! linking all of them. Pages need no build step and no external assets.

pub mod types;

use crate::config::EtchConfig;
use crate::diagnostics::{EtchError, EtchResult};
use crate::embed::AssetBundle;
use crate::render::escape_truncated;
use crate::toc::{render_toc, TocEntry};
use handlebars::Handlebars;
use html_escape::encode_text;
use serde_json::json;
use types::IndexLink;

pub use types::{IndexEntry, PageContext};

/// Timestamp format of the "Generated at" line
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Notice shown when a collection yields no content
pub const NO_ITEMS_NOTICE: &str = "⚠️ No items found in the collection.";

const INDEX_TEMPLATE_NAME: &str = "index";

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>API Documentation - Index</title>
    {{{style}}}
</head>
<body>
<div class="container">
<h1>API Documentation</h1>
{{#if docs}}
<ul>
{{#each docs}}
<li><a href="{{href}}" rel="noopener noreferrer">📁 {{title}}</a></li>
{{/each}}
</ul>
{{else}}
<p class="empty">No documentation was generated.</p>
{{/if}}
</div>
{{{script}}}
</body>
</html>
"##;

/// Assembles collection pages and the index page
pub struct HtmlGenerator {
    assets: AssetBundle,
    max_description_length: usize,
    handlebars: Handlebars<'static>,
}

impl HtmlGenerator {
    /// Create a generator inlining `assets` into every page
    pub fn new(assets: AssetBundle, config: &EtchConfig) -> EtchResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars
            .register_template_string(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)
            .map_err(|e| EtchError::Template(e.to_string()))?;

        Ok(Self {
            assets,
            max_description_length: config.max_description_length,
            handlebars,
        })
    }

    /// Assemble the page of one collection
    ///
    /// # Arguments
    /// * `context` - Collection metadata
    /// * `toc` - Table of contents entries, in page order
    /// * `fragments` - Rendered node fragments, in page order
    pub fn page(&self, context: &PageContext, toc: &[TocEntry], fragments: &[String]) -> String {
        let mut body = String::new();

        body.push_str("<div class=\"sidebar\" id=\"sidebar\">\n");
        if toc.is_empty() {
            body.push_str("<div class=\"toc\"><h2>📋 Contents</h2><p>No items found.</p></div>\n");
        } else {
            body.push_str(&render_toc(toc));
            body.push('\n');
        }
        body.push_str("</div>\n");

        body.push_str(&self.content_header(&context.title));

        if context.has_meta() {
            body.push_str(&self.meta_info(context));
        }

        if fragments.is_empty() {
            body.push_str(&format!("<p>{}</p>\n", NO_ITEMS_NOTICE));
        } else {
            for fragment in fragments {
                body.push_str(fragment);
                body.push('\n');
            }
        }

        // right-content-data, right-content, main-layout
        body.push_str("</div>\n</div>\n</div>\n");

        self.wrap_html(&context.title, &body)
    }

    /// Render the index page linking every generated page
    pub fn index_page(&self, docs: &[IndexEntry]) -> EtchResult<String> {
        let links: Vec<IndexLink> = docs
            .iter()
            .map(|doc| IndexLink {
                href: urlencoding::encode(&doc.file).into_owned(),
                title: &doc.title,
            })
            .collect();

        let data = json!({
            "style": self.assets.index_style_tag(),
            "script": self.assets.script_tag(),
            "docs": links,
        });

        self.handlebars
            .render(INDEX_TEMPLATE_NAME, &data)
            .map_err(|e| EtchError::Template(e.to_string()))
    }

    fn content_header(&self, title: &str) -> String {
        format!(
            r##"<div class="right-content">
<header class="page-header">
    <h1>
        <button class="sidebar-toggle" onclick="toggleSidebar()">☰</button>
        📚 {title}
    </h1>
    <div>
        <button onclick="toggleTheme()" class="send-back theme" title="Toggle theme">🌑 Dark</button>
        <a href="index.html" class="send-back" title="Back to index">🏠 Back</a>
    </div>
</header>
<div class="right-content-data">
"##,
            title = encode_text(title),
        )
    }

    fn meta_info(&self, context: &PageContext) -> String {
        let mut html = String::from("<div class=\"meta-info\">\n");

        if !context.description.is_empty() {
            html.push_str(&format!(
                "<p><strong>Description:</strong> {}</p>\n",
                escape_truncated(&context.description, self.max_description_length)
            ));
        }
        if !context.version.is_empty() {
            html.push_str(&format!(
                "<p><strong>Version:</strong> {}</p>\n",
                encode_text(&context.version)
            ));
        }
        html.push_str(&format!(
            "<p><strong>Generated at:</strong> {}</p>\n",
            encode_text(&context.generated_at)
        ));

        html.push_str("</div>\n");
        html
    }

    /// Wrap page content in HTML boilerplate
    fn wrap_html(&self, title: &str, body: &str) -> String {
        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>API Documentation - {title}</title>
    {style}
</head>
<body>
<div class="main-layout">
{body}{script}
</body>
</html>
"##,
            title = encode_text(title),
            style = self.assets.style_tag(),
            body = body,
            script = self.assets.script_tag(),
        )
    }
}

/// Current local time in the "Generated at" format
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
