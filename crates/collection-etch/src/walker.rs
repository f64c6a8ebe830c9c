//! Collection traversal
//!
//! [`CollectionWalker`] visits the item tree depth-first in input order and
//! produces, in one pass, the flat table of contents and the HTML fragment
//! stream of a page. Both sequences follow the same order, so every visible
//! TOC entry links to a fragment further down the page.
//!
//! Nodes are decoded one at a time. A node that cannot be decoded is logged,
//! recorded as a warning [`Diagnostic`] and skipped along with its subtree;
//! its siblings are still visited.

use crate::collection::{
    classify, status_class, Collection, ItemRecord, NodeKind, Request, Response,
    DEFAULT_FOLDER_NAME, DEFAULT_ITEM_NAME,
};
use crate::config::EtchConfig;
use crate::diagnostics::{Diagnostic, EtchResult};
use crate::markdown::render_description;
use crate::render::{escape_truncated, BodyLabel, ContentRenderer};
use crate::slug::anchor_id;
use crate::toc::TocEntry;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;

/// Characters of a request header value shown
const REQUEST_HEADER_VALUE_LENGTH: usize = 50;

/// Characters of a response header value shown
const RESPONSE_HEADER_VALUE_LENGTH: usize = 100;

/// Output of a traversal
#[derive(Debug, Clone, Default)]
pub struct Walked {
    /// Table of contents entries, in page order
    pub toc: Vec<TocEntry>,
    /// Rendered HTML fragments, in page order
    pub fragments: Vec<String>,
    /// Problems met while visiting nodes
    pub diagnostics: Vec<Diagnostic>,
    /// Number of rendered requests
    pub endpoints: usize,
}

impl Walked {
    /// Append the output of another traversal
    pub fn extend(&mut self, other: Walked) {
        self.toc.extend(other.toc);
        self.fragments.extend(other.fragments);
        self.diagnostics.extend(other.diagnostics);
        self.endpoints += other.endpoints;
    }

    /// The fragments joined into one HTML string
    pub fn content(&self) -> String {
        self.fragments.join("\n")
    }
}

/// Walks a collection's item tree
#[derive(Debug, Clone, Copy)]
pub struct CollectionWalker<'a> {
    config: &'a EtchConfig,
    renderer: ContentRenderer<'a>,
}

impl<'a> CollectionWalker<'a> {
    /// Create a walker using the limits in `config`
    pub fn new(config: &'a EtchConfig) -> Self {
        Self {
            config,
            renderer: ContentRenderer::new(config),
        }
    }

    /// Walk every top-level node of a collection
    pub fn walk_collection(&self, collection: &Collection) -> Walked {
        self.walk(&collection.item, 0)
    }

    /// Walk a list of sibling nodes at the given nesting level.
    ///
    /// `parent_items` is also the list folder classification is checked
    /// against.
    pub fn walk(&self, parent_items: &[Value], level: usize) -> Walked {
        let mut walked = Walked::default();

        for node in parent_items {
            match self.visit(node, parent_items, level) {
                Ok(visited) => walked.extend(visited),
                Err(e) => {
                    let name = node
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or(DEFAULT_ITEM_NAME);
                    tracing::error!("Skipping item '{}': {}", name, e);
                    walked
                        .diagnostics
                        .push(Diagnostic::warning(format!("item skipped: {}", e)).for_item(name));
                }
            }
        }

        walked
    }

    fn visit(&self, node: &Value, parent_items: &[Value], level: usize) -> EtchResult<Walked> {
        let record = ItemRecord::from_value(node)?;

        match classify(&record, parent_items) {
            NodeKind::Folder => Ok(self.visit_folder(&record, level)),
            NodeKind::Request => Ok(self.visit_request(&record, level)),
        }
    }

    fn visit_folder(&self, record: &ItemRecord, level: usize) -> Walked {
        let name = record.name_or(DEFAULT_FOLDER_NAME);
        let id = anchor_id(name);
        tracing::debug!("Folder '{}' at level {}", name, level);

        let mut walked = Walked::default();
        let payload = record.payload();
        walked
            .toc
            .push(TocEntry::folder(name, id.as_str(), level).with_method(record.method()));

        let mut fragment = String::new();
        if payload.is_none() {
            fragment.push_str(&format!(
                "<h2 id=\"{}\" class=\"folder-name\">📁 {}</h2>\n",
                encode_double_quoted_attribute(&id),
                encode_text(name)
            ));
        }
        let description = record.description.as_ref().map(|d| d.text()).unwrap_or("");
        if !description.is_empty() {
            fragment.push_str(&format!(
                "<p>{}</p>\n",
                escape_truncated(description, self.config.max_description_length)
            ));
        }
        if !fragment.is_empty() {
            walked.fragments.push(fragment);
        }

        walked.extend(self.walk(record.children(), level + 1));

        if let Some(request) = payload {
            walked
                .fragments
                .push(self.render_request(name, request, &record.response));
            walked.endpoints += 1;
        }

        walked
    }

    fn visit_request(&self, record: &ItemRecord, level: usize) -> Walked {
        let name = record.name_or(DEFAULT_ITEM_NAME);
        let request = record.request.clone().unwrap_or_default();
        tracing::debug!("Request '{}' at level {}", name, level);

        let mut walked = Walked::default();
        walked.toc.push(
            TocEntry::request(name, anchor_id(name), level)
                .with_method(Some(request.method()))
                .empty(request.has_blank_url()),
        );
        walked
            .fragments
            .push(self.render_request(name, &request, &record.response));
        walked.endpoints = 1;

        walked
    }

    /// Render the section of one request
    pub fn render_request(&self, name: &str, request: &Request, responses: &[Response]) -> String {
        let method = request.method();
        let mut html = String::new();

        html.push_str(&format!(
            "<h2 id=\"{}\">{}</h2>\n",
            encode_double_quoted_attribute(&anchor_id(name)),
            encode_text(name)
        ));
        html.push_str(&format!(
            "<div class=\"method-div\">\n<span class=\"method {}\">{}</span>\n<span class=\"url\">{}</span>\n</div>\n",
            encode_double_quoted_attribute(&method),
            encode_text(&method),
            encode_text(request.display_url())
        ));

        let description = request.description.as_ref().map(|d| d.text()).unwrap_or("");
        if !description.trim().is_empty() {
            html.push_str(&format!(
                "<div class=\"description\">{}</div>\n",
                render_description(description)
            ));
        }

        if !request.header.is_empty() {
            html.push_str("<div class=\"headers\">\n<h4>Headers:</h4>\n<ul>\n");
            for header in &request.header {
                let token = header.value.split_whitespace().next().unwrap_or("");
                html.push_str(&format!(
                    "<li><strong>{}:</strong> {}{}</li>\n",
                    encode_text(&header.key),
                    escape_truncated(token, REQUEST_HEADER_VALUE_LENGTH),
                    if header.disabled { " (disabled)" } else { "" }
                ));
            }
            html.push_str("</ul>\n</div>\n");
        }

        let query = request.query_params();
        let body = if query.is_empty() {
            request.body_value()
        } else {
            Value::Array(query)
        };
        html.push_str(&self.renderer.render(&body, BodyLabel::Request));
        html.push('\n');

        if !responses.is_empty() {
            html.push_str(&self.render_responses(responses));
        }

        html.push_str("<hr class=\"divider\">");
        html
    }

    fn render_responses(&self, responses: &[Response]) -> String {
        let shown = self.config.max_responses.min(responses.len());
        let mut html = String::from("<h3>Example responses:</h3>\n");

        if responses.len() > shown {
            html.push_str(&format!(
                "<p class=\"info\">Showing {} of {} responses ({} more available).</p>\n",
                shown,
                responses.len(),
                responses.len() - shown
            ));
        }

        for response in &responses[..shown] {
            html.push_str(&format!(
                "<h4 class=\"status-div\"><span class=\"status {}\">{}</span><span>{}</span></h4>\n",
                status_class(response.code),
                response.code,
                encode_text(&response.status)
            ));

            let headers: Vec<_> = response
                .header
                .iter()
                .filter(|h| self.config.is_whitelisted_header(&h.key))
                .collect();
            if !headers.is_empty() {
                html.push_str("<div class=\"headers\">\n<h4>Headers:</h4>\n<ul>\n");
                for header in headers {
                    html.push_str(&format!(
                        "<li><strong>{}:</strong> {}</li>\n",
                        encode_text(&header.key),
                        escape_truncated(&header.value, RESPONSE_HEADER_VALUE_LENGTH)
                    ));
                }
                html.push_str("</ul>\n</div>\n");
            }

            html.push_str(&self.renderer.render(&response.body, BodyLabel::Response));
            html.push('\n');
        }

        html
    }
}
