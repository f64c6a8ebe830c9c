//! Test utilities and fixtures for collection-etch.
//!
//! Builders for collection documents in the exported JSON shape, so tests
//! can describe a tree of folders and requests without spelling out every
//! field.
//!
//! # Example
//!
//! ```
//! use collection_etch::test::{mock_collection, mock_folder, mock_request};
//!
//! let users = mock_folder("Users", vec![mock_request("List users", "GET", "https://api/users")]);
//! let doc = mock_collection("Accounts", vec![users]);
//! assert_eq!(doc["info"]["name"], "Accounts");
//! ```

use serde_json::{json, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Create a request node with no headers, body or responses.
pub fn mock_request(name: &str, method: &str, url: &str) -> Value {
    json!({
        "name": name,
        "request": {
            "method": method,
            "url": {"raw": url},
            "header": []
        },
        "response": []
    })
}

/// Create a request node with a raw body.
pub fn mock_request_with_body(name: &str, method: &str, url: &str, body: &str) -> Value {
    let mut node = mock_request(name, method, url);
    node["request"]["body"] = json!({"mode": "raw", "raw": body});
    node
}

/// Create a request node with structured query parameters.
///
/// The raw URL carries the query string built from `params`.
pub fn mock_request_with_query(name: &str, url: &str, params: &[(&str, &str)]) -> Value {
    let query: Vec<Value> = params
        .iter()
        .map(|(key, value)| json!({"key": key, "value": value}))
        .collect();
    let query_string: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();

    let mut node = mock_request(name, "GET", url);
    node["request"]["url"] = json!({
        "raw": format!("{}?{}", url, query_string.join("&")),
        "query": query
    });
    node
}

/// Create an example response.
pub fn mock_response(code: u16, status: &str, body: &str) -> Value {
    json!({
        "name": status,
        "code": code,
        "status": status,
        "header": [],
        "body": body
    })
}

/// Attach example responses to a request node.
pub fn with_responses(mut node: Value, responses: Vec<Value>) -> Value {
    node["response"] = Value::Array(responses);
    node
}

/// Create a folder node.
pub fn mock_folder(name: &str, children: Vec<Value>) -> Value {
    json!({
        "name": name,
        "item": children
    })
}

/// Create a collection document.
pub fn mock_collection(name: &str, items: Vec<Value>) -> Value {
    json!({
        "info": {
            "name": name,
            "description": format!("{} endpoints", name),
            "version": "1.0.0"
        },
        "item": items
    })
}

/// Write a collection document to `dir/<file_name>` and return its path.
pub fn write_collection(dir: &Path, file_name: &str, collection: &Value) -> io::Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, collection.to_string())?;
    Ok(path)
}

/// Drop the markup of an HTML fragment, keeping only the text a browser
/// would show.
pub fn visible_text(html: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    html_escape::decode_html_entities(&text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{classify, Collection, ItemRecord, NodeKind};

    #[test]
    fn test_mock_request() {
        let node = mock_request("Ping", "HEAD", "https://api/ping");
        let record = ItemRecord::from_value(&node).unwrap();
        assert_eq!(record.method().as_deref(), Some("HEAD"));
        assert_eq!(record.request.unwrap().raw_url(), "https://api/ping");
    }

    #[test]
    fn test_mock_request_with_query() {
        let node = mock_request_with_query("Search", "https://api/search", &[("q", "x"), ("page", "2")]);
        let record = ItemRecord::from_value(&node).unwrap();
        let request = record.request.unwrap();
        assert_eq!(request.raw_url(), "https://api/search?q=x&page=2");
        assert_eq!(request.query_params().len(), 2);
    }

    #[test]
    fn test_mock_folder_is_folder() {
        let items = vec![mock_folder("Users", vec![mock_request("List", "GET", "https://api/users")])];
        let record = ItemRecord::from_value(&items[0]).unwrap();
        assert_eq!(classify(&record, &items), NodeKind::Folder);
    }

    #[test]
    fn test_visible_text() {
        assert_eq!(visible_text("<p class=\"x\">a &amp; <b>b</b></p>"), "a & b");
    }

    #[test]
    fn test_mock_collection_loads() {
        let dir = tempfile::tempdir().unwrap();
        let doc = mock_collection("Billing", vec![mock_request("Pay", "POST", "https://api/pay")]);
        let path = write_collection(dir.path(), "billing.postman_collection.json", &doc).unwrap();

        let collection = Collection::load(&path).unwrap();
        assert_eq!(collection.name(), "Billing");
        assert_eq!(collection.version(), "1.0.0");
        assert_eq!(collection.item.len(), 1);
    }
}
