//! Collection input model
//!
//! A collection export is a JSON document of the form
//! `{info: {name, description, version}, item: [...]}` where every item is
//! either a folder (`{name, description?, item: [...]}`) or a request
//! (`{name, request: {...}, response: [...]}`).
//!
//! The item tree is kept as raw [`serde_json::Value`]s. Each node is decoded
//! into an [`ItemRecord`] only when the walker visits it, so a single
//! malformed node can be skipped without rejecting the whole document.

use crate::diagnostics::{EtchError, EtchResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;

/// Default display name for an unnamed collection
pub const DEFAULT_COLLECTION_NAME: &str = "API";

/// Default display name for an unnamed request
pub const DEFAULT_ITEM_NAME: &str = "Untitled";

/// Default display name for an unnamed folder
pub const DEFAULT_FOLDER_NAME: &str = "Folder";

/// Read `null` as the type's default value
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A loaded collection document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    /// Collection metadata
    #[serde(default, deserialize_with = "nullable")]
    pub info: CollectionInfo,
    /// Top-level nodes, undecoded
    #[serde(default, deserialize_with = "nullable")]
    pub item: Vec<Value>,
}

impl Collection {
    /// Parse a collection from JSON text
    pub fn from_json(source: &str, file: impl AsRef<Path>) -> EtchResult<Self> {
        serde_json::from_str(source).map_err(|e| EtchError::decode(file.as_ref(), e))
    }

    /// Load a collection file
    pub fn load(path: impl AsRef<Path>) -> EtchResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EtchError::FileNotFound(path.to_path_buf()));
        }
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source, path)
    }

    /// Display name of the collection
    pub fn name(&self) -> &str {
        self.info
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_COLLECTION_NAME)
    }

    /// Collection description as plain text, empty when absent
    pub fn description(&self) -> &str {
        self.info
            .description
            .as_ref()
            .map(Description::text)
            .unwrap_or("")
    }

    /// Collection version, empty when absent
    pub fn version(&self) -> String {
        match &self.info.version {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// The `info` block of a collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<Description>,
    /// Either a plain string or a structured version object
    #[serde(default)]
    pub version: Option<Value>,
}

/// A description given either as text or as `{content, type}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Rich {
        #[serde(default)]
        content: String,
    },
}

impl Description {
    /// The description text
    pub fn text(&self) -> &str {
        match self {
            Description::Text(s) => s,
            Description::Rich { content } => content,
        }
    }
}

/// One node of the item tree, decoded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<Description>,
    /// Child nodes; present on folders
    #[serde(default)]
    pub item: Option<Vec<Value>>,
    /// Request payload; present on requests and hybrid folders
    #[serde(default)]
    pub request: Option<Request>,
    #[serde(default, deserialize_with = "nullable")]
    pub response: Vec<Response>,
}

impl ItemRecord {
    /// Decode one raw node
    pub fn from_value(value: &Value) -> EtchResult<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Name, falling back to `default` when missing
    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default)
    }

    /// Child nodes, empty for requests
    pub fn children(&self) -> &[Value] {
        self.item.as_deref().unwrap_or(&[])
    }

    /// Request payload, `None` when missing or empty (`"request": {}`)
    pub fn payload(&self) -> Option<&Request> {
        self.request.as_ref().filter(|r| !r.is_empty())
    }

    /// HTTP method of the request payload, if any
    pub fn method(&self) -> Option<String> {
        self.payload().map(Request::method)
    }
}

/// Classification of a node in the item tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Request,
}

/// Decide whether a node is a folder or a request.
///
/// A node is a folder when it has a non-empty child list and its name is
/// among the names of the raw records in `parent_items`, the item list the
/// node was read from.
pub fn classify(record: &ItemRecord, parent_items: &[Value]) -> NodeKind {
    if record.children().is_empty() {
        return NodeKind::Request;
    }

    let name = record.name_or(DEFAULT_FOLDER_NAME);
    let listed = parent_items
        .iter()
        .any(|sibling| sibling.get("name").and_then(Value::as_str) == Some(name));

    if listed {
        NodeKind::Folder
    } else {
        NodeKind::Request
    }
}

/// The `request` block of an item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default, deserialize_with = "nullable")]
    pub header: Vec<Header>,
    #[serde(default)]
    pub body: Option<Body>,
    #[serde(default)]
    pub description: Option<Description>,
}

impl Request {
    /// Whether no field of the request is set
    pub fn is_empty(&self) -> bool {
        self.method.is_none()
            && self.url.is_none()
            && self.header.is_empty()
            && self.body.is_none()
            && self.description.is_none()
    }

    /// HTTP method, `GET` when missing
    pub fn method(&self) -> String {
        self.method
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("GET")
            .to_uppercase()
    }

    /// Raw URL text, empty when missing
    pub fn raw_url(&self) -> &str {
        self.url.as_ref().map(Url::raw).unwrap_or("")
    }

    /// Whether the request has no usable URL
    pub fn has_blank_url(&self) -> bool {
        self.raw_url().trim().is_empty()
    }

    /// Structured query parameters with their values removed
    pub fn query_params(&self) -> Vec<Value> {
        match &self.url {
            Some(Url::Detailed { query, .. }) => query.iter().map(without_value).collect(),
            _ => vec![],
        }
    }

    /// URL as displayed: the query string is dropped when structured
    /// query parameters are rendered separately
    pub fn display_url(&self) -> &str {
        let raw = self.raw_url();
        if self.query_params().is_empty() {
            raw
        } else {
            raw.split('?').next().unwrap_or(raw)
        }
    }

    /// Body value to display: `raw`, then `formdata`, then `urlencoded`
    pub fn body_value(&self) -> Value {
        let Some(body) = &self.body else {
            return Value::Null;
        };

        if let Some(raw) = &body.raw {
            raw.clone()
        } else if let Some(formdata) = &body.formdata {
            formdata.clone()
        } else if let Some(Value::Array(entries)) = &body.urlencoded {
            Value::Array(entries.iter().map(without_value).collect())
        } else {
            body.urlencoded.clone().unwrap_or(Value::Null)
        }
    }
}

/// Drop the `value` field of a key/value record
fn without_value(entry: &Value) -> Value {
    match entry {
        Value::Object(map) => {
            let mut map = map.clone();
            map.remove("value");
            Value::Object(map)
        }
        other => other.clone(),
    }
}

/// A request URL, either plain text or structured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Url {
    Raw(String),
    Detailed {
        #[serde(default)]
        raw: Option<String>,
        #[serde(default, deserialize_with = "nullable")]
        query: Vec<Value>,
    },
}

impl Url {
    /// Raw URL text
    pub fn raw(&self) -> &str {
        match self {
            Url::Raw(raw) => raw,
            Url::Detailed { raw, .. } => raw.as_deref().unwrap_or(""),
        }
    }
}

/// A request or response header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default, deserialize_with = "nullable")]
    pub key: String,
    #[serde(default, deserialize_with = "nullable")]
    pub value: String,
    #[serde(default, deserialize_with = "nullable")]
    pub disabled: bool,
}

/// A request body in any of its modes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub raw: Option<Value>,
    #[serde(default)]
    pub formdata: Option<Value>,
    #[serde(default)]
    pub urlencoded: Option<Value>,
}

/// An example response saved with a request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub code: u16,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub header: Vec<Header>,
    #[serde(default)]
    pub body: Value,
}

/// CSS class of a status badge
pub fn status_class(code: u16) -> &'static str {
    match code {
        200..=299 => "success",
        400..=499 => "warning",
        500..=599 => "error",
        _ => "neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_metadata() {
        let collection = Collection::from_json(
            r#"{"info": {"name": "Billing", "description": {"content": "Invoices"}, "version": "1.2"}, "item": null}"#,
            "billing.json",
        )
        .unwrap();

        assert_eq!(collection.name(), "Billing");
        assert_eq!(collection.description(), "Invoices");
        assert_eq!(collection.version(), "1.2");
        assert!(collection.item.is_empty());

        let bare = Collection::from_json("{}", "bare.json").unwrap();
        assert_eq!(bare.name(), DEFAULT_COLLECTION_NAME);
        assert_eq!(bare.version(), "");
    }

    #[test]
    fn test_decode_error() {
        let err = Collection::from_json("{\"info\": ", "broken.json").unwrap_err();
        assert!(matches!(err, EtchError::Decode { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Collection::load("/nonexistent/api.postman_collection.json").unwrap_err();
        assert!(matches!(err, EtchError::FileNotFound(_)));
    }

    #[test]
    fn test_classify() {
        let siblings = vec![
            json!({"name": "Users", "item": [{"name": "List users", "request": {}}]}),
            json!({"name": "Health", "request": {"url": "https://x/health"}}),
            json!({"name": "Empty", "item": []}),
        ];

        let users = ItemRecord::from_value(&siblings[0]).unwrap();
        let health = ItemRecord::from_value(&siblings[1]).unwrap();
        let empty = ItemRecord::from_value(&siblings[2]).unwrap();

        assert_eq!(classify(&users, &siblings), NodeKind::Folder);
        assert_eq!(classify(&health, &siblings), NodeKind::Request);
        assert_eq!(classify(&empty, &siblings), NodeKind::Request);

        // Not listed among the parent's records
        assert_eq!(classify(&users, &siblings[1..]), NodeKind::Request);
    }

    #[test]
    fn test_empty_request_is_no_payload() {
        let record = ItemRecord::from_value(&json!({"name": "Users", "request": {}})).unwrap();
        assert!(record.request.as_ref().unwrap().is_empty());
        assert!(record.payload().is_none());
        assert_eq!(record.method(), None);

        let record = ItemRecord::from_value(&json!({"name": "Ping", "request": {"method": "head"}})).unwrap();
        assert_eq!(record.method().as_deref(), Some("HEAD"));
    }

    #[test]
    fn test_request_url_forms() {
        let plain: Request = serde_json::from_value(json!({"url": "https://x/y"})).unwrap();
        assert_eq!(plain.raw_url(), "https://x/y");
        assert!(plain.query_params().is_empty());

        let detailed: Request = serde_json::from_value(json!({
            "method": "post",
            "url": {"raw": "https://x/y?a=1&b=2", "query": [{"key": "a", "value": "1"}, {"key": "b", "value": "2"}]}
        }))
        .unwrap();
        assert_eq!(detailed.method(), "POST");
        assert_eq!(detailed.display_url(), "https://x/y");
        assert_eq!(
            detailed.query_params(),
            vec![json!({"key": "a"}), json!({"key": "b"})]
        );

        let blank: Request = serde_json::from_value(json!({"url": {"raw": "  "}})).unwrap();
        assert!(blank.has_blank_url());
        assert!(Request::default().has_blank_url());
    }

    #[test]
    fn test_body_precedence() {
        let request: Request = serde_json::from_value(json!({
            "body": {"mode": "urlencoded", "urlencoded": [{"key": "token", "value": "abc"}]}
        }))
        .unwrap();
        assert_eq!(request.body_value(), json!([{"key": "token"}]));

        let request: Request = serde_json::from_value(json!({
            "body": {"mode": "raw", "raw": "{\"a\":1}", "formdata": []}
        }))
        .unwrap();
        assert_eq!(request.body_value(), json!("{\"a\":1}"));

        assert_eq!(Request::default().body_value(), Value::Null);
    }

    #[test]
    fn test_null_lists() {
        let record = ItemRecord::from_value(&json!({
            "name": "Login",
            "request": {"header": null},
            "response": [{"code": 200, "header": null, "body": null}]
        }))
        .unwrap();
        assert!(record.request.unwrap().header.is_empty());
        assert_eq!(record.response[0].code, 200);
        assert!(record.response[0].header.is_empty());
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(201), "success");
        assert_eq!(status_class(404), "warning");
        assert_eq!(status_class(503), "error");
        assert_eq!(status_class(302), "neutral");
        assert_eq!(status_class(0), "neutral");
    }
}
