//! Anchor ids and output file names
//!
//! Anchor ids are deliberately simple so that they stay predictable for
//! anyone linking into a generated page: the node name lower-cased, with
//! spaces and `/` replaced by `-`. Two nodes with the same name share an id.

use std::path::Path;

/// Generate the in-page anchor id for a node name.
///
/// # Examples
///
/// ```
/// use collection_etch::slug::anchor_id;
///
/// assert_eq!(anchor_id("List Users"), "list-users");
/// assert_eq!(anchor_id("Orders/Refund"), "orders-refund");
/// ```
pub fn anchor_id(name: &str) -> String {
    name.to_lowercase().replace([' ', '/'], "-")
}

/// Name of the HTML page generated from a collection file.
///
/// Strips `suffix` from the file name (falling back to the file stem) and
/// lower-cases the rest.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use collection_etch::slug::page_file_name;
///
/// let path = Path::new("in/Billing.postman_collection.json");
/// assert_eq!(page_file_name(path, ".postman_collection.json"), "billing.html");
/// ```
pub fn page_file_name(path: &Path, suffix: &str) -> String {
    let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    let stem = match file_name.strip_suffix(suffix) {
        Some(stem) if !suffix.is_empty() => stem.to_string(),
        _ => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("collection")
            .to_string(),
    };
    format!("{}.html", stem.to_lowercase())
}
