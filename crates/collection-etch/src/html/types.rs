//! HTML generation types
//!
//! Supporting types for page and index assembly.

use serde::{Deserialize, Serialize};

/// Collection metadata shown on a page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContext {
    /// Collection name
    pub title: String,
    /// Collection description, empty when absent
    pub description: String,
    /// Collection version, empty when absent
    pub version: String,
    /// Generation timestamp, already formatted
    pub generated_at: String,
}

impl PageContext {
    /// Whether the meta block is shown
    pub fn has_meta(&self) -> bool {
        !self.description.is_empty() || !self.version.is_empty()
    }
}

/// A generated page listed on the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Output file name, relative to the index
    pub file: String,
    /// Collection name
    pub title: String,
}

/// Link data handed to the index template
#[derive(Debug, Clone, Serialize)]
pub(crate) struct IndexLink<'a> {
    pub href: String,
    pub title: &'a str,
}
