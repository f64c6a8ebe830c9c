//! Static assets for generated pages
//!
//! Every page is a single self-contained HTML file: the stylesheet and the
//! script are inlined into it. The default assets are compiled into the
//! crate; an assets directory can replace any of them at run time.

use crate::diagnostics::EtchResult;
use std::fs;
use std::path::Path;

/// Default page stylesheet
pub const DEFAULT_CSS: &str = include_str!("../assets/api.css");

/// Default page script
pub const DEFAULT_JS: &str = include_str!("../assets/api.js");

/// Default index page stylesheet
pub const DEFAULT_INDEX_CSS: &str = include_str!("../assets/index.css");

/// File names looked up in an assets directory
pub const CSS_FILE: &str = "api.css";
pub const JS_FILE: &str = "api.js";
pub const INDEX_CSS_FILE: &str = "index.css";

/// The assets inlined into generated pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBundle {
    /// Stylesheet of collection pages
    pub stylesheet: String,
    /// Script of collection and index pages
    pub script: String,
    /// Stylesheet of the index page
    pub index_stylesheet: String,
}

impl Default for AssetBundle {
    fn default() -> Self {
        Self::embedded()
    }
}

impl AssetBundle {
    /// The assets compiled into the crate
    pub fn embedded() -> Self {
        Self {
            stylesheet: DEFAULT_CSS.to_string(),
            script: DEFAULT_JS.to_string(),
            index_stylesheet: DEFAULT_INDEX_CSS.to_string(),
        }
    }

    /// Load assets from `dir`, keeping the embedded version of any file
    /// the directory does not contain
    pub fn from_dir(dir: impl AsRef<Path>) -> EtchResult<Self> {
        let dir = dir.as_ref();
        let mut bundle = Self::embedded();

        for (file, slot) in [
            (CSS_FILE, &mut bundle.stylesheet),
            (JS_FILE, &mut bundle.script),
            (INDEX_CSS_FILE, &mut bundle.index_stylesheet),
        ] {
            let path = dir.join(file);
            if path.is_file() {
                tracing::debug!("Using asset override {}", path.display());
                *slot = fs::read_to_string(&path)?;
            }
        }

        Ok(bundle)
    }

    /// `<style>` element with the page stylesheet
    pub fn style_tag(&self) -> String {
        format!("<style>\n{}\n</style>", self.stylesheet)
    }

    /// `<style>` element with the index stylesheet
    pub fn index_style_tag(&self) -> String {
        format!("<style>\n{}\n</style>", self.index_stylesheet)
    }

    /// `<script>` element with the page script
    pub fn script_tag(&self) -> String {
        format!("<script>\n{}\n</script>", self.script)
    }
}
