//! JSON syntax highlighting
//!
//! Pretty-prints a JSON value with `serde_json::to_string_pretty` and runs
//! the text through syntect's classed HTML generator. Every scope becomes a
//! `<span>` whose classes are the scope atoms prefixed with `hl-`
//! (`string.quoted.double.json` turns into
//! `hl-string hl-quoted hl-double hl-json`), which the stylesheet targets.
//!
//! Token text is HTML-escaped by the generator, so the output can be
//! embedded as-is.

use crate::diagnostics::{EtchError, EtchResult};
use lazy_static::lazy_static;
use serde_json::Value;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Prefix of every highlight class
pub const CLASS_PREFIX: &str = "hl-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
    prefix: CLASS_PREFIX,
};

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
}

/// Render a value as highlighted, pretty-printed HTML
pub fn highlight_json(value: &Value) -> EtchResult<String> {
    // the generator expects every line to end with a newline
    let mut source = serde_json::to_string_pretty(value)?;
    source.push('\n');
    let syntax = SYNTAX_SET
        .find_syntax_by_extension("json")
        .ok_or_else(|| EtchError::Render("no JSON syntax definition loaded".to_string()))?;

    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);
    for line in LinesWithEndings::from(&source) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|e| EtchError::Render(format!("highlighting failed: {}", e)))?;
    }
    Ok(generator.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::visible_text;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_scalars_are_classed() {
        let html = highlight_json(&json!(true)).unwrap();
        assert_eq!(visible_text(&html), "true\n");
        assert!(html.contains("hl-constant hl-language"));

        let html = highlight_json(&json!(42)).unwrap();
        assert_eq!(visible_text(&html), "42\n");
        assert!(html.contains("hl-constant hl-numeric"));
    }

    #[test]
    fn test_object_tokens() {
        let html = highlight_json(&json!({"id": 7, "name": "ann"})).unwrap();
        assert!(html.contains("<span class=\"hl-source hl-json\">"));
        assert!(html.contains("hl-string hl-quoted hl-double hl-json"));
        assert!(html.contains("hl-punctuation"));
        assert!(!html.contains("class=\"p\""));
    }

    #[test]
    fn test_layout_matches_pretty_printer() {
        let value = json!({
            "user": {"name": "Zoë", "roles": ["admin", "dev"], "active": null},
            "scores": [1, 2.25, -3],
            "empty": {}
        });

        let html = highlight_json(&value).unwrap();
        assert_eq!(
            visible_text(&html).trim_end(),
            serde_json::to_string_pretty(&value).unwrap()
        );
    }

    #[test]
    fn test_escapes_markup_in_strings() {
        let html = highlight_json(&json!({"<b>": "</pre><script>alert(1)</script>"})).unwrap();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;/pre&gt;&lt;script&gt;"));
    }
}
