//! Markdown rendering for request descriptions

use comrak::{markdown_to_html, Options};

/// Render a Markdown description to HTML.
///
/// Raw HTML embedded in the description is not passed through.
pub fn render_description(md: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    markdown_to_html(md, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_description() {
        let html = render_description("Creates a **user**.\n\n- needs `admin`");
        assert!(html.contains("<strong>user</strong>"));
        assert!(html.contains("<li>needs <code>admin</code></li>"));
    }

    #[test]
    fn test_raw_html_is_dropped() {
        let html = render_description("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }
}
