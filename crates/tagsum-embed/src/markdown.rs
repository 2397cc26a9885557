//! Inline renderers for summary list items.
//!
//! A summary line is plain text plus wiki-style links (`[[target|label]]`).
//! The HTML renderer turns links into anchors and escapes everything else;
//! the plain renderer passes lines through untouched for hosts (and tests)
//! that consume markdown directly.

use async_trait::async_trait;
use tagsum_core::{InlineRenderer, Result};

/// Renders summary lines to HTML.
///
/// Wiki links become anchors carrying the `internal-link` class so hosts
/// can intercept navigation; all other text is entity-escaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlInlineRenderer;

#[async_trait]
impl InlineRenderer for HtmlInlineRenderer {
    async fn render_inline(&self, markdown: &str, _source_id: &str) -> Result<String> {
        Ok(render_wiki_links(markdown))
    }
}

/// Passes markdown through unchanged. For tests and plain-text hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRenderer;

#[async_trait]
impl InlineRenderer for PlainTextRenderer {
    async fn render_inline(&self, markdown: &str, _source_id: &str) -> Result<String> {
        Ok(markdown.to_string())
    }
}

/// Escape text for HTML body and attribute contexts.
pub(crate) fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_wiki_links(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut rest = markdown;
    while let Some(start) = rest.find("[[") {
        out.push_str(&html_escape(&rest[..start]));
        let after = &rest[start + 2..];
        match after.find("]]") {
            Some(end) => {
                let inner = &after[..end];
                let (target, label) = match inner.split_once('|') {
                    Some((target, label)) => (target, label),
                    None => (inner, inner),
                };
                out.push_str("<a href=\"");
                out.push_str(&html_escape(target));
                out.push_str("\" class=\"internal-link\">");
                out.push_str(&html_escape(label));
                out.push_str("</a>");
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated link reads as plain text.
                out.push_str(&html_escape(&rest[start..]));
                rest = "";
            }
        }
    }
    out.push_str(&html_escape(rest));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_html_renderer_renders_link_with_label() {
        let rendered = HtmlInlineRenderer
            .render_inline("Milestone One [[notes#Milestone One|Link]]", "host.md")
            .await
            .unwrap();
        assert_eq!(
            rendered,
            "Milestone One <a href=\"notes#Milestone One\" class=\"internal-link\">Link</a>"
        );
    }

    #[tokio::test]
    async fn test_html_renderer_link_without_label_uses_target() {
        let rendered = HtmlInlineRenderer
            .render_inline("[[notes#Header]]", "host.md")
            .await
            .unwrap();
        assert_eq!(
            rendered,
            "<a href=\"notes#Header\" class=\"internal-link\">notes#Header</a>"
        );
    }

    #[tokio::test]
    async fn test_html_renderer_escapes_surrounding_text() {
        let rendered = HtmlInlineRenderer
            .render_inline("a < b & \"c\" [[t|l]]", "host.md")
            .await
            .unwrap();
        assert_eq!(
            rendered,
            "a &lt; b &amp; &quot;c&quot; <a href=\"t\" class=\"internal-link\">l</a>"
        );
    }

    #[tokio::test]
    async fn test_html_renderer_multiple_links() {
        let rendered = HtmlInlineRenderer
            .render_inline("[[a|1]] and [[b|2]]", "host.md")
            .await
            .unwrap();
        assert_eq!(
            rendered,
            "<a href=\"a\" class=\"internal-link\">1</a> and <a href=\"b\" class=\"internal-link\">2</a>"
        );
    }

    #[tokio::test]
    async fn test_html_renderer_unterminated_link_is_plain_text() {
        let rendered = HtmlInlineRenderer
            .render_inline("broken [[link", "host.md")
            .await
            .unwrap();
        assert_eq!(rendered, "broken [[link");
    }

    #[tokio::test]
    async fn test_plain_renderer_passes_through() {
        let line = "Milestone One [[notes#Milestone One|Link]]";
        let rendered = PlainTextRenderer.render_inline(line, "host.md").await.unwrap();
        assert_eq!(rendered, line);
    }
}
