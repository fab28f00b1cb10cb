//! Shared route helpers for page rendering.

use axum::response::Html;
use tracing::{error, warn};

use crate::models::SiteConfig;
use crate::routing::duplicate_slugs;
use crate::state::AppState;

/// Wrap `content` in the site frame.
///
/// A broken template degrades to a bare document rather than an error page.
pub fn render_framed(
    state: &AppState,
    site: &SiteConfig,
    slug: &str,
    title: &str,
    content: &str,
) -> Html<String> {
    let html = state
        .theme()
        .render_page(site, slug, title, content)
        .unwrap_or_else(|e| {
            error!(error = %e, slug, "page frame failed to render");
            format!("<html><body>{content}</body></html>")
        });
    Html(html)
}

/// Log slugs that more than one page claims. Only the first such page
/// is reachable.
pub fn warn_duplicate_slugs(site: &SiteConfig) {
    for slug in duplicate_slugs(site) {
        warn!(slug = %slug, "several pages share this slug; the first one wins");
    }
}

/// HTML-escape a string for safe output.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_special_chars() {
        assert_eq!(
            html_escape("<script>alert('xss')</script>"),
            "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_html_escape_ampersand() {
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_html_escape_quotes() {
        assert_eq!(html_escape(r#"say "hello""#), "say &quot;hello&quot;");
    }

    #[test]
    fn test_html_escape_plain_text() {
        assert_eq!(html_escape("Toyota Corolla"), "Toyota Corolla");
    }
}
