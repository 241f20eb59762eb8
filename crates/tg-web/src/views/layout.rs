use std::fmt::Write;

use super::escape;
use crate::topic::Topic;

/// Seconds between automatic reloads while a gallery is loading.
const REFRESH_SECS: u32 = 2;

/// Page-level settings shared by every view.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageContext<'a> {
    /// Document title.
    pub title: &'a str,
    /// Highlighted navigation entry.
    pub active: Option<Topic>,
    /// Pre-filled search box text.
    pub search_text: &'a str,
    /// Ask the browser to reload, used while a slot is loading.
    pub refresh: bool,
}

/// Search form plus navigation links, shown on every page.
pub fn render_header(active: Option<Topic>, search_text: &str) -> String {
    let mut nav = String::new();
    for topic in Topic::FIXED {
        let Some(path) = topic.path() else { continue };
        let class = if active == Some(topic) {
            r#" class="active""#
        } else {
            ""
        };
        let _ = write!(
            nav,
            r#"<li><a href="{path}"{class}>{}</a></li>"#,
            escape(topic.label())
        );
    }

    format!(
        r#"<header>
<h1><a href="/">Travel Gallery</a></h1>
<form class="search-form" action="/search" method="get">
<input type="search" name="topic" placeholder="Search" value="{}" required>
<button type="submit">Search</button>
</form>
<nav class="main-nav"><ul>{nav}</ul></nav>
</header>"#,
        escape(search_text)
    )
}

/// Wrap a rendered body in the HTML document.
pub fn render_page(ctx: PageContext<'_>, body: &str) -> String {
    let refresh = if ctx.refresh {
        format!(r#"<meta http-equiv="refresh" content="{REFRESH_SECS}">"#)
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}<title>{}</title>
<link rel="stylesheet" href="https://fonts.googleapis.com/css?family=Roboto">
</head>
<body>
<div class="container">
{}
{body}
</div>
</body>
</html>
"#,
        escape(ctx.title),
        render_header(ctx.active, ctx.search_text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_marks_active_topic() {
        let html = render_header(Some(Topic::Santorini), "");

        assert!(html.contains(r#"<a href="/santorini" class="active">Santorini</a>"#));
        assert!(html.contains(r#"<a href="/amalficoast">Amalfi Coast</a>"#));
        assert!(html.contains(r#"<a href="/hallstat">Hallstat</a>"#));
        assert!(html.contains(r#"action="/search""#));
        assert!(html.contains(r#"name="topic""#));
    }

    #[test]
    fn test_header_escapes_search_text() {
        let html = render_header(None, r#""><script>"#);
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_refresh_only_when_requested() {
        let ctx = PageContext {
            title: "Santorini Photos",
            ..Default::default()
        };
        assert!(!render_page(ctx, "").contains("http-equiv=\"refresh\""));

        let ctx = PageContext {
            refresh: true,
            ..ctx
        };
        assert!(render_page(ctx, "").contains("http-equiv=\"refresh\""));
    }
}
