use super::layout::{PageContext, render_page};

/// Static body shown for any path the router doesn't know.
pub fn render_error() -> &'static str {
    r#"<div class="error"><h2>Page Not Found</h2><p>Sorry, the page you requested does not exist.</p><p><a href="/">Back to the gallery</a></p></div>"#
}

/// Full error document, header included.
pub fn error_page() -> String {
    render_page(
        PageContext {
            title: "Page Not Found",
            ..Default::default()
        },
        render_error(),
    )
}
