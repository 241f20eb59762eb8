use std::fmt::Write;

use tg_flickr::Photo;

use super::escape;

/// Render a gallery: a loading placeholder, or one tile per photo in input order.
pub fn render_gallery(images: &[Photo], title: &str, loading: bool) -> String {
    let content = if loading {
        r#"<p class="loading">Loading...</p>"#.to_string()
    } else if images.is_empty() {
        r#"<ul><li class="not-found"><h3>No Results Found</h3><p>Your search did not return any results. Please try again.</p></li></ul>"#
            .to_string()
    } else {
        let mut tiles = String::from("<ul>");
        for photo in images {
            let caption = escape(&photo.title);
            let _ = write!(
                tiles,
                r#"<li class="photo"><a href="{}"><img src="{}" alt="{caption}"></a><span>{caption}</span></li>"#,
                escape(&photo.page_url()),
                escape(&photo.thumbnail_url()),
            );
        }
        tiles.push_str("</ul>");
        tiles
    };

    format!(
        r#"<div class="photo-container"><h2>{}</h2>{content}</div>"#,
        escape(title)
    )
}
