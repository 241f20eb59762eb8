//! HTML rendering.
//!
//! Views are plain functions from data to markup. They hold no state and
//! never touch the controller; handlers take a slot snapshot and pass the
//! pieces in.

mod error;
mod gallery;
mod layout;

pub use error::{error_page, render_error};
pub use gallery::render_gallery;
pub use layout::{PageContext, render_header, render_page};

/// Escape text for use in element content and quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
