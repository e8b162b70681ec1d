//! Plain text to HTML rendering.
//!
//! Provides the link-ifying HTML renderer with entity escaping, whitespace
//! preservation, emphasis highlighting and emoticon substitution.

pub mod emoticons;
mod html;

pub use emoticons::{
    EXCLUDED_TOKENS, EmoticonTheme, ImageTheme, global_theme, init_global_theme, png_to_data_url,
};
pub use html::{HtmlFlags, HtmlRenderer, convert_to_html, escape_html, escape_html_into};
