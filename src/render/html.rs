//! The HTML renderer.

use bitflags::bitflags;
use std::fmt::Write;
use std::sync::Arc;
use tracing::instrument;

use super::emoticons::{EXCLUDED_TOKENS, EmoticonTheme, global_theme};
use crate::scan::{
    ScanLimits, ScanText, extract_email_address_at, extract_url_at, highlight, hyperlink,
};

const NBSP: &str = "&nbsp;";

/// Tab stops every eight columns.
const TAB_WIDTH: usize = 8;

bitflags! {
    /// Rendering options.
    ///
    /// Bit values match the historical integer flags, so raw bits from older
    /// callers can be passed through [`HtmlFlags::from_bits_truncate`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HtmlFlags: u32 {
        /// Keep runs of spaces and tabs from collapsing.
        const PRESERVE_SPACES = 0x01;
        /// Replace text smileys with emoticon images.
        const REPLACE_SMILEYS = 0x02;
        /// Do not link URLs or mail addresses.
        const IGNORE_URLS = 0x04;
        /// Interpret `*bold*`, `_underline_`, `/italic/` and `-strike-`.
        const HIGHLIGHT_TEXT = 0x08;
    }
}

/// Appends `input` to `out` with `&`, `"`, `<` and `>` replaced by entities.
pub fn escape_html_into(out: &mut String, input: &str) {
    for ch in input.chars() {
        match entity(ch) {
            Some(entity) => out.push_str(entity),
            None => out.push(ch),
        }
    }
}

/// Returns `input` with `&`, `"`, `<` and `>` replaced by entities.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    escape_html_into(&mut out, input);
    out
}

/// Appends a link target to `out`, quoting only what would end the attribute.
///
/// `&` is left alone so query strings keep their raw form.
fn escape_href_into(out: &mut String, href: &str) {
    for ch in href.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

const fn entity(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    }
}

/// Converts plain text into HTML suitable for the body of a document.
///
/// Uses the process-wide emoticon theme when `REPLACE_SMILEYS` is set.
#[must_use]
pub fn convert_to_html(
    text: &str,
    flags: HtmlFlags,
    max_url_len: usize,
    max_address_len: usize,
) -> String {
    HtmlRenderer::new()
        .with_flags(flags)
        .with_limits(ScanLimits {
            max_url_len,
            max_address_len,
        })
        .render(text)
}

/// Renders plain text as link-ified HTML.
#[derive(Clone, Default)]
pub struct HtmlRenderer {
    flags: HtmlFlags,
    limits: ScanLimits,
    emoticons: Option<Arc<dyn EmoticonTheme>>,
}

impl std::fmt::Debug for HtmlRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlRenderer")
            .field("flags", &self.flags)
            .field("limits", &self.limits)
            .field("emoticons", &self.emoticons.is_some())
            .finish()
    }
}

impl HtmlRenderer {
    /// Creates a renderer with no flags and default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rendering flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: HtmlFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the length limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Uses `theme` for smileys instead of the process-wide theme.
    #[must_use]
    pub fn with_emoticons(mut self, theme: Arc<dyn EmoticonTheme>) -> Self {
        self.emoticons = Some(theme);
        self
    }

    /// Returns the rendering flags.
    #[must_use]
    pub const fn flags(&self) -> HtmlFlags {
        self.flags
    }

    /// Returns the length limits.
    #[must_use]
    pub const fn limits(&self) -> ScanLimits {
        self.limits
    }

    /// Renders `text`.
    #[instrument(skip_all, fields(len = text.len(), flags = self.flags.bits()))]
    pub fn render(&self, text: &str) -> String {
        let html = Pass::new(self, text).run();

        if self.flags.contains(HtmlFlags::REPLACE_SMILEYS) {
            let theme = self.emoticons.as_ref().unwrap_or_else(|| global_theme());
            return theme.substitute(&html, &EXCLUDED_TOKENS);
        }
        html
    }
}

/// State of one left-to-right conversion.
struct Pass<'r, 't> {
    renderer: &'r HtmlRenderer,
    text: ScanText<'t>,
    out: String,
    pos: usize,
    column: usize,
    start_of_line: bool,
}

impl<'r, 't> Pass<'r, 't> {
    fn new(renderer: &'r HtmlRenderer, source: &'t str) -> Self {
        Self {
            renderer,
            text: ScanText::new(source),
            out: String::with_capacity(source.len() * 2),
            pos: 0,
            column: 0,
            start_of_line: true,
        }
    }

    fn run(mut self) -> String {
        let preserve = self.renderer.flags.contains(HtmlFlags::PRESERVE_SPACES);

        while let Some(&ch) = self.text.chars().get(self.pos) {
            if preserve && ch == ' ' {
                self.spaces();
                continue;
            }
            if preserve && ch == '\t' {
                self.tab();
                continue;
            }
            if ch == '\n' {
                // Keep the newline so callers can still find quoting levels.
                self.out.push_str("<br />\n");
                self.start_of_line = true;
                self.column = 0;
                self.pos += 1;
                continue;
            }

            self.start_of_line = false;
            if let Some(entity) = entity(ch) {
                self.out.push_str(entity);
                self.advance_to(self.pos);
                continue;
            }
            if !self.renderer.flags.contains(HtmlFlags::IGNORE_URLS)
                && (self.url() || self.email_address())
            {
                continue;
            }
            if self.renderer.flags.contains(HtmlFlags::HIGHLIGHT_TEXT) && self.emphasis() {
                continue;
            }
            self.out.push(ch);
            self.advance_to(self.pos);
        }

        self.out
    }

    /// Moves past `last`, counting the columns covered.
    fn advance_to(&mut self, last: usize) {
        self.column += last + 1 - self.pos;
        self.pos = last + 1;
    }

    fn spaces(&mut self) {
        let chars = self.text.chars();
        match chars.get(self.pos + 1) {
            Some(' ') => {
                // A run of spaces never collapses.
                while chars.get(self.pos) == Some(&' ') {
                    self.out.push_str(NBSP);
                    self.pos += 1;
                    self.column += 1;
                }
            },
            Some(&next) => {
                // A single space breaks unless it starts or ends the line.
                if self.start_of_line || next == '\n' {
                    self.out.push_str(NBSP);
                } else {
                    self.out.push(' ');
                }
                self.pos += 1;
                self.column += 1;
            },
            None => {
                self.out.push_str(NBSP);
                self.pos += 1;
                self.column += 1;
            },
        }
        self.start_of_line = false;
    }

    fn tab(&mut self) {
        loop {
            self.out.push_str(NBSP);
            self.column += 1;
            if self.column % TAB_WIDTH == 0 {
                break;
            }
        }
        self.start_of_line = false;
        self.pos += 1;
    }

    fn url(&mut self) -> bool {
        let Some(m) = extract_url_at(self.text.chars(), self.pos, self.renderer.limits.max_url_len)
        else {
            return false;
        };

        self.out.push_str("<a href=\"");
        escape_href_into(&mut self.out, &hyperlink(&m.text));
        self.out.push_str("\">");
        escape_html_into(&mut self.out, &m.text);
        self.out.push_str("</a>");
        self.advance_to(m.consumed_end);
        true
    }

    fn email_address(&mut self) -> bool {
        let Some(m) = extract_email_address_at(
            self.text.chars(),
            self.pos,
            self.renderer.limits.max_address_len,
        ) else {
            return false;
        };

        // The local part was already emitted one escaped character at a
        // time; take it back out before writing the link.
        let local_part = &self.text.chars()[m.start..self.pos];
        let emitted: usize = local_part
            .iter()
            .map(|&ch| entity(ch).map_or_else(|| ch.len_utf8(), str::len))
            .sum();
        self.out.truncate(self.out.len().saturating_sub(emitted));

        let _ = write!(self.out, "<a href=\"mailto:{0}\">{0}</a>", m.text);
        self.advance_to(m.consumed_end);
        true
    }

    fn emphasis(&mut self) -> bool {
        let Some(found) = highlight(&self.text, self.pos) else {
            return false;
        };
        self.out.push_str(&found.to_html());
        self.advance_to(found.matched.consumed_end);
        true
    }
}
