//! Link and markup recognisers.
//!
//! Every recogniser in this module is a pure function over a slice of
//! `char`s. Positions are char indices, never byte offsets. A recogniser
//! either returns `None` or a [`ScanMatch`] whose `consumed_end` is the index
//! of the last character that belonged to the match, so a caller resumes its
//! own loop at `consumed_end + 1`.
//!
//! Matchers never call each other. The renderer and the censor drive them.

pub mod classify;
mod email;
mod markup;
mod url;

pub use email::extract_email_address_at;
pub use markup::{Emphasis, Highlight, highlight};
pub use url::{extract_url_at, hyperlink, is_degenerate_url, looks_like_url_start};

use serde::{Deserialize, Serialize};

/// Default maximum URL length in characters.
pub const DEFAULT_MAX_URL_LEN: usize = 4096;

/// Default maximum mail address length in characters.
pub const DEFAULT_MAX_ADDRESS_LEN: usize = 255;

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    /// The matched text. Whitespace skipped inside a delimited URL is absent.
    pub text: String,
    /// Index of the first character of the match.
    pub start: usize,
    /// Index of the last character consumed by the match.
    pub consumed_end: usize,
}

impl ScanMatch {
    /// Number of buffer characters covered by the match, including any
    /// whitespace a delimited URL skipped over.
    #[must_use]
    pub const fn span_len(&self) -> usize {
        self.consumed_end + 1 - self.start
    }
}

/// Heuristic length caps for the recognisers.
///
/// A zero bound makes the corresponding recogniser never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanLimits {
    /// Maximum URL length in characters.
    pub max_url_len: usize,
    /// Maximum mail address length in characters.
    pub max_address_len: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_url_len: DEFAULT_MAX_URL_LEN,
            max_address_len: DEFAULT_MAX_ADDRESS_LEN,
        }
    }
}

impl ScanLimits {
    /// Creates limits with the default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum URL length.
    #[must_use]
    pub const fn with_max_url_len(mut self, length: usize) -> Self {
        self.max_url_len = length;
        self
    }

    /// Sets the maximum mail address length.
    #[must_use]
    pub const fn with_max_address_len(mut self, length: usize) -> Self {
        self.max_address_len = length;
        self
    }
}

/// A text buffer prepared for scanning.
///
/// Keeps the decoded characters next to the source string so the markup
/// matcher can run its regex on a zero-copy tail slice.
#[derive(Debug, Clone)]
pub struct ScanText<'a> {
    source: &'a str,
    chars: Vec<char>,
    offsets: Vec<usize>,
}

impl<'a> ScanText<'a> {
    /// Decodes `source` into a scan buffer.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let (offsets, chars) = source.char_indices().unzip();
        Self {
            source,
            chars,
            offsets,
        }
    }

    /// The decoded characters.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the buffer holds no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The source text from char index `pos` to the end.
    #[must_use]
    pub fn tail(&self, pos: usize) -> &'a str {
        self.offsets
            .get(pos)
            .map_or("", |&offset| &self.source[offset..])
    }
}

/// Kind of a recognised link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// A URL or bareword host.
    Url,
    /// A mail address.
    EmailAddress,
}

impl LinkKind {
    /// Returns the kind as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::EmailAddress => "email_address",
        }
    }
}

/// A link found in plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// What was recognised.
    pub kind: LinkKind,
    /// The visible text of the link.
    pub text: String,
    /// The target the renderer would put in `href`.
    pub href: String,
    /// Char index of the first character.
    pub start: usize,
    /// Char index of the last character.
    pub end: usize,
}

/// Extracts the URL starting at char index `pos` of `text`.
///
/// Returns `None` when no URL starts there or it exceeds `max_url_len`.
#[must_use]
pub fn extract_url(text: &str, pos: usize, max_url_len: usize) -> Option<ScanMatch> {
    let chars: Vec<char> = text.chars().collect();
    extract_url_at(&chars, pos, max_url_len)
}

/// Extracts the mail address around the `@` at char index `pos` of `text`.
///
/// Returns `None` when `pos` is not an `@`, the address is malformed, or it
/// exceeds `max_address_len`.
#[must_use]
pub fn extract_email_address(text: &str, pos: usize, max_address_len: usize) -> Option<ScanMatch> {
    let chars: Vec<char> = text.chars().collect();
    extract_email_address_at(&chars, pos, max_address_len)
}

/// Lists every URL and mail address in `text`, left to right, using the same
/// scan order as the HTML renderer.
#[must_use]
pub fn find_links(text: &str, limits: ScanLimits) -> Vec<Link> {
    let chars: Vec<char> = text.chars().collect();
    let mut links = Vec::new();
    // First index not yet claimed by an earlier link.
    let mut free = 0;
    let mut pos = 0;

    while pos < chars.len() {
        if let Some(m) = extract_url_at(&chars, pos, limits.max_url_len) {
            pos = m.consumed_end + 1;
            free = pos;
            links.push(Link {
                kind: LinkKind::Url,
                href: hyperlink(&m.text),
                text: m.text,
                start: m.start,
                end: m.consumed_end,
            });
            continue;
        }
        if let Some(m) = extract_email_address_at(&chars, pos, limits.max_address_len) {
            if m.start >= free {
                pos = m.consumed_end + 1;
                free = pos;
                links.push(Link {
                    kind: LinkKind::EmailAddress,
                    href: format!("mailto:{}", m.text),
                    text: m.text,
                    start: m.start,
                    end: m.consumed_end,
                });
                continue;
            }
        }
        pos += 1;
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = ScanLimits::default();
        assert_eq!(limits.max_url_len, 4096);
        assert_eq!(limits.max_address_len, 255);

        let limits = ScanLimits::new()
            .with_max_url_len(10)
            .with_max_address_len(20);
        assert_eq!(limits.max_url_len, 10);
        assert_eq!(limits.max_address_len, 20);
    }

    #[test]
    fn test_scan_text_tail_is_char_indexed() {
        let text = ScanText::new("à *b*");
        assert_eq!(text.len(), 5);
        assert_eq!(text.tail(2), "*b*");
        assert_eq!(text.tail(5), "");
        assert!(!text.is_empty());
    }

    #[test]
    fn test_str_wrappers_use_char_positions() {
        let m = extract_url("é http://kde.org", 2, DEFAULT_MAX_URL_LEN);
        assert_eq!(m.map(|m| m.text), Some("http://kde.org".to_string()));

        let m = extract_email_address("ü foo@bar.baz", 5, DEFAULT_MAX_ADDRESS_LEN);
        assert_eq!(m.map(|m| (m.start, m.text)), Some((2, "foo@bar.baz".to_string())));
    }

    #[test]
    fn test_find_links_in_order() {
        let links = find_links(
            "Write to foo@bar.baz or see www.kde.org, thanks",
            ScanLimits::default(),
        );
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].kind, LinkKind::EmailAddress);
        assert_eq!(links[0].text, "foo@bar.baz");
        assert_eq!(links[0].href, "mailto:foo@bar.baz");
        assert_eq!((links[0].start, links[0].end), (9, 19));
        assert_eq!(links[1].kind, LinkKind::Url);
        assert_eq!(links[1].text, "www.kde.org");
        assert_eq!(links[1].href, "http://www.kde.org");
    }

    #[test]
    fn test_find_links_url_swallows_address() {
        let links = find_links("http://user@www.kde.org", ScanLimits::default());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].kind, LinkKind::Url);
    }

    #[test]
    fn test_span_len() {
        let m = ScanMatch {
            text: "ab".to_string(),
            start: 3,
            consumed_end: 6,
        };
        assert_eq!(m.span_len(), 4);
    }

    #[test]
    fn test_link_kind_as_str() {
        assert_eq!(LinkKind::Url.as_str(), "url");
        assert_eq!(LinkKind::EmailAddress.as_str(), "email_address");
    }
}
