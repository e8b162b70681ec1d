//! Inline emphasis markup: `*bold*`, `_underline_`, `/italic/`, `-strike-`.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

use super::classify::is_whitespace;
use super::{ScanMatch, ScanText};

/// Builds the pattern for one delimiter: words joined by single spaces,
/// hyphens or apostrophes, an optional trailing punctuation mark, then the
/// delimiter again. Quantifiers are lazy so the shortest span wins.
fn emphasis_regex(delimiter: char) -> Regex {
    let d = regex::escape(&delimiter.to_string());
    Regex::new(&format!(r"^{d}\w+?(?:[ \-']\w+?)*?(?: ?[,.:?!;])??{d}"))
        .expect("static regex: emphasis pattern")
}

static BOLD_REGEX: LazyLock<Regex> = LazyLock::new(|| emphasis_regex('*'));
static UNDERLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| emphasis_regex('_'));
static ITALIC_REGEX: LazyLock<Regex> = LazyLock::new(|| emphasis_regex('/'));
static STRIKE_REGEX: LazyLock<Regex> = LazyLock::new(|| emphasis_regex('-'));

/// Kind of emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// `*bold*`
    Bold,
    /// `_underline_`
    Underline,
    /// `/italic/`
    Italic,
    /// `-strike-`
    Strike,
}

impl Emphasis {
    /// Returns the emphasis a delimiter character introduces.
    #[must_use]
    pub const fn from_delimiter(ch: char) -> Option<Self> {
        match ch {
            '*' => Some(Self::Bold),
            '_' => Some(Self::Underline),
            '/' => Some(Self::Italic),
            '-' => Some(Self::Strike),
            _ => None,
        }
    }

    /// The HTML element wrapping this emphasis.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Underline => "u",
            Self::Italic => "i",
            Self::Strike => "strike",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::Bold => &BOLD_REGEX,
            Self::Underline => &UNDERLINE_REGEX,
            Self::Italic => &ITALIC_REGEX,
            Self::Strike => &STRIKE_REGEX,
        }
    }
}

/// A matched emphasis span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// The emphasis kind.
    pub emphasis: Emphasis,
    /// The literal span, delimiters included.
    pub matched: ScanMatch,
}

impl Highlight {
    /// Renders the span wrapped in its element, keeping the delimiters.
    #[must_use]
    pub fn to_html(&self) -> String {
        let tag = self.emphasis.tag();
        format!("<{tag}>{}</{tag}>", self.matched.text)
    }
}

/// Matches emphasis markup starting at `pos`.
///
/// The delimiter must open the text or follow whitespace, and the closing
/// delimiter must be followed by whitespace or the end of the text.
#[must_use]
pub fn highlight(text: &ScanText<'_>, pos: usize) -> Option<Highlight> {
    let chars = text.chars();
    let emphasis = Emphasis::from_delimiter(*chars.get(pos)?)?;
    if pos > 0 && !is_whitespace(chars[pos - 1]) {
        return None;
    }

    let found = emphasis.regex().find(text.tail(pos))?;
    let matched = found.as_str();
    let consumed_end = pos + matched.chars().count() - 1;

    if chars.get(consumed_end + 1).is_some_and(|&next| !is_whitespace(next)) {
        return None;
    }

    Some(Highlight {
        emphasis,
        matched: ScanMatch {
            text: matched.to_string(),
            start: pos,
            consumed_end,
        },
    })
}
