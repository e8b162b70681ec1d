//! Emoticon substitution.
//!
//! The renderer hands its finished HTML to an [`EmoticonTheme`], which swaps
//! text smileys for inline images. A process-wide theme is installed at most
//! once; renderers may also carry their own theme, which is how tests stub it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::{Error, Result};

/// Look-alike tokens that must never be treated as smileys.
///
/// Tokens appear in their HTML-escaped form because substitution runs on
/// rendered markup.
pub const EXCLUDED_TOKENS: [&str; 37] = [
    "(c)", "(C)", "&gt;:-(", "&gt;:(", "(B)", "(b)", "(P)", "(p)", "(O)", "(o)", "(D)", "(d)",
    "(E)", "(e)", "(K)", "(k)", "(I)", "(i)", "(L)", "(l)", "(8)", "(T)", "(t)", "(G)", "(g)",
    "(F)", "(f)", "(H)", "8)", "(N)", "(n)", "(Y)", "(y)", "(U)", "(u)", "(W)", "(w)",
];

/// Default location of emoticon images.
pub const DEFAULT_IMAGE_BASE_URL: &str = "emoticons";

/// Smiley tokens of the built-in theme and the image each maps to.
const DEFAULT_EMOTICONS: &[(&str, &str)] = &[
    (":-)", "smile"),
    (":)", "smile"),
    (";-)", "wink"),
    (";)", "wink"),
    (":-(", "unhappy"),
    (":(", "unhappy"),
    (":-D", "laugh"),
    (":D", "laugh"),
    (":-P", "tongue"),
    (":P", "tongue"),
    (":-p", "tongue"),
    (":p", "tongue"),
    (":-O", "surprise"),
    (":O", "surprise"),
    (":-o", "surprise"),
    (":'(", "cry"),
    (":-|", "neutral"),
    (":-/", "confused"),
    (":-*", "kiss"),
    ("8-)", "cool"),
    ("O:-)", "angel"),
    ("&gt;:-)", "devil"),
    ("&lt;3", "heart"),
];

/// Resolves text smileys inside rendered HTML.
///
/// Implementations must only replace recognised smiley tokens and leave every
/// excluded token and all other text byte-for-byte unchanged.
pub trait EmoticonTheme: Send + Sync {
    /// Returns `html` with recognised smileys replaced by image markup.
    fn substitute(&self, html: &str, excluded: &[&str]) -> String;
}

#[derive(Debug, Clone)]
struct Emoticon {
    token: String,
    src: String,
}

/// Theme that maps a fixed table of smileys to `<img>` elements.
///
/// Parsing is strict: a token must stand alone between whitespace, tag
/// boundaries or the ends of the text. Text inside HTML tags is never touched.
#[derive(Debug, Clone)]
pub struct ImageTheme {
    // Longest token first.
    emoticons: Vec<Emoticon>,
}

impl ImageTheme {
    /// Creates the built-in theme with images under `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self::from_entries(
            DEFAULT_EMOTICONS
                .iter()
                .map(|(token, image)| Emoticon {
                    token: (*token).to_string(),
                    src: format!("{base}/{image}.png"),
                })
                .collect(),
        )
    }

    /// Creates the built-in theme with every image embedded as a data URL,
    /// read from `<dir>/<name>.png`.
    pub fn embedded(dir: &Path) -> Result<Self> {
        let mut emoticons = Vec::with_capacity(DEFAULT_EMOTICONS.len());
        for (token, image) in DEFAULT_EMOTICONS {
            let src = png_to_data_url(&dir.join(format!("{image}.png")))?;
            emoticons.push(Emoticon {
                token: (*token).to_string(),
                src,
            });
        }
        Ok(Self::from_entries(emoticons))
    }

    fn from_entries(mut emoticons: Vec<Emoticon>) -> Self {
        emoticons.sort_by(|a, b| b.token.len().cmp(&a.token.len()));
        Self { emoticons }
    }

    /// Number of smiley tokens the theme recognises.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emoticons.len()
    }

    /// Returns `true` if the theme recognises nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emoticons.is_empty()
    }

    fn emoticon_at(&self, html: &str, pos: usize) -> Option<&Emoticon> {
        let rest = &html[pos..];
        self.emoticons.iter().find(|e| {
            rest.starts_with(&e.token) && ends_token(&rest[e.token.len()..])
        })
    }
}

impl Default for ImageTheme {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

impl EmoticonTheme for ImageTheme {
    fn substitute(&self, html: &str, excluded: &[&str]) -> String {
        let mut out = String::with_capacity(html.len());
        let mut pos = 0;

        while let Some(ch) = html[pos..].chars().next() {
            if ch == '<' {
                // Copy the whole tag.
                let end = html[pos..].find('>').map_or(html.len(), |i| pos + i + 1);
                out.push_str(&html[pos..end]);
                pos = end;
                continue;
            }

            if let Some(token) = excluded.iter().find(|t| !t.is_empty() && html[pos..].starts_with(**t)) {
                out.push_str(token);
                pos += token.len();
                continue;
            }

            if starts_token(&html[..pos]) {
                if let Some(emoticon) = self.emoticon_at(html, pos) {
                    out.push_str(&format!(
                        "<img align=\"center\" title=\"{token}\" alt=\"{token}\" src=\"{src}\" width=\"16\" height=\"16\" />",
                        token = emoticon.token,
                        src = emoticon.src,
                    ));
                    pos += emoticon.token.len();
                    continue;
                }
            }

            out.push(ch);
            pos += ch.len_utf8();
        }

        out
    }
}

/// Returns `true` if a token may start right after `before`.
fn starts_token(before: &str) -> bool {
    before.is_empty()
        || before.ends_with("&nbsp;")
        || before
            .chars()
            .next_back()
            .is_some_and(|ch| ch.is_whitespace() || ch == '>')
}

/// Returns `true` if a token may end right before `after`.
fn ends_token(after: &str) -> bool {
    after.is_empty()
        || after.starts_with("&nbsp;")
        || after
            .chars()
            .next()
            .is_some_and(|ch| ch.is_whitespace() || ch == '<')
}

static GLOBAL_THEME: OnceLock<Arc<dyn EmoticonTheme>> = OnceLock::new();

/// Installs the process-wide emoticon theme.
///
/// Succeeds at most once, and only before [`global_theme`] has been read.
///
/// # Errors
///
/// Returns an error if a theme is already installed.
pub fn init_global_theme(theme: Arc<dyn EmoticonTheme>) -> Result<()> {
    GLOBAL_THEME
        .set(theme)
        .map_err(|_theme| Error::AlreadyInitialized("emoticon theme".to_string()))
}

/// Returns the process-wide emoticon theme, installing the built-in
/// [`ImageTheme`] on first use if none was set.
pub fn global_theme() -> &'static Arc<dyn EmoticonTheme> {
    GLOBAL_THEME.get_or_init(|| Arc::new(ImageTheme::default()))
}

/// Embeds the PNG image at `path` into a `data:` URL.
///
/// # Errors
///
/// Returns an error if the path is empty or the file cannot be read.
pub fn png_to_data_url(path: &Path) -> Result<String> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidInput("empty image path".to_string()));
    }
    let bytes = std::fs::read(path).map_err(|e| Error::OperationFailed {
        operation: "read_image".to_string(),
        cause: format!("{}: {}", path.display(), e),
    })?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
}
