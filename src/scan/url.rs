//! URL recogniser.
//!
//! A URL starts at one of a fixed set of case-sensitive trigger literals and
//! runs forward. When the character before the trigger is an opening bracket
//! or quote, the URL runs until the matching closer and may wrap across lines;
//! otherwise it ends at the first whitespace.

use super::ScanMatch;
use super::classify::{is_alnum, is_dot_atom_special, is_printable, is_whitespace};

/// Literals that may start a URL.
const TRIGGERS: [&str; 13] = [
    "http://", "https://", "vnc://", "fish://", "ftp://", "ftps://", "sftp://", "smb://",
    "mailto:", "www.", "ftp.", "file://", "news:",
];

/// Bare names that are not URLs on their own, besides the triggers themselves.
const DEGENERATE: [&str; 5] = ["mailto", "www", "ftp", "news", "news://"];

/// Returns `true` if a URL may start at `pos`.
///
/// The preceding character must not be a letter, digit or dot-atom special,
/// so that a match never starts inside the local part of a mail address.
#[must_use]
pub fn looks_like_url_start(chars: &[char], pos: usize) -> bool {
    if pos >= chars.len() {
        return false;
    }
    if pos > 0 {
        let prev = chars[pos - 1];
        if is_alnum(prev) || is_dot_atom_special(prev) {
            return false;
        }
    }
    TRIGGERS
        .iter()
        .any(|trigger| starts_with_at(chars, pos, trigger))
}

/// Returns `true` for strings that consist of nothing but a scheme.
#[must_use]
pub fn is_degenerate_url(url: &str) -> bool {
    url.is_empty() || TRIGGERS.contains(&url) || DEGENERATE.contains(&url)
}

/// Returns the `href` for a matched URL.
///
/// Bareword hosts get an explicit scheme; everything else is used verbatim.
#[must_use]
pub fn hyperlink(url: &str) -> String {
    if url.starts_with("www.") {
        format!("http://{url}")
    } else if url.starts_with("ftp.") {
        format!("ftp://{url}")
    } else {
        url.to_string()
    }
}

/// Extracts the URL starting at `pos`.
///
/// Trailing sentence punctuation (`. , : ! ? ) >`) is left out of the match.
#[must_use]
pub fn extract_url_at(chars: &[char], pos: usize, max_len: usize) -> Option<ScanMatch> {
    if !looks_like_url_start(chars, pos) {
        return None;
    }

    let closer = pos
        .checked_sub(1)
        .and_then(|before| closing_delimiter(chars[before]));

    let mut url = String::new();
    // Buffer index of every character copied into `url`.
    let mut kept: Vec<usize> = Vec::new();
    let mut end = pos;

    while let Some(&ch) = chars.get(end) {
        if !(is_printable(ch) || is_whitespace(ch)) {
            break;
        }
        let stop = closer.map_or_else(|| is_whitespace(ch), |closer| ch == closer);
        if stop {
            break;
        }
        if !is_whitespace(ch) {
            url.push(ch);
            kept.push(end);
            if kept.len() > max_len {
                tracing::trace!(pos, max_len, "URL exceeds length limit");
                return None;
            }
        }
        end += 1;
    }

    if is_degenerate_url(&url) {
        return None;
    }

    let mut consumed_end = end - 1;
    while kept.len() > 1 && url.ends_with(['.', ',', ':', '!', '?', ')', '>']) {
        url.pop();
        kept.pop();
        if let Some(&last) = kept.last() {
            consumed_end = last;
        }
    }

    if is_degenerate_url(&url) {
        return None;
    }

    Some(ScanMatch {
        text: url,
        start: pos,
        consumed_end,
    })
}

const fn closing_delimiter(before: char) -> Option<char> {
    match before {
        '[' => Some(']'),
        '<' => Some('>'),
        // <link>http://...</link>
        '>' => Some('<'),
        '"' => Some('"'),
        _ => None,
    }
}

fn starts_with_at(chars: &[char], pos: usize, literal: &str) -> bool {
    let mut index = pos;
    for expected in literal.chars() {
        if chars.get(index) != Some(&expected) {
            return false;
        }
        index += 1;
    }
    true
}
