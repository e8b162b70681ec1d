//! Mail address recogniser.
//!
//! Unlike the URL recogniser, this one pivots on an `@` and scans in both
//! directions: backward over the local part, forward over the domain.

use super::ScanMatch;
use super::classify::{is_alnum, is_dot_atom_special};

/// Extracts the mail address around the `@` at `pos`.
///
/// The local part may hold ASCII letters, digits and dot-atom specials; the
/// domain letters, digits, `.` and `-`. Both ends are trimmed back to a
/// letter or digit, and the domain must contain a dot before its last
/// character.
#[must_use]
pub fn extract_email_address_at(chars: &[char], pos: usize, max_len: usize) -> Option<ScanMatch> {
    if chars.get(pos) != Some(&'@') {
        return None;
    }

    let start = local_part_start(chars, pos)?;
    let end = domain_end(chars, pos)?;

    if end - start > max_len {
        tracing::trace!(pos, max_len, "address exceeds length limit");
        return None;
    }

    Some(ScanMatch {
        text: chars[start..end].iter().collect(),
        start,
        consumed_end: end - 1,
    })
}

/// Index of the first character of the local part.
fn local_part_start(chars: &[char], at: usize) -> Option<usize> {
    let mut start = at;
    while start > 0 {
        let ch = chars[start - 1];
        if ch == '@' {
            // A second '@' can only mean garbage.
            return None;
        }
        if !ch.is_ascii() || !(is_alnum(ch) || is_dot_atom_special(ch)) {
            break;
        }
        start -= 1;
    }

    // An address starts with a letter or a digit.
    while start < at && !is_alnum(chars[start]) {
        start += 1;
    }
    (start < at).then_some(start)
}

/// Index one past the last character of the domain.
fn domain_end(chars: &[char], at: usize) -> Option<usize> {
    let mut first_dot = None;
    let mut end = at + 1;
    while let Some(&ch) = chars.get(end) {
        if ch == '@' {
            return None;
        }
        if !(is_alnum(ch) || ch == '.' || ch == '-') {
            break;
        }
        if ch == '.' && first_dot.is_none() {
            first_dot = Some(end);
        }
        end += 1;
    }

    // An address ends with a letter or a digit.
    while end > at + 1 && !is_alnum(chars[end - 1]) {
        end -= 1;
    }
    if end == at + 1 {
        return None;
    }

    match first_dot {
        Some(dot) if dot < end => Some(end),
        _ => None,
    }
}
