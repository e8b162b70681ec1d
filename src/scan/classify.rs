//! Character classes shared by every recogniser.
//!
//! Changing any of these tables changes matching behaviour.

/// Characters RFC 2822 permits unescaped in a dot-atom, besides letters and digits.
pub const DOT_ATOM_SPECIALS: &str = ".!#$%&'*+-/=?^_`{|}~";

/// Returns `true` for Unicode letters and numbers.
#[inline]
#[must_use]
pub fn is_alnum(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// Returns `true` for Unicode whitespace, including newlines and tabs.
#[inline]
#[must_use]
pub fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace()
}

/// Returns `true` for characters that render as something.
///
/// Control characters and invisible format characters (bidi overrides,
/// zero-width joiners, soft hyphen, byte order mark) are not printable.
#[inline]
#[must_use]
pub fn is_printable(ch: char) -> bool {
    !ch.is_control() && !is_format(ch)
}

/// Returns `true` for the dot-atom special characters.
#[inline]
#[must_use]
pub fn is_dot_atom_special(ch: char) -> bool {
    matches!(
        ch,
        '.' | '!'
            | '#'
            | '$'
            | '%'
            | '&'
            | '\''
            | '*'
            | '+'
            | '-'
            | '/'
            | '='
            | '?'
            | '^'
            | '_'
            | '`'
            | '{'
            | '|'
            | '}'
            | '~'
    )
}

const fn is_format(ch: char) -> bool {
    matches!(
        ch,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}
