//! Length-preserving redaction.
//!
//! Blanks quoted reply blocks, URLs, mail addresses and literal strings with
//! spaces so a spell-checker can skip them while every offset still lines up
//! with the original text.

mod spelling;

pub use spelling::{SpellingFilter, SpellingFilterConfig};

use crate::scan::{ScanLimits, extract_email_address_at, extract_url_at};

/// Redacts spans of a private copy of a text.
///
/// Every pass scans the whole buffer and overwrites each matched span with as
/// many spaces as it had characters. The buffer length never changes. None of
/// the recognised token kinds can contain a space, so blanking never creates
/// a new match and running a pass twice changes nothing.
#[derive(Debug, Clone)]
pub struct TextCensor {
    text: Vec<char>,
    limits: ScanLimits,
}

impl TextCensor {
    /// Creates a censor over a copy of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            limits: ScanLimits::default(),
        }
    }

    /// Sets the length limits used by the URL and address passes.
    #[must_use]
    pub const fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Number of characters in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Blanks every block of consecutive lines that start with `prefix`.
    ///
    /// Returns the number of blocks blanked. An empty prefix blanks nothing.
    pub fn censor_quotations(&mut self, prefix: &str) -> usize {
        let prefix: Vec<char> = prefix.chars().collect();
        if prefix.is_empty() {
            return 0;
        }

        let mut blocks = 0;
        let mut pos = 0;
        while pos < self.text.len() {
            while pos < self.text.len() && !self.at_quotation(pos, &prefix) {
                pos = self.next_line(pos);
            }
            if pos >= self.text.len() {
                break;
            }

            let start = pos;
            while pos < self.text.len() && self.at_quotation(pos, &prefix) {
                pos = self.next_line(pos);
            }
            self.blank(start, pos);
            blocks += 1;
        }
        blocks
    }

    /// Blanks every URL. Returns the number of URLs blanked.
    ///
    /// Sweeps repeat until one finds nothing, so a URL rejected only because
    /// of a neighbour that has since been blanked is caught too.
    pub fn censor_urls(&mut self) -> usize {
        until_exhausted(|| self.sweep_urls())
    }

    /// Blanks every mail address. Returns the number of addresses blanked.
    ///
    /// Addresses are blanked as they are found, so an address whose local
    /// part runs into an earlier one (`a@b.cd&e@f.gh`) is still recognised.
    /// Sweeps repeat until one finds nothing: in `a@a.aaüa@a.aaa` the first
    /// `@` only becomes an address once the second one is blank.
    pub fn censor_email_addresses(&mut self) -> usize {
        until_exhausted(|| self.sweep_email_addresses())
    }

    /// Blanks every non-overlapping, case-sensitive occurrence of `literal`.
    ///
    /// Returns the number of occurrences blanked. An empty literal blanks nothing.
    pub fn censor_string(&mut self, literal: &str) -> usize {
        let needle: Vec<char> = literal.chars().collect();
        if needle.is_empty() {
            return 0;
        }

        let mut found = 0;
        let mut pos = 0;
        while pos + needle.len() <= self.text.len() {
            if self.text[pos..pos + needle.len()] == needle[..] {
                self.blank(pos, pos + needle.len());
                pos += needle.len();
                found += 1;
            } else {
                pos += 1;
            }
        }
        found
    }

    /// Returns the redacted text.
    #[must_use]
    pub fn censored_text(&self) -> String {
        self.text.iter().collect()
    }

    fn sweep_urls(&mut self) -> usize {
        let mut found = 0;
        let mut pos = 0;
        while pos < self.text.len() {
            match extract_url_at(&self.text, pos, self.limits.max_url_len) {
                Some(m) => {
                    self.blank(m.start, m.consumed_end + 1);
                    pos = m.consumed_end + 1;
                    found += 1;
                },
                None => pos += 1,
            }
        }
        found
    }

    fn sweep_email_addresses(&mut self) -> usize {
        let mut found = 0;
        let mut pos = 0;
        while let Some(at) = self.text[pos..].iter().position(|&ch| ch == '@') {
            let at = pos + at;
            match extract_email_address_at(&self.text, at, self.limits.max_address_len) {
                Some(m) => {
                    self.blank(m.start, m.consumed_end + 1);
                    pos = m.consumed_end + 1;
                    found += 1;
                },
                None => pos = at + 1,
            }
        }
        found
    }

    fn blank(&mut self, start: usize, end: usize) {
        self.text[start..end].fill(' ');
    }

    fn at_line_start(&self, pos: usize) -> bool {
        pos == 0 || self.text[pos - 1] == '\n'
    }

    fn at_quotation(&self, pos: usize, prefix: &[char]) -> bool {
        self.at_line_start(pos) && self.text[pos..].starts_with(prefix)
    }

    /// Index of the start of the line after the one holding `pos`.
    fn next_line(&self, pos: usize) -> usize {
        self.text[pos..]
            .iter()
            .position(|&ch| ch == '\n')
            .map_or(self.text.len(), |i| pos + i + 1)
    }
}

/// Runs `sweep` until it reports no matches and returns the total.
///
/// Every match blanks at least one non-space character, so this terminates.
fn until_exhausted(mut sweep: impl FnMut() -> usize) -> usize {
    let mut total = 0;
    loop {
        match sweep() {
            0 => return total,
            found => total += found,
        }
    }
}
