//! Spell-checking filter.
//!
//! Runs a configured set of censor passes over a text and keeps both the
//! original and the filtered copy.

use tracing::instrument;

use super::TextCensor;
use crate::scan::ScanLimits;

/// Configuration for spell-checking filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingFilterConfig {
    /// Prefix marking quoted lines. Empty disables quote filtering.
    pub quote_prefix: String,
    /// Blank URLs.
    pub filter_urls: bool,
    /// Blank mail addresses.
    pub filter_email_addresses: bool,
    /// Literal strings to blank.
    pub filter_strings: Vec<String>,
    /// Length limits for the URL and address passes.
    pub limits: ScanLimits,
}

impl Default for SpellingFilterConfig {
    fn default() -> Self {
        Self {
            quote_prefix: String::new(),
            filter_urls: true,
            filter_email_addresses: true,
            filter_strings: Vec::new(),
            limits: ScanLimits::default(),
        }
    }
}

impl SpellingFilterConfig {
    /// Creates a config that filters URLs and mail addresses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quote prefix.
    #[must_use]
    pub fn with_quote_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.quote_prefix = prefix.into();
        self
    }

    /// Disables URL filtering.
    #[must_use]
    pub const fn without_urls(mut self) -> Self {
        self.filter_urls = false;
        self
    }

    /// Disables mail address filtering.
    #[must_use]
    pub const fn without_email_addresses(mut self) -> Self {
        self.filter_email_addresses = false;
        self
    }

    /// Adds a literal string to filter.
    #[must_use]
    pub fn with_filter_string(mut self, literal: impl Into<String>) -> Self {
        self.filter_strings.push(literal.into());
        self
    }

    /// Sets the length limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// A text alongside its spell-checkable copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingFilter {
    original: String,
    filtered: String,
}

impl SpellingFilter {
    /// Filters `text` according to `config`.
    ///
    /// Literal strings are blanked first. Quotations, URLs and mail addresses
    /// then repeat in that order until a round leaves the text unchanged. No
    /// recognisable span survives in the filtered text.
    #[must_use]
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn new(text: &str, config: &SpellingFilterConfig) -> Self {
        let mut censor = TextCensor::new(text).with_limits(config.limits);

        let strings: usize = config
            .filter_strings
            .iter()
            .map(|literal| censor.censor_string(literal))
            .sum();

        let (mut quotations, mut urls, mut addresses) = (0, 0, 0);
        let mut rounds = 0;
        loop {
            let before = censor.censored_text();
            rounds += 1;

            quotations += censor.censor_quotations(&config.quote_prefix);
            if config.filter_urls {
                urls += censor.censor_urls();
            }
            if config.filter_email_addresses {
                addresses += censor.censor_email_addresses();
            }

            if censor.censored_text() == before {
                break;
            }
        }

        tracing::debug!(
            strings,
            quotations,
            urls,
            addresses,
            rounds,
            "Filtered text for spell-checking"
        );

        Self {
            original: text.to_string(),
            filtered: censor.censored_text(),
        }
    }

    /// Returns the unfiltered text.
    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.original
    }

    /// Returns the filtered text.
    #[must_use]
    pub fn filtered_text(&self) -> &str {
        &self.filtered
    }

    /// Returns `true` if filtering changed anything.
    #[must_use]
    pub fn was_filtered(&self) -> bool {
        self.original != self.filtered
    }
}
