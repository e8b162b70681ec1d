//! Property-based tests for scanning, rendering and censoring.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Censoring never changes the text length
//! - Each censoring pass is idempotent
//! - A filtered text contains no URLs, addresses, quoted lines or literals
//! - Every trigger at a clean boundary yields a URL starting there
//! - Link-free text renders without raw markup characters

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use plainlink::censor::{SpellingFilter, SpellingFilterConfig, TextCensor};
use plainlink::render::{HtmlFlags, convert_to_html};
use plainlink::scan::{extract_email_address, extract_url};
use proptest::prelude::*;

const QUOTE_PREFIX: &str = "> ";

const TRIGGERS: [&str; 13] = [
    "http://", "https://", "vnc://", "fish://", "ftp://", "ftps://", "sftp://", "smb://",
    "mailto:", "www.", "ftp.", "file://", "news:",
];

/// Text mixing words, links, addresses, quotes and punctuation.
fn message_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-zA-Zéü]{1,8}",
        Just(" ".to_string()),
        Just("\n".to_string()),
        Just("\n> ".to_string()),
        Just("\t".to_string()),
        "[.,:!?()<>\\[\\]\"&@*_/-]",
        "(http://|www\\.|ftp\\.|mailto:|news:)[a-z]{1,6}(\\.[a-z]{2,3}){0,2}",
        "[a-z]{1,5}@[a-z]{1,5}\\.[a-z]{2,3}",
    ];
    prop::collection::vec(piece, 0..40).prop_map(|pieces| pieces.concat())
}

fn censor_all(text: &str) -> String {
    let mut censor = TextCensor::new(text);
    censor.censor_quotations(QUOTE_PREFIX);
    censor.censor_urls();
    censor.censor_email_addresses();
    censor.censored_text()
}

proptest! {
    /// Property: censoring preserves the character count.
    #[test]
    fn prop_censor_preserves_length(text in message_text()) {
        let censored = censor_all(&text);
        prop_assert_eq!(censored.chars().count(), text.chars().count());
    }

    /// Property: censoring only ever writes spaces.
    #[test]
    fn prop_censor_only_blanks(text in message_text()) {
        let censored = censor_all(&text);
        for (before, after) in text.chars().zip(censored.chars()) {
            prop_assert!(after == before || after == ' ');
        }
    }

    /// Property: running any pass a second time changes nothing.
    #[test]
    fn prop_censor_passes_are_idempotent(text in message_text()) {
        let mut censor = TextCensor::new(&text);

        censor.censor_quotations(QUOTE_PREFIX);
        let once = censor.censored_text();
        prop_assert_eq!(censor.censor_quotations(QUOTE_PREFIX), 0);
        prop_assert_eq!(censor.censored_text(), once);

        censor.censor_urls();
        let once = censor.censored_text();
        prop_assert_eq!(censor.censor_urls(), 0);
        prop_assert_eq!(censor.censored_text(), once);

        censor.censor_email_addresses();
        let once = censor.censored_text();
        prop_assert_eq!(censor.censor_email_addresses(), 0);
        prop_assert_eq!(censor.censored_text(), once);

        censor.censor_string("KDE");
        let once = censor.censored_text();
        prop_assert_eq!(censor.censor_string("KDE"), 0);
        prop_assert_eq!(censor.censored_text(), once);
    }

    /// Property: literal strings are gone after censoring.
    #[test]
    fn prop_censor_string_removes_all(text in message_text(), literal in "[a-z]{1,3}") {
        let mut censor = TextCensor::new(&text);
        censor.censor_string(&literal);
        prop_assert!(!censor.censored_text().contains(literal.as_str()));
    }

    /// Property: nothing recognisable survives the spelling filter.
    #[test]
    fn prop_no_residual_matches(text in message_text(), literal in "[a-z]{1,2}") {
        let config = SpellingFilterConfig::new()
            .with_quote_prefix(QUOTE_PREFIX)
            .with_filter_string(literal.as_str());
        let filter = SpellingFilter::new(&text, &config);
        let censored = filter.filtered_text();
        let len = censored.chars().count();
        prop_assert_eq!(len, text.chars().count());

        for pos in 0..len {
            prop_assert!(extract_url(censored, pos, 4096).is_none(), "url at {} in {:?}", pos, censored);
            prop_assert!(
                extract_email_address(censored, pos, 255).is_none(),
                "address at {} in {:?}",
                pos,
                censored
            );
        }
        for line in censored.split('\n') {
            prop_assert!(!line.starts_with(QUOTE_PREFIX));
        }
        prop_assert!(!censored.contains(literal.as_str()));
    }

    /// Property: filtering an already filtered text changes nothing.
    #[test]
    fn prop_facade_reaches_fixpoint(text in message_text(), literal in "[a-zA-Z]{1,3}") {
        let config = SpellingFilterConfig::new()
            .with_quote_prefix(QUOTE_PREFIX)
            .with_filter_string(literal.as_str());
        let filter = SpellingFilter::new(&text, &config);
        prop_assert_eq!(filter.original_text(), text.as_str());

        let again = SpellingFilter::new(filter.filtered_text(), &config);
        prop_assert!(!again.was_filtered());
    }

    /// Property: the filter blanks at least what one run of the passes does.
    #[test]
    fn prop_facade_covers_passes(text in message_text()) {
        let config = SpellingFilterConfig::new().with_quote_prefix(QUOTE_PREFIX);
        let filter = SpellingFilter::new(&text, &config);
        for (manual, filtered) in censor_all(&text).chars().zip(filter.filtered_text().chars()) {
            prop_assert!(manual == filtered || filtered == ' ');
        }
    }

    /// Property: a trigger at a clean boundary always starts a URL there.
    #[test]
    fn prop_trigger_starts_url(
        before in "[ (\\[<\"\n]{0,1}",
        trigger in prop::sample::select(TRIGGERS.to_vec()),
        rest in "[a-z0-9]{1,10}(\\.[a-z]{2,3})?(/[a-z0-9]{1,6})?",
    ) {
        let text = format!("{before}{trigger}{rest}");
        let pos = before.chars().count();
        let m = extract_url(&text, pos, 4096);
        prop_assert!(m.is_some(), "{:?}", text);
        let m = m.unwrap();
        prop_assert_eq!(m.start, pos);
        prop_assert!(m.text.starts_with(trigger));
    }

    /// Property: the URL length limit is exact.
    #[test]
    fn prop_url_length_limit(host in "[a-z]{1,20}\\.[a-z]{2,3}") {
        let url = format!("http://{host}");
        let len = url.chars().count();
        prop_assert!(extract_url(&url, 0, len - 1).is_none());
        prop_assert_eq!(extract_url(&url, 0, len).map(|m| m.text), Some(url.clone()));
    }

    /// Property: text without links or markup characters renders without
    /// any raw `<` or `>` beyond line breaks.
    #[test]
    fn prop_plain_text_is_escaped(text in "[a-zA-Z0-9 <>&\"\n]{0,80}") {
        let html = convert_to_html(&text, HtmlFlags::PRESERVE_SPACES, 4096, 255);
        let stripped = html.replace("<br />", "");
        prop_assert!(!stripped.contains('<'));
        prop_assert!(!stripped.contains('>'));
        prop_assert_eq!(html.matches("<br />").count(), text.matches('\n').count());
    }
}
