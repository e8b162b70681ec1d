//! # Plainlink
//!
//! Plain-text scanning for mail and PIM clients.
//!
//! Plainlink recognises hyperlink-like spans (URLs, bareword hosts such as
//! `www.example.com`, mail addresses) and simple emphasis markup inside free
//! form message text. It offers two consumers of those recognisers:
//!
//! - [`render`] turns the text into entity-escaped, link-ified HTML markup.
//! - [`censor`] produces a same-length copy with quoted-reply blocks, links
//!   and addresses blanked out, so a spell-checker can skip them while keeping
//!   offsets aligned with the original.
//!
//! The recognisers are deliberately approximate: they are not RFC 3986 or
//! RFC 5322 parsers, and their length limits are heuristic guards.
//!
//! ## Example
//!
//! ```rust
//! use plainlink::render::{HtmlFlags, convert_to_html};
//!
//! let html = convert_to_html("See www.kde.org.", HtmlFlags::empty(), 4096, 255);
//! assert_eq!(
//!     html,
//!     "See <a href=\"http://www.kde.org\">www.kde.org</a>."
//! );
//! ```
//!
//! ```rust
//! use plainlink::censor::{SpellingFilter, SpellingFilterConfig};
//!
//! let config = SpellingFilterConfig::new().without_urls();
//! let filter = SpellingFilter::new("mail foo@bar.baz now", &config);
//! assert_eq!(filter.filtered_text(), "mail             now");
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod censor;
pub mod config;
pub mod observability;
pub mod render;
pub mod scan;

pub use censor::{SpellingFilter, SpellingFilterConfig, TextCensor};
pub use config::PlainlinkConfig;
pub use render::{HtmlFlags, HtmlRenderer, convert_to_html};
pub use scan::{Link, LinkKind, ScanLimits, ScanMatch, extract_email_address, extract_url};

/// Error type for plainlink operations.
///
/// The scanning core never fails; these variants only surface at the edges
/// (configuration files, image files, process-wide initialisation, CLI input).
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | CLI input is not valid UTF-8, a config value is out of range |
/// | `OperationFailed` | File I/O fails, TOML parsing fails |
/// | `AlreadyInitialized` | A one-time global (emoticon theme, logging) is set twice |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A process-wide component was initialised more than once.
    #[error("already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result type alias for plainlink operations.
pub type Result<T> = std::result::Result<T, Error>;
