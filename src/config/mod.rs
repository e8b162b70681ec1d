//! Configuration management.
//!
//! Configuration is read from a TOML file whose fields are all optional and
//! merged over the defaults.
//!
//! ```toml
//! [limits]
//! max_url_len = 4096
//! max_address_len = 255
//!
//! [html]
//! preserve_spaces = true
//! replace_smileys = false
//! emoticon_base_url = "https://example.org/emoticons"
//!
//! [filter]
//! quote_prefix = "> "
//! filter_strings = ["-- "]
//!
//! [logging]
//! format = "json"
//! filter = "plainlink=debug"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::censor::SpellingFilterConfig;
use crate::render::HtmlFlags;
use crate::render::emoticons::DEFAULT_IMAGE_BASE_URL;
use crate::scan::ScanLimits;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "PLAINLINK_CONFIG_PATH";

/// Main configuration for plainlink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainlinkConfig {
    /// Scan length limits.
    pub limits: ScanLimits,
    /// HTML rendering settings.
    pub html: HtmlSettings,
    /// Spell-check filter settings.
    pub filter: FilterSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// HTML rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlSettings {
    /// Keep runs of spaces and leading spaces visible.
    pub preserve_spaces: bool,
    /// Replace text smileys with images.
    pub replace_smileys: bool,
    /// Leave URLs and mail addresses unlinked.
    pub ignore_urls: bool,
    /// Render `*bold*`, `_underline_`, `/italic/` and `-strike-` markup.
    pub highlight_text: bool,
    /// Base URL of emoticon images.
    pub emoticon_base_url: String,
}

impl Default for HtmlSettings {
    fn default() -> Self {
        Self {
            preserve_spaces: false,
            replace_smileys: false,
            ignore_urls: false,
            highlight_text: false,
            emoticon_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl HtmlSettings {
    /// Returns the renderer flags these settings select.
    #[must_use]
    pub fn flags(&self) -> HtmlFlags {
        let mut flags = HtmlFlags::empty();
        flags.set(HtmlFlags::PRESERVE_SPACES, self.preserve_spaces);
        flags.set(HtmlFlags::REPLACE_SMILEYS, self.replace_smileys);
        flags.set(HtmlFlags::IGNORE_URLS, self.ignore_urls);
        flags.set(HtmlFlags::HIGHLIGHT_TEXT, self.highlight_text);
        flags
    }
}

/// Spell-check filter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    /// Prefix marking quoted lines. Empty disables quote filtering.
    pub quote_prefix: String,
    /// Blank URLs.
    pub filter_urls: bool,
    /// Blank mail addresses.
    pub filter_email_addresses: bool,
    /// Literal strings to blank.
    pub filter_strings: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            quote_prefix: String::new(),
            filter_urls: true,
            filter_email_addresses: true,
            filter_strings: Vec::new(),
        }
    }
}

impl FilterSettings {
    /// Builds a spelling filter config using `limits`.
    #[must_use]
    pub fn to_filter_config(&self, limits: ScanLimits) -> SpellingFilterConfig {
        SpellingFilterConfig {
            quote_prefix: self.quote_prefix.clone(),
            filter_urls: self.filter_urls,
            filter_email_addresses: self.filter_email_addresses,
            filter_strings: self.filter_strings.clone(),
            limits,
        }
    }
}

/// Logging settings from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// `EnvFilter` directive.
    pub filter: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Limits section.
    pub limits: Option<ConfigFileLimits>,
    /// HTML section.
    pub html: Option<ConfigFileHtml>,
    /// Filter section.
    pub filter: Option<ConfigFileFilter>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// Limits section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLimits {
    /// Maximum URL length in characters.
    pub max_url_len: Option<usize>,
    /// Maximum mail address length in characters.
    pub max_address_len: Option<usize>,
}

/// HTML section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileHtml {
    /// Preserve spaces.
    pub preserve_spaces: Option<bool>,
    /// Replace smileys.
    pub replace_smileys: Option<bool>,
    /// Ignore URLs.
    pub ignore_urls: Option<bool>,
    /// Highlight markup.
    pub highlight_text: Option<bool>,
    /// Emoticon image base URL.
    pub emoticon_base_url: Option<String>,
}

/// Filter section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileFilter {
    /// Quote prefix.
    pub quote_prefix: Option<String>,
    /// Filter URLs.
    pub filter_urls: Option<bool>,
    /// Filter mail addresses.
    pub filter_email_addresses: Option<bool>,
    /// Literal strings.
    pub filter_strings: Option<Vec<String>>,
}

impl PlainlinkConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {}", path.display(), e),
            })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config file.
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/plainlink/` on macOS)
    /// 2. XDG config dir (`~/.config/plainlink/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("plainlink").join("config.toml");
        if platform_config.exists() {
            match Self::load_from_file(&platform_config) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(error = %e, "Ignoring unreadable config file"),
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("plainlink")
            .join("config.toml");
        if xdg_config.exists() {
            match Self::load_from_file(&xdg_config) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(error = %e, "Ignoring unreadable config file"),
            }
        }

        Self::default()
    }

    /// Returns the spelling filter config these settings select.
    #[must_use]
    pub fn spelling_filter_config(&self) -> SpellingFilterConfig {
        self.filter.to_filter_config(self.limits)
    }

    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(limits) = file.limits {
            if let Some(v) = limits.max_url_len {
                config.limits.max_url_len = v;
            }
            if let Some(v) = limits.max_address_len {
                config.limits.max_address_len = v;
            }
        }
        if let Some(html) = file.html {
            if let Some(v) = html.preserve_spaces {
                config.html.preserve_spaces = v;
            }
            if let Some(v) = html.replace_smileys {
                config.html.replace_smileys = v;
            }
            if let Some(v) = html.ignore_urls {
                config.html.ignore_urls = v;
            }
            if let Some(v) = html.highlight_text {
                config.html.highlight_text = v;
            }
            if let Some(v) = html.emoticon_base_url {
                config.html.emoticon_base_url = v;
            }
        }
        if let Some(filter) = file.filter {
            if let Some(v) = filter.quote_prefix {
                config.filter.quote_prefix = v;
            }
            if let Some(v) = filter.filter_urls {
                config.filter.filter_urls = v;
            }
            if let Some(v) = filter.filter_email_addresses {
                config.filter.filter_email_addresses = v;
            }
            if let Some(v) = filter.filter_strings {
                config.filter.filter_strings = v;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }
}
