//! Structured logging configuration.

use crate::config::LoggingSettings;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "PLAINLINK_LOG";

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "PLAINLINK_LOG_FORMAT";

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "plainlink=debug,warn";

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name. Unknown names fall back to [`LogFormat::Pretty`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directive string.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Builds the logging config from file settings and the environment.
    ///
    /// Filter precedence: `verbose`, then `PLAINLINK_LOG`, then `RUST_LOG`,
    /// then the config file, then `warn`.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        Self::resolve(
            settings,
            verbose,
            std::env::var(LOG_FILTER_ENV).ok(),
            std::env::var("RUST_LOG").ok(),
            std::env::var(LOG_FORMAT_ENV).ok(),
        )
    }

    fn resolve(
        settings: Option<&LoggingSettings>,
        verbose: bool,
        plainlink_log: Option<String>,
        rust_log: Option<String>,
        format_env: Option<String>,
    ) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let filter = if verbose {
            VERBOSE_FILTER.to_string()
        } else {
            non_empty(plainlink_log)
                .or_else(|| non_empty(rust_log))
                .or_else(|| non_empty(settings.and_then(|s| s.filter.clone())))
                .unwrap_or_else(|| DEFAULT_FILTER.to_string())
        };

        let format = non_empty(format_env)
            .or_else(|| settings.and_then(|s| s.format.clone()))
            .map_or_else(LogFormat::default, |f| LogFormat::parse(&f));

        Self { format, filter }
    }
}
