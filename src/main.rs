//! Binary entry point for plainlink.
//!
//! Renders plain text as link-ified HTML, filters it for spell-checking or
//! lists the links it contains.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use plainlink::config::CONFIG_PATH_ENV;
use plainlink::observability;
use plainlink::render::{ImageTheme, init_global_theme};
use plainlink::scan::find_links;
use plainlink::{HtmlFlags, HtmlRenderer, PlainlinkConfig, SpellingFilter};

/// Plainlink - link-ify and spell-check filter plain message text.
#[derive(Parser)]
#[command(name = "plainlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Convert plain text to HTML.
    Html {
        /// Input file (default: stdin).
        file: Option<PathBuf>,

        /// Keep runs of spaces and leading spaces visible.
        #[arg(long)]
        preserve_spaces: bool,

        /// Replace text smileys with images.
        #[arg(long)]
        smileys: bool,

        /// Embed emoticon images from this directory as data URLs.
        #[arg(long)]
        emoticon_dir: Option<PathBuf>,

        /// Leave URLs and mail addresses unlinked.
        #[arg(long)]
        ignore_urls: bool,

        /// Render emphasis markup.
        #[arg(long)]
        highlight: bool,

        /// Maximum URL length.
        #[arg(long)]
        max_url_len: Option<usize>,

        /// Maximum mail address length.
        #[arg(long)]
        max_address_len: Option<usize>,
    },

    /// Blank quotes, links and strings for spell-checking.
    ///
    /// With neither --urls nor --emails the configured link filtering is
    /// used; otherwise only the named kinds are blanked.
    Filter {
        /// Input file (default: stdin).
        file: Option<PathBuf>,

        /// Prefix marking quoted lines.
        #[arg(short, long)]
        quote_prefix: Option<String>,

        /// Blank URLs.
        #[arg(long)]
        urls: bool,

        /// Blank mail addresses.
        #[arg(long)]
        emails: bool,

        /// Literal string to blank (repeatable).
        #[arg(short, long = "strip")]
        strip: Vec<String>,
    },

    /// List recognised URLs and mail addresses.
    Links {
        /// Input file (default: stdin).
        file: Option<PathBuf>,

        /// Print JSON instead of one link per line.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_config(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: PlainlinkConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Html {
            file,
            preserve_spaces,
            smileys,
            emoticon_dir,
            ignore_urls,
            highlight,
            max_url_len,
            max_address_len,
        } => {
            // Command-line switches only add to the configured flags.
            let mut flags = config.html.flags();
            for (on, flag) in [
                (preserve_spaces, HtmlFlags::PRESERVE_SPACES),
                (smileys, HtmlFlags::REPLACE_SMILEYS),
                (ignore_urls, HtmlFlags::IGNORE_URLS),
                (highlight, HtmlFlags::HIGHLIGHT_TEXT),
            ] {
                if on {
                    flags.insert(flag);
                }
            }

            let mut limits = config.limits;
            if let Some(v) = max_url_len {
                limits.max_url_len = v;
            }
            if let Some(v) = max_address_len {
                limits.max_address_len = v;
            }

            if flags.contains(HtmlFlags::REPLACE_SMILEYS) {
                install_theme(&config, emoticon_dir.as_deref())?;
            }

            cmd_html(file.as_deref(), flags, limits)
        },

        Commands::Filter {
            file,
            quote_prefix,
            urls,
            emails,
            strip,
        } => {
            let mut filter = config.spelling_filter_config();
            if let Some(prefix) = quote_prefix {
                filter.quote_prefix = prefix;
            }
            if urls || emails {
                filter.filter_urls = urls;
                filter.filter_email_addresses = emails;
            }
            filter.filter_strings.extend(strip);

            cmd_filter(file.as_deref(), &filter)
        },

        Commands::Links { file, json } => cmd_links(file.as_deref(), json, config.limits),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<PlainlinkConfig, Box<dyn std::error::Error>> {
    if let Some(config_path) = path {
        return PlainlinkConfig::load_from_file(Path::new(config_path))
            .map_err(std::convert::Into::into);
    }

    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        if !config_path.trim().is_empty() {
            return PlainlinkConfig::load_from_file(Path::new(&config_path))
                .map_err(std::convert::Into::into);
        }
    }

    Ok(PlainlinkConfig::load_default())
}

/// Installs the process-wide emoticon theme.
fn install_theme(
    config: &PlainlinkConfig,
    emoticon_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let theme = match emoticon_dir {
        Some(dir) => ImageTheme::embedded(dir)?,
        None => ImageTheme::new(&config.html.emoticon_base_url),
    };
    init_global_theme(Arc::new(theme))?;
    Ok(())
}

/// Reads the whole input from `file`, or stdin if absent.
fn read_input(file: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = match file {
        Some(path) => std::fs::read(path).map_err(|e| plainlink::Error::OperationFailed {
            operation: "read_input".to_string(),
            cause: format!("{}: {}", path.display(), e),
        })?,
        None => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            bytes
        },
    };

    String::from_utf8(bytes)
        .map_err(|e| plainlink::Error::InvalidInput(format!("input is not UTF-8: {e}")).into())
}

/// Renders the input as HTML.
fn cmd_html(
    file: Option<&Path>,
    flags: HtmlFlags,
    limits: plainlink::ScanLimits,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(file)?;
    let html = HtmlRenderer::new()
        .with_flags(flags)
        .with_limits(limits)
        .render(&text);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{html}")?;
    Ok(())
}

/// Prints the spell-check filtered input.
fn cmd_filter(
    file: Option<&Path>,
    config: &plainlink::SpellingFilterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(file)?;
    let filter = SpellingFilter::new(&text, config);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(filter.filtered_text().as_bytes())?;
    Ok(())
}

/// Lists the links in the input.
fn cmd_links(
    file: Option<&Path>,
    json: bool,
    limits: plainlink::ScanLimits,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(file)?;
    let links = find_links(&text, limits);

    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &links)?;
        writeln!(stdout)?;
    } else {
        for link in &links {
            writeln!(
                stdout,
                "{}\t{}..{}\t{}\t{}",
                link.kind.as_str(),
                link.start,
                link.end,
                link.text,
                link.href
            )?;
        }
    }
    Ok(())
}
