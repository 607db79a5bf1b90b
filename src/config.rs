//! Configuration types and CLI options.
//!
//! This module defines the command-line surface, the constants used as
//! defaults, and the logging enums shared by the binary and the library.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Default number of concurrent classification workers.
///
/// Each worker runs one domain through the full DNS-then-HTTP pipeline before
/// taking the next. Ten keeps the probe rate polite for shared recon boxes;
/// raise it with `--concurrence` for large lists.
pub const DEFAULT_CONCURRENCE: usize = 10;

/// Per-request timeout for the HTTP probe.
///
/// Targets that sit behind aggressive filtering often accept the TCP
/// connection and then go silent. Five seconds bounds how long a worker can
/// be pinned by one of them.
pub const HTTP_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Conventional server/proxy identification header.
pub const HEADER_SERVER: &str = "server";
/// CDN-hint header some providers attach at the edge.
pub const HEADER_X_CDN: &str = "x-cdn";

/// Response headers inspected for CDN signatures, in inspection order.
///
/// `server` is the conventional origin/proxy banner; `x-cdn` is set by several
/// providers that scrub `server` (notably Imperva/Incapsula). To inspect more
/// headers, extend this array.
pub const INSPECTED_HEADERS: &[&str] = &[HEADER_SERVER, HEADER_X_CDN];

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options and configuration.
///
/// The same struct drives the CLI (via `clap`) and programmatic use of the
/// library; diagnostics go to stderr, so stdout stays a clean domain-per-line
/// stream that can be piped into the next tool.
///
/// # Examples
///
/// ```bash
/// # Filter a file of recon targets
/// cdnsieve -l subdomains.txt > direct.txt
///
/// # Check a single domain, narrating detections
/// cdnsieve -t www.example.com -v
///
/// # Read domains from the previous pipeline stage
/// subfinder -d example.com | cdnsieve -c 25
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cdnsieve",
    about = "Filters CDN-fronted domains out of a target list via DNS and HTTP probes."
)]
pub struct Config {
    /// File containing domains to check, one per line
    #[arg(short, long)]
    pub list: Option<PathBuf>,

    /// Single domain to check
    #[arg(short, long)]
    pub target: Option<String>,

    /// Number of concurrent classification workers
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCE)]
    pub concurrence: usize,

    /// Report each CDN detection on stderr as it happens
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list: None,
            target: None,
            concurrence: DEFAULT_CONCURRENCE,
            verbose: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
