//! Configuration types and CLI options.
//!
//! This module defines the library-level [`FetchConfig`] and the command-line
//! [`Config`] parsed by the binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_USER_AGENT, MAX_REDIRECT_HOPS, MAX_RESPONSE_BODY_SIZE,
    REQUEST_TIMEOUT_SECS,
};

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
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the binary prints fetch and parse results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sectioned text summary per result
    Text,
    /// One JSON object per result
    Json,
}

/// Fetcher settings (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use adstxt_crawler::FetchConfig;
///
/// let config = FetchConfig {
///     max_redirect_hops: 3,
///     ..Default::default()
/// };
/// assert_eq!(config.max_redirect_hops, 3);
/// ```
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout
    pub timeout: Duration,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Maximum redirect hops followed for one fetch
    pub max_redirect_hops: usize,

    /// Largest accepted response body in bytes
    pub max_body_size: usize,

    /// Concurrent fetches in a batch run
    pub max_concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirect_hops: MAX_REDIRECT_HOPS,
            max_body_size: MAX_RESPONSE_BODY_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Command-line options for the `adstxt_crawler` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "adstxt_crawler",
    version,
    about = "Fetch and parse ads.txt files from publisher hosts"
)]
pub struct Config {
    /// Publisher URLs or host names to fetch ads.txt from
    pub targets: Vec<String>,

    /// File with one target per line (blank lines and `#` comments ignored)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Parse a local ads.txt file instead of fetching
    #[arg(long, conflicts_with_all = ["targets", "file"])]
    pub local: Option<PathBuf>,

    /// Maximum concurrent fetches
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Maximum redirect hops per fetch
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS)]
    pub max_redirects: usize,

    /// HTTP User-Agent header value
    #[arg(long, env = "ADSTXT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl Config {
    /// Builds the library fetch settings from the parsed options.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(self.timeout_seconds),
            user_agent: self.user_agent.clone(),
            max_redirect_hops: self.max_redirects,
            max_concurrency: self.max_concurrency.max(1),
            ..FetchConfig::default()
        }
    }
}
