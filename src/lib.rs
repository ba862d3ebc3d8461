//! adstxt_crawler library: fetch and parse ads.txt files
//!
//! This library downloads a publisher's `ads.txt` file, follows HTTP redirects
//! only within the authority scope of the publisher's root domain (at most one
//! hop may delegate to another domain), and parses the file into data records,
//! variables and severity-tagged warnings.
//!
//! # Example
//!
//! ```no_run
//! use adstxt_crawler::{FetchConfig, Fetcher};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(FetchConfig::default())?;
//! let fetched = fetcher.fetch("example.com").await?;
//!
//! println!("{} expires at {}", fetched.request.url, fetched.expires_at);
//! println!("{}", fetched.result);
//! # Ok(())
//! # }
//! ```
//!
//! Parsing needs no network and never fails on content:
//!
//! ```
//! use adstxt_crawler::{parse_file, Severity};
//!
//! let result = parse_file(b"greenadexchange.com,XF7342,\nsubdomain=dev.example.com\n");
//! assert_eq!(result.variables.len(), 1);
//! assert_eq!(result.warnings[0].severity, Severity::High);
//! assert_eq!(result.warnings[0].message, "Missing type of account/relationship (required)");
//! ```
//!
//! # Requirements
//!
//! Fetching requires a Tokio runtime. Parsing and domain resolution are synchronous.

#![warn(missing_docs)]

mod adsystems;
mod batch;
pub mod config;
mod domain;
mod error_handling;
mod fetch;
pub mod initialization;
mod parse;
mod records;
mod request;

// Re-export public API
pub use adsystems::{validate_canonical_name, AdSystem, AdSystemLookup, KnownAdSystems};
pub use batch::{fetch_all, fetch_all_with, BatchReport, Handler};
pub use config::{Config, FetchConfig, LogFormat, LogLevel, OutputFormat};
pub use domain::{root_domain, root_domain_of, validate_hostname_shape};
pub use error_handling::{
    CanonicalNameError, FetchError, InitializationError, ParseError, UrlError,
};
pub use fetch::{FetchResult, Fetcher};
pub use parse::{parse_file, parse_reader, Parser};
pub use records::{
    AccountType, DataRecord, ParseResult, Severity, VariableRecord, VariableType, Warning,
};
pub use request::{build_request, FetchRequest};
