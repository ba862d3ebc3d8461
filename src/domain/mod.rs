//! Root domain extraction and host name validation.
//!
//! The root domain ("public suffix" plus one label) is the authority scope of an
//! ads.txt file: a publisher answers for `example.co.uk` whether the file was
//! requested from `www.example.co.uk` or `a.b.example.co.uk`.
//!
//! Key functions:
//! - `root_domain()` - Extracts the root domain from a URL or bare host name
//! - `validate_hostname_shape()` - Checks that a string is a bare host name

use std::borrow::Cow;
use std::sync::LazyLock;

use psl::{List, Psl};
use regex::Regex;
use url::{Host, Url};

use crate::config::DEFAULT_SCHEME;
use crate::error_handling::UrlError;

/// Maximum length of a DNS name in its textual form.
const MAX_HOSTNAME_LENGTH: usize = 253;

// Dot-separated LDH labels, at least two, alphabetic-led top level label
const HOSTNAME_PATTERN: &str =
    r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z](?:[a-z0-9-]{0,61}[a-z0-9])?$";

fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static HOSTNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(HOSTNAME_PATTERN, "HOSTNAME_RE"));

// Scheme at the very start of the input; a `://` inside a query does not count
const SCHEME_PREFIX_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.-]*://";

static SCHEME_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(SCHEME_PREFIX_PATTERN, "SCHEME_PREFIX_RE"));

/// Prefixes `http://` to inputs that carry no scheme.
///
/// `url::Url` would otherwise read `example.com:8080` as scheme `example.com`.
pub(crate) fn with_default_scheme(input: &str) -> Cow<'_, str> {
    if SCHEME_PREFIX_RE.is_match(input) {
        Cow::Borrowed(input)
    } else if input.starts_with("//") {
        Cow::Owned(format!("{DEFAULT_SCHEME}:{input}"))
    } else {
        Cow::Owned(format!("{DEFAULT_SCHEME}://{input}"))
    }
}

/// Parses `input` as an absolute URL, defaulting the scheme to `http`.
///
/// # Errors
///
/// Returns a `UrlError` if the input is empty or is not a valid URL.
pub(crate) fn parse_with_default_scheme(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::new(input, "empty input"));
    }
    Url::parse(&with_default_scheme(trimmed)).map_err(|e| UrlError::new(input, e.to_string()))
}

/// Extracts the root domain from a URL or bare host name.
///
/// # Arguments
///
/// * `input` - A URL (`https://www.example.com/path`) or host (`www.example.com/`)
///
/// # Returns
///
/// The lower-cased root domain (e.g., "example.co.uk" from "http://a.b.example.co.uk/x").
/// IP address hosts have no public suffix and are returned as-is.
///
/// # Errors
///
/// Returns a `UrlError` if the input cannot be parsed, has no host, or the host
/// has no dot-separated labels (e.g. `localhost`).
pub fn root_domain(input: &str) -> Result<String, UrlError> {
    let parsed = parse_with_default_scheme(input)?;
    root_domain_of(&parsed)
}

/// Extracts the root domain from an already parsed URL.
///
/// # Errors
///
/// See [`root_domain`].
pub fn root_domain_of(url: &Url) -> Result<String, UrlError> {
    match url.host() {
        None => Err(UrlError::new(url.as_str(), "URL has no host component")),
        Some(Host::Ipv4(ip)) => Ok(ip.to_string()),
        Some(Host::Ipv6(ip)) => Ok(ip.to_string()),
        Some(Host::Domain(host)) => {
            let host = host.trim_end_matches('.').to_ascii_lowercase();
            if !host.contains('.') {
                return Err(UrlError::new(
                    url.as_str(),
                    format!("host [{host}] has no dot-separated labels"),
                ));
            }
            if host.split('.').any(str::is_empty) {
                return Err(UrlError::new(
                    url.as_str(),
                    format!("host [{host}] has an empty label"),
                ));
            }
            let domain = List.domain(host.as_bytes()).ok_or_else(|| {
                UrlError::new(
                    url.as_str(),
                    format!("host [{host}] is a public suffix and has no root domain"),
                )
            })?;
            Ok(String::from_utf8_lossy(domain.as_bytes()).into_owned())
        }
    }
}

/// Checks that `input` is a bare host name such as `ads.example.com`.
///
/// Rejects anything carrying a scheme, path, query, port or whitespace, and
/// single-label names. Used to screen the advertising system field of data records.
pub fn validate_hostname_shape(input: &str) -> bool {
    input.len() <= MAX_HOSTNAME_LENGTH && HOSTNAME_RE.is_match(input)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
