//! Error type definitions.
//!
//! Structural failures abort a single fetch and are surfaced as typed errors.
//! Content problems inside an ads.txt file are never errors; they become
//! [`Warning`](crate::Warning)s on the parse result.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// A URL or host name that cannot be turned into a root domain or fetch target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{input}] invalid URL: {reason}")]
pub struct UrlError {
    /// The input as supplied by the caller
    pub input: String,
    /// Why it was rejected
    pub reason: String,
}

impl UrlError {
    pub(crate) fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure to read an ads.txt byte stream.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("failed to read ads.txt content: {0}")]
    Read(#[from] std::io::Error),
}

/// An advertising system name the registry does not recognize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalNameError {
    /// The name is unknown to the registry or is not a canonical name.
    #[error("{0} is not a known advertising system canonical name")]
    UnknownOrInvalidCName(String),
}

/// Errors that abort a single ads.txt fetch.
///
/// Messages follow the `[context] detail` layout so they can be logged as-is.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The target could not be normalized into an ads.txt request.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    /// DNS, connect, timeout or body read failure.
    #[error("[{url}] request failed: {source}")]
    Transport {
        /// URL being requested
        url: String,
        /// Underlying transport error
        #[source]
        source: ReqwestError,
    },

    /// The fetcher's HTTP client could not be built.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// A 200 response whose media type is not `text/plain`.
    #[error("[{url}] Ads.txt file content type should be 'text/plain' and not [{content_type}]")]
    BadContentType {
        /// URL that served the response
        url: String,
        /// The `Content-Type` header value (empty when missing)
        content_type: String,
    },

    /// A 200 response larger than the configured limit.
    #[error("[{url}] Ads.txt file exceeds the maximum size of {limit} bytes")]
    BodyTooLarge {
        /// URL that served the response
        url: String,
        /// Configured limit in bytes
        limit: usize,
    },

    /// A 3xx response without a usable `Location` header.
    #[error("[{domain}] invalid redirect from Ads.txt URL [{url}]: {reason}")]
    InvalidRedirect {
        /// Original root domain
        domain: String,
        /// URL that answered with the redirect
        url: String,
        /// Why the redirect could not be followed
        reason: String,
    },

    /// The redirect target has no derivable root domain.
    #[error("[{domain}] failed to parse root domain from HTTP redirect response header. Ads.txt URL [{url}] redirect [{redirect}] error [{source}]")]
    RedirectParse {
        /// Original root domain
        domain: String,
        /// URL that answered with the redirect
        url: String,
        /// Resolved redirect target
        redirect: String,
        /// Root domain failure
        #[source]
        source: UrlError,
    },

    /// The redirect target is not an ads.txt file.
    #[error("[{domain}] failed to get Ads.txt file, redirect from [{from}] to invalid Ads.txt URL [{to}]")]
    RedirectToInvalidTarget {
        /// Original root domain
        domain: String,
        /// URL that answered with the redirect
        from: String,
        /// Redirect target
        to: String,
    },

    /// A second hop outside the original root domain.
    #[error("Only single redirect out of original root domain scope [{original}] is allowed. Additional redirect from [{previous}] to [{target}] is forbidden")]
    ForbiddenCrossDomainRedirect {
        /// Root domain of the original request
        original: String,
        /// Root domain of the URL that redirected
        previous: String,
        /// Root domain of the redirect target
        target: String,
    },

    /// The chain exceeded the configured hop limit.
    #[error("[{domain}] too many redirects (more than {max}) while fetching Ads.txt URL [{url}]")]
    TooManyRedirects {
        /// Original root domain
        domain: String,
        /// Last URL requested
        url: String,
        /// Configured hop limit
        max: usize,
    },

    /// 4xx response from the remote host.
    #[error("[{status}] remote host [{domain}] Ads.txt URL [{url}]")]
    ClientError {
        /// HTTP status code
        status: u16,
        /// Original root domain
        domain: String,
        /// URL that answered
        url: String,
    },

    /// Any status other than 200, 3xx or 4xx.
    #[error("[{status}] unexpected response from remote host [{domain}] Ads.txt URL [{url}]")]
    UnknownServerStatus {
        /// HTTP status code
        status: u16,
        /// Original root domain
        domain: String,
        /// URL that answered
        url: String,
    },
}

impl FetchError {
    /// Short, stable label for the error kind (used in logs and batch summaries).
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl(_) => "invalid URL",
            FetchError::Transport { source, .. } if source.is_timeout() => "request timeout",
            FetchError::Transport { source, .. } if source.is_connect() => "connect error",
            FetchError::Transport { .. } => "transport error",
            FetchError::Initialization(_) => "client initialization error",
            FetchError::BadContentType { .. } => "bad content type",
            FetchError::BodyTooLarge { .. } => "body too large",
            FetchError::InvalidRedirect { .. } => "invalid redirect",
            FetchError::RedirectParse { .. } => "unparseable redirect",
            FetchError::RedirectToInvalidTarget { .. } => "redirect to invalid target",
            FetchError::ForbiddenCrossDomainRedirect { .. } => "forbidden cross-domain redirect",
            FetchError::TooManyRedirects { .. } => "too many redirects",
            FetchError::ClientError { .. } => "client error",
            FetchError::UnknownServerStatus { .. } => "unknown server status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_redirect_message_names_all_domains() {
        let err = FetchError::ForbiddenCrossDomainRedirect {
            original: "publisher.com".to_string(),
            previous: "delegate.net".to_string(),
            target: "third.org".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("[publisher.com]"));
        assert!(msg.contains("[delegate.net]"));
        assert!(msg.contains("[third.org]"));
        assert_eq!(err.kind(), "forbidden cross-domain redirect");
    }

    #[test]
    fn test_client_error_message() {
        let err = FetchError::ClientError {
            status: 404,
            domain: "example.com".to_string(),
            url: "http://example.com/ads.txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "[404] remote host [example.com] Ads.txt URL [http://example.com/ads.txt]"
        );
    }

    #[test]
    fn test_url_error_converts_into_fetch_error() {
        let err: FetchError = UrlError::new("not a url", "no host").into();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
        assert_eq!(err.to_string(), "[not a url] invalid URL: no host");
    }

    #[test]
    fn test_canonical_name_error_message() {
        let err = CanonicalNameError::UnknownOrInvalidCName("example.com".to_string());
        assert_eq!(
            err.to_string(),
            "example.com is not a known advertising system canonical name"
        );
    }
}
