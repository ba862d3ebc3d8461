//! Configuration constants.
//!
//! This module defines the defaults used by the fetcher, the batch runner and the
//! CLI: timeouts, limits, and the fixed request header values.

/// Default User-Agent string for ads.txt requests.
///
/// Identifies the crawler and points operators at the project page, as the
/// IAB ads.txt specification recommends for consuming systems.
pub const DEFAULT_USER_AGENT: &str = "+https://github.com/tzafrirben/go-adstxt-crawler";

/// Per-request timeout in seconds.
///
/// Bounds each individual HTTP round-trip, not the whole redirect chain.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of redirect hops to follow before giving up.
/// Prevents pathological or looping redirect chains.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Maximum response body size in bytes (2MB).
/// ads.txt files are small text files; anything larger is rejected.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Default expiry window in days when the server sends no usable `Expires` header
/// (section 3.6 of the ads.txt specification).
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Default number of concurrent fetches in a batch run.
pub const DEFAULT_MAX_CONCURRENCY: usize = 30;

/// Path suffix every ads.txt URL must end with.
pub const ADS_TXT_PATH: &str = "/ads.txt";

/// Scheme prepended to inputs that carry none.
pub const DEFAULT_SCHEME: &str = "http";

/// `Accept` header value.
pub const ACCEPT_VALUE: &str = "text/plain";
/// `Accept-Charset` header value.
pub const ACCEPT_CHARSET_VALUE: &str = "utf-8";
/// `Content-Type` header value sent with the (bodiless) request.
pub const CONTENT_TYPE_VALUE: &str = "text/plain; charset=utf-8";

/// The only acceptable response media type prefix.
pub const EXPECTED_CONTENT_TYPE: &str = "text/plain";
