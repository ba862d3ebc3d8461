//! ads.txt fetch targets.
//!
//! A [`FetchRequest`] pairs the absolute ads.txt URL with the root domain that
//! bounds the authority of any redirect followed while fetching it.

use serde::{Deserialize, Serialize};

use crate::config::ADS_TXT_PATH;
use crate::domain::{parse_with_default_scheme, root_domain};
use crate::error_handling::UrlError;

/// A normalized ads.txt fetch target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Absolute URL ending with `/ads.txt`
    pub url: String,
    /// Root domain of the target as supplied by the caller
    pub domain: String,
}

impl FetchRequest {
    /// See [`build_request`].
    ///
    /// # Errors
    ///
    /// Returns a `UrlError` when the input cannot be normalized.
    pub fn new(raw: &str) -> Result<Self, UrlError> {
        build_request(raw)
    }
}

/// Normalizes a publisher URL or host name into an ads.txt fetch target.
///
/// The scheme defaults to `http`. `/ads.txt` is appended to the path unless it
/// already ends with it. The root domain is taken from `raw` itself, never from
/// the rewritten URL.
///
/// # Examples
///
/// ```
/// use adstxt_crawler::build_request;
///
/// let request = build_request("www.example.com/").unwrap();
/// assert_eq!(request.url, "http://www.example.com/ads.txt");
/// assert_eq!(request.domain, "example.com");
/// ```
///
/// # Errors
///
/// Returns a `UrlError` if the input is not a URL, uses a scheme other than
/// `http`/`https`, or has no root domain.
pub fn build_request(raw: &str) -> Result<FetchRequest, UrlError> {
    let mut url = parse_with_default_scheme(raw)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlError::new(
            raw,
            format!("unsupported scheme [{}]", url.scheme()),
        ));
    }

    if !url.path().ends_with(ADS_TXT_PATH) {
        let path = format!("{}{}", url.path().trim_end_matches('/'), ADS_TXT_PATH);
        url.set_path(&path);
    }

    let domain = root_domain(raw)?;
    Ok(FetchRequest {
        url: url.to_string(),
        domain,
    })
}
