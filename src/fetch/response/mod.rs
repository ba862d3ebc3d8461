//! Response classification and body handling.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use reqwest::header::{HeaderMap, CONTENT_TYPE, EXPIRES};
use reqwest::StatusCode;

use crate::config::{DEFAULT_EXPIRY_DAYS, EXPECTED_CONTENT_TYPE};
use crate::error_handling::FetchError;

// Obsolete HTTP-date forms still accepted by HTTP/1.1 recipients (RFC 9110 5.6.7)
const RFC850_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// What a single HTTP response means for the fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpOutcome {
    /// 200: the body is the ads.txt file
    Success,
    /// 3xx: follow `Location` if the authority rule allows
    Redirected,
    /// 4xx
    ClientError,
    /// Anything else, including other 2xx codes
    Unknown,
}

impl From<StatusCode> for HttpOutcome {
    fn from(status: StatusCode) -> Self {
        match status.as_u16() {
            200 => HttpOutcome::Success,
            300..=399 => HttpOutcome::Redirected,
            400..=499 => HttpOutcome::ClientError,
            _ => HttpOutcome::Unknown,
        }
    }
}

/// Rejects any response whose media type is not `text/plain`.
///
/// # Errors
///
/// Returns `FetchError::BadContentType`; a missing header counts as empty.
pub(crate) fn check_content_type(url: &str, headers: &HeaderMap) -> Result<(), FetchError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();

    let prefix = EXPECTED_CONTENT_TYPE.len();
    let accepted = content_type
        .get(..prefix)
        .is_some_and(|head| head.eq_ignore_ascii_case(EXPECTED_CONTENT_TYPE));
    if accepted {
        Ok(())
    } else {
        Err(FetchError::BadContentType {
            url: url.to_string(),
            content_type,
        })
    }
}

/// Reads the response body, failing once it grows past `limit` bytes.
///
/// # Errors
///
/// - `FetchError::BodyTooLarge` if the declared or received length exceeds `limit`
/// - `FetchError::Transport` if the body stream fails
pub(crate) async fn read_body(
    url: &str,
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    let too_large = || FetchError::BodyTooLarge {
        url: url.to_string(),
        limit,
    };
    if response
        .content_length()
        .is_some_and(|len| len > limit as u64)
    {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?
    {
        if body.len() + chunk.len() > limit {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Parses an HTTP-date in any of its three forms.
///
/// - IMF-fixdate: `Sun, 06 Nov 1994 08:49:37 GMT`
/// - RFC 850: `Sunday, 06-Nov-94 08:49:37 GMT`
/// - asctime: `Sun Nov  6 08:49:37 1994`
pub(crate) fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }
    [RFC850_FORMAT, ASCTIME_FORMAT]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Expiry of the fetched file: the `Expires` header if usable, else `now` + 7 days.
pub(crate) fn expires_at(url: &str, headers: &HeaderMap, now: DateTime<Utc>) -> DateTime<Utc> {
    let fallback = now + Duration::days(DEFAULT_EXPIRY_DAYS);
    let Some(value) = headers.get(EXPIRES) else {
        return fallback;
    };
    match value.to_str().ok().and_then(parse_http_date) {
        Some(date) => date,
        None => {
            log::debug!(
                "[{}] Error when parsing HTTP expires header from response [{:?}]",
                url,
                value
            );
            fallback
        }
    }
}
