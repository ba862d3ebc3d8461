//! HTTP request building.

use reqwest::header::{ACCEPT, ACCEPT_CHARSET, CONTENT_TYPE};

use crate::config::{ACCEPT_CHARSET_VALUE, ACCEPT_VALUE, CONTENT_TYPE_VALUE};

/// Fixed headers sent with every ads.txt request.
///
/// The User-Agent is set on the client itself (see
/// [`init_fetch_client`](crate::initialization::init_fetch_client)).
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Header (name, value) pairs, for logging.
    pub(crate) fn as_vec() -> Vec<(String, String)> {
        vec![
            (ACCEPT.to_string(), ACCEPT_VALUE.to_string()),
            (ACCEPT_CHARSET.to_string(), ACCEPT_CHARSET_VALUE.to_string()),
            (CONTENT_TYPE.to_string(), CONTENT_TYPE_VALUE.to_string()),
        ]
    }

    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(ACCEPT, ACCEPT_VALUE)
            .header(ACCEPT_CHARSET, ACCEPT_CHARSET_VALUE)
            .header(CONTENT_TYPE, CONTENT_TYPE_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers_applied() {
        let client = reqwest::Client::new();
        let request =
            RequestHeaders::apply_to_request_builder(client.get("http://example.com/ads.txt"))
                .build()
                .unwrap();

        let headers = request.headers();
        assert_eq!(headers.get(ACCEPT).unwrap(), "text/plain");
        assert_eq!(headers.get(ACCEPT_CHARSET).unwrap(), "utf-8");
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        for (name, value) in RequestHeaders::as_vec() {
            assert_eq!(headers.get(name.as_str()).unwrap(), value.as_str());
        }
    }
}
