//! ads.txt fetching.
//!
//! [`Fetcher`] sends one request per hop, classifies each response and follows
//! 3xx responses itself, checking every hop against the redirect delegation
//! rule (see [`redirects`]). A 200 `text/plain` body is handed to the parser.

mod redirects;
mod request;
mod response;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::ClientBuilder;
use serde::{Deserialize, Serialize};

use crate::adsystems::AdSystemLookup;
use crate::config::FetchConfig;
use crate::error_handling::FetchError;
use crate::initialization::init_fetch_client;
use crate::parse::Parser;
use crate::records::ParseResult;
use crate::request::{build_request, FetchRequest};

use redirects::{check_redirect, resolve_location};
use request::RequestHeaders;
use response::{check_content_type, expires_at, read_body, HttpOutcome};

/// A fetched and parsed ads.txt file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    /// The request as finally served: `url` is the last URL requested
    pub request: FetchRequest,
    /// Parsed file content
    pub result: ParseResult,
    /// When the file should be fetched again
    pub expires_at: DateTime<Utc>,
}

/// Downloads and parses ads.txt files.
///
/// A fetcher carries no per-fetch state; one instance may serve any number of
/// sequential or concurrent fetches.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    config: FetchConfig,
    ad_systems: Option<Arc<dyn AdSystemLookup>>,
}

impl Fetcher {
    /// Creates a fetcher with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Initialization` if the HTTP client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        Self::with_client_builder(config, ClientBuilder::new())
    }

    /// Creates a fetcher whose client starts from `builder`.
    ///
    /// Redirect following, connection pooling, timeout and User-Agent are
    /// always overridden with the fetch policy.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Initialization` if the HTTP client cannot be built.
    pub fn with_client_builder(
        config: FetchConfig,
        builder: ClientBuilder,
    ) -> Result<Self, FetchError> {
        let client = init_fetch_client(&config, builder)?;
        Ok(Self {
            client,
            config,
            ad_systems: None,
        })
    }

    /// Checks advertising systems of fetched files against `lookup`.
    pub fn with_ad_systems(mut self, lookup: Arc<dyn AdSystemLookup>) -> Self {
        self.ad_systems = Some(lookup);
        self
    }

    /// Settings this fetcher was built with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches the ads.txt file for a publisher URL or host name.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the target is not a valid URL or the fetch fails
    /// (see [`Fetcher::fetch_request`]).
    pub async fn fetch(&self, target: &str) -> Result<FetchResult, FetchError> {
        let request = build_request(target)?;
        self.fetch_request(request).await
    }

    /// Fetches the file for an already normalized request.
    ///
    /// # Errors
    ///
    /// - `FetchError::Transport` on network failure or timeout
    /// - `FetchError::ClientError` on 4xx, `FetchError::UnknownServerStatus` on
    ///   any status other than 200, 3xx or 4xx
    /// - redirect errors when a hop breaks the delegation rule, is not an
    ///   ads.txt URL, or exceeds the hop limit
    /// - `FetchError::BadContentType` / `FetchError::BodyTooLarge` on a bad 200
    pub async fn fetch_request(&self, mut request: FetchRequest) -> Result<FetchResult, FetchError> {
        debug!("[{}] fetching Ads.txt URL [{}]", request.domain, request.url);
        let mut hops = 0;

        loop {
            let response = self.send(&request.url).await?;
            let status = response.status();

            match HttpOutcome::from(status) {
                HttpOutcome::Success => return self.complete(request, response).await,
                HttpOutcome::Redirected => {
                    if hops >= self.config.max_redirect_hops {
                        return Err(FetchError::TooManyRedirects {
                            domain: request.domain,
                            url: request.url,
                            max: self.config.max_redirect_hops,
                        });
                    }
                    let target = resolve_location(&request, response.headers())?;
                    info!("[{}]: redirect from [{}] to [{}]", status, request.url, target);
                    check_redirect(&request, &target)?;
                    request.url = target.into();
                    hops += 1;
                }
                HttpOutcome::ClientError => {
                    return Err(FetchError::ClientError {
                        status: status.as_u16(),
                        domain: request.domain,
                        url: request.url,
                    })
                }
                HttpOutcome::Unknown => {
                    return Err(FetchError::UnknownServerStatus {
                        status: status.as_u16(),
                        domain: request.domain,
                        url: request.url,
                    })
                }
            }
        }
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!("GET {} with headers {:?}", url, RequestHeaders::as_vec());
        RequestHeaders::apply_to_request_builder(self.client.get(url))
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })
    }

    async fn complete(
        &self,
        request: FetchRequest,
        response: reqwest::Response,
    ) -> Result<FetchResult, FetchError> {
        check_content_type(&request.url, response.headers())?;
        let expires_at = expires_at(&request.url, response.headers(), Utc::now());
        let body = read_body(&request.url, response, self.config.max_body_size).await?;

        let result = Parser::with_optional_ad_systems(self.ad_systems.as_deref()).parse(&body);
        debug!(
            "[{}] parsed Ads.txt URL [{}]: {} records, {} variables, {} warnings",
            request.domain,
            request.url,
            result.data_records.len(),
            result.variables.len(),
            result.warnings.len()
        );

        Ok(FetchResult {
            request,
            result,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
