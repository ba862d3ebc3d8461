//! HTTP client initialization.
//!
//! The fetcher observes every 3xx response itself and opens a fresh connection
//! for each hop, so the client it uses always has redirect following and
//! connection pooling switched off.

use reqwest::ClientBuilder;

use crate::config::FetchConfig;
use crate::error_handling::InitializationError;

/// Builds the HTTP client used for ads.txt fetches.
///
/// Layers the fetch policy on top of `builder`:
/// - Redirects are not followed (raw 3xx responses are returned)
/// - No idle connections are kept, so each hop connects anew
/// - Per-request timeout and User-Agent from `config`
///
/// Callers can preconfigure `builder` (e.g. DNS overrides); the settings above
/// always win.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the client cannot be built.
pub fn init_fetch_client(
    config: &FetchConfig,
    builder: ClientBuilder,
) -> Result<reqwest::Client, InitializationError> {
    let client = builder
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
