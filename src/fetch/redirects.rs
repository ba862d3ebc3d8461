//! Redirect authority checks.
//!
//! A redirect is followed only while it stays inside the authority scope of the
//! original root domain. One hop may delegate that authority to another root
//! domain; from then on every hop must stay inside the delegate's domain.

use reqwest::header::{HeaderMap, LOCATION};
use reqwest::Url;

use crate::config::ADS_TXT_PATH;
use crate::domain::{root_domain, root_domain_of};
use crate::error_handling::FetchError;
use crate::request::FetchRequest;

/// Reads the `Location` header of a 3xx response and resolves it against the
/// URL that was just requested.
///
/// # Errors
///
/// Returns `FetchError::InvalidRedirect` if the header is missing, is not
/// valid text, or cannot be resolved to an absolute URL.
pub(crate) fn resolve_location(
    request: &FetchRequest,
    headers: &HeaderMap,
) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidRedirect {
        domain: request.domain.clone(),
        url: request.url.clone(),
        reason,
    };

    let location = headers
        .get(LOCATION)
        .ok_or_else(|| invalid("missing Location header".to_string()))?
        .to_str()
        .map_err(|e| invalid(format!("Location header is not valid text: {e}")))?
        .trim();
    if location.is_empty() {
        return Err(invalid("empty Location header".to_string()));
    }

    let base = Url::parse(&request.url).map_err(|e| invalid(e.to_string()))?;
    base.join(location)
        .map_err(|e| invalid(format!("cannot resolve [{location}]: {e}")))
}

/// Checks that following `request` to `target` keeps the delegation rule.
///
/// With `D0` the original root domain, `Dprev` the root domain of the URL just
/// requested and `D1` the root domain of `target`:
/// - while `Dprev == D0` any target is allowed
/// - once authority was delegated (`Dprev != D0`) only `D1 == Dprev` is allowed
///
/// The target must also be an ads.txt URL.
///
/// # Errors
///
/// - `FetchError::RedirectParse` if `target` has no root domain
/// - `FetchError::ForbiddenCrossDomainRedirect` for a second hop out of scope
/// - `FetchError::RedirectToInvalidTarget` if `target` does not end with `/ads.txt`
pub(crate) fn check_redirect(request: &FetchRequest, target: &Url) -> Result<(), FetchError> {
    let target_domain = root_domain_of(target).map_err(|source| FetchError::RedirectParse {
        domain: request.domain.clone(),
        url: request.url.clone(),
        redirect: target.to_string(),
        source,
    })?;
    let previous_domain = root_domain(&request.url).map_err(|source| FetchError::RedirectParse {
        domain: request.domain.clone(),
        url: request.url.clone(),
        redirect: target.to_string(),
        source,
    })?;

    if previous_domain != request.domain && previous_domain != target_domain {
        return Err(FetchError::ForbiddenCrossDomainRedirect {
            original: request.domain.clone(),
            previous: previous_domain,
            target: target_domain,
        });
    }

    if !target.as_str().ends_with(ADS_TXT_PATH) {
        return Err(FetchError::RedirectToInvalidTarget {
            domain: request.domain.clone(),
            from: request.url.clone(),
            to: target.to_string(),
        });
    }

    Ok(())
}
