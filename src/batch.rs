//! Concurrent fetching of many ads.txt files.
//!
//! Each target is fetched by its own [`Fetcher`] (fresh, or cloned from a
//! caller-supplied one with [`fetch_all_with`]) with bounded concurrency and
//! reported to a [`Handler`] as soon as it completes. A failed target never
//! stops the others.

use std::collections::BTreeMap;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use log::{info, warn};
use serde::Serialize;

use crate::config::FetchConfig;
use crate::error_handling::FetchError;
use crate::fetch::{FetchResult, Fetcher};

/// Receives the outcome of every target in a batch.
///
/// Called once per target, in completion order, possibly from several
/// in-flight fetches of the same batch.
pub trait Handler: Send + Sync {
    /// Consumes the outcome for `target` as supplied by the caller.
    fn handle(&self, target: &str, result: Result<FetchResult, FetchError>);
}

impl<F> Handler for F
where
    F: Fn(&str, Result<FetchResult, FetchError>) + Send + Sync,
{
    fn handle(&self, target: &str, result: Result<FetchResult, FetchError>) {
        self(target, result)
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Number of targets processed
    pub total: usize,
    /// Targets fetched and parsed
    pub succeeded: usize,
    /// Targets that ended with a `FetchError`
    pub failed: usize,
    /// Failure count per error kind (see [`FetchError::kind`])
    pub failures_by_kind: BTreeMap<&'static str, usize>,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}

/// Fetches every target with at most `config.max_concurrency` fetches in flight.
///
/// # Examples
///
/// ```no_run
/// use adstxt_crawler::{fetch_all, FetchConfig, FetchError, FetchResult};
///
/// # async fn example() {
/// let report = fetch_all(
///     ["example.com", "example.org"],
///     &FetchConfig::default(),
///     &|target: &str, result: Result<FetchResult, FetchError>| match result {
///         Ok(fetched) => println!("{target}: {} records", fetched.result.data_records.len()),
///         Err(e) => eprintln!("{target}: {e}"),
///     },
/// )
/// .await;
/// println!("{} of {} succeeded", report.succeeded, report.total);
/// # }
/// ```
pub async fn fetch_all<I, S, H>(targets: I, config: &FetchConfig, handler: &H) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    H: Handler + ?Sized,
{
    run_batch(
        targets,
        config.max_concurrency,
        || Fetcher::new(config.clone()),
        handler,
    )
    .await
}

/// Like [`fetch_all`], but every target is fetched by a clone of `fetcher`.
///
/// Use this to share an ad-system registry or a customised HTTP client across
/// the batch. Concurrency comes from `fetcher.config().max_concurrency`.
pub async fn fetch_all_with<I, S, H>(targets: I, fetcher: &Fetcher, handler: &H) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    H: Handler + ?Sized,
{
    run_batch(
        targets,
        fetcher.config().max_concurrency,
        || Ok(fetcher.clone()),
        handler,
    )
    .await
}

async fn run_batch<I, S, F, H>(
    targets: I,
    max_concurrency: usize,
    new_fetcher: F,
    handler: &H,
) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn() -> Result<Fetcher, FetchError>,
    H: Handler + ?Sized,
{
    let start = Instant::now();
    let targets: Vec<String> = targets
        .into_iter()
        .map(|target| target.as_ref().to_string())
        .collect();
    let concurrency = max_concurrency.max(1);
    info!(
        "Fetching {} Ads.txt files ({} concurrent)",
        targets.len(),
        concurrency
    );

    let new_fetcher = &new_fetcher;
    let outcomes: Vec<Result<(), &'static str>> = stream::iter(targets)
        .map(|target| async move {
            let result = match new_fetcher() {
                Ok(fetcher) => fetcher.fetch(&target).await,
                Err(e) => Err(e),
            };
            let outcome = result.as_ref().map(|_| ()).map_err(|e| e.kind());
            if let Err(e) = &result {
                warn!("{e}");
            }
            handler.handle(&target, result);
            outcome
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut report = BatchReport {
        total: outcomes.len(),
        ..BatchReport::default()
    };
    for outcome in outcomes {
        match outcome {
            Ok(()) => report.succeeded += 1,
            Err(kind) => {
                report.failed += 1;
                *report.failures_by_kind.entry(kind).or_insert(0) += 1;
            }
        }
    }
    report.elapsed_seconds = start.elapsed().as_secs_f64();

    info!(
        "Run statistics: total={}, succeeded={}, failed={}, elapsed={:.2}s",
        report.total, report.succeeded, report.failed, report.elapsed_seconds
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_fetch_all_reports_every_target() {
        let seen = Mutex::new(Vec::new());
        let handler = |target: &str, result: Result<FetchResult, FetchError>| {
            seen.lock().unwrap().push((target.to_string(), result.is_ok()));
        };

        let report = fetch_all(
            ["", "ftp://example.com", "localhost"],
            &FetchConfig::default(),
            &handler,
        )
        .await;

        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 3);
        assert_eq!(report.failures_by_kind.get("invalid URL"), Some(&3));

        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        assert_eq!(
            seen,
            vec![
                (String::new(), false),
                ("ftp://example.com".to_string(), false),
                ("localhost".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_all_with_no_targets() {
        let handler = |_: &str, _: Result<FetchResult, FetchError>| {
            panic!("handler must not be called");
        };
        let report = fetch_all(Vec::<String>::new(), &FetchConfig::default(), &handler).await;
        assert_eq!(report.total, 0);
        assert!(report.failures_by_kind.is_empty());
    }
}
