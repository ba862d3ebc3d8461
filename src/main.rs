//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `adstxt_crawler` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Reading targets from arguments or a file
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::fs::File;
use std::path::Path;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;

use adstxt_crawler::initialization::init_logger_with;
use adstxt_crawler::{
    fetch_all, parse_reader, Config, FetchError, FetchResult, OutputFormat, ParseResult,
};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if let Err(e) = init_logger_with(config.log_level.clone().into(), config.log_format.clone()) {
        eprintln!("adstxt_crawler error: {e:#}");
        process::exit(1);
    }

    match run(config).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("adstxt_crawler error: {e:#}");
            process::exit(1);
        }
    }
}

/// Runs the command; `Ok(false)` means at least one target failed.
async fn run(config: Config) -> Result<bool> {
    if let Some(path) = &config.local {
        let result = parse_local(path)?;
        print_parse_result(config.output, &path.display().to_string(), &result)?;
        return Ok(true);
    }

    let mut targets = config.targets.clone();
    if let Some(path) = &config.file {
        targets.extend(read_targets(path)?);
    }
    if targets.is_empty() {
        bail!("no targets given: pass publisher URLs, --file or --local");
    }

    let output = config.output;
    let handler = move |target: &str, result: Result<FetchResult, FetchError>| match result {
        Ok(fetched) => {
            if let Err(e) = print_fetch_result(output, target, &fetched) {
                log::error!("[{target}] failed to print result: {e:#}");
            }
        }
        Err(e) => eprintln!("[{target}] {e}"),
    };

    let report = fetch_all(&targets, &config.fetch_config(), &handler).await;
    eprintln!(
        "Fetched {} Ads.txt file{} ({} succeeded, {} failed) in {:.1}s",
        report.total,
        if report.total == 1 { "" } else { "s" },
        report.succeeded,
        report.failed,
        report.elapsed_seconds
    );
    Ok(report.failed == 0)
}

fn parse_local(path: &Path) -> Result<ParseResult> {
    let file =
        File::open(path).with_context(|| format!("Failed to open ads.txt file {}", path.display()))?;
    parse_reader(file).with_context(|| format!("Failed to read ads.txt file {}", path.display()))
}

/// One target per line; blank lines and `#` comments are skipped.
fn read_targets(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read targets file {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn print_fetch_result(output: OutputFormat, target: &str, fetched: &FetchResult) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(fetched).context("Failed to encode result")?)
        }
        OutputFormat::Text => {
            println!(
                "[{target}] {} (root domain {}, expires {})",
                fetched.request.url,
                fetched.request.domain,
                fetched.expires_at.to_rfc3339()
            );
            println!("{}", fetched.result);
        }
    }
    Ok(())
}

fn print_parse_result(output: OutputFormat, source: &str, result: &ParseResult) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(result).context("Failed to encode result")?)
        }
        OutputFormat::Text => {
            println!("[{source}]");
            println!("{result}");
        }
    }
    Ok(())
}
