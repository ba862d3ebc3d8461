//! Shared resource setup.
//!
//! This module provides functions to initialize:
//! - The HTTP client used by the fetcher (no redirects, no pooling)
//! - The process-wide logger
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

// Re-export public API
pub use client::init_fetch_client;
pub use logger::init_logger_with;
