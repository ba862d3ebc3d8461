//! Error handling.
//!
//! This module provides the error types used throughout the crate:
//! - **Fetch errors**: structural failures that abort one fetch
//! - **Parse errors**: unreadable input streams (content problems are warnings)
//! - **Initialization errors**: logger and HTTP client setup

mod types;

// Re-export public API
pub use types::{CanonicalNameError, FetchError, InitializationError, ParseError, UrlError};
