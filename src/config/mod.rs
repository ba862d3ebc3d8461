//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, header values)
//! - Library fetch settings and CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, FetchConfig, LogFormat, LogLevel, OutputFormat};
