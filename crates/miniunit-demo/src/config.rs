//! Demo configuration via environment variables
//!
//! Command-line flags override everything read here.

use std::env;

/// Log filter used when MINIUNIT_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Disable colored output (MINIUNIT_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// `tracing` filter directives for stderr logging (MINIUNIT_LOG=debug)
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            no_color: env::var("MINIUNIT_NO_COLOR").is_ok() || env::var("NO_COLOR").is_ok(),
            log_filter: env::var("MINIUNIT_LOG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
