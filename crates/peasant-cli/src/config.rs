//! CLI configuration via environment variables
//!
//! Project settings live in peasant.toml; these only affect how the CLI
//! itself behaves.

use std::env;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Disable colored output (PEASANT_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// Diagnostic log level (PEASANT_LOG=debug)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            no_color: env::var_os("PEASANT_NO_COLOR").is_some() || env::var_os("NO_COLOR").is_some(),
            log_level: env::var("PEASANT_LOG")
                .ok()
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty()),
        }
    }
}
