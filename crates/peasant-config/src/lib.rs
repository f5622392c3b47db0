//! Peasant Configuration System
//!
//! Provides configuration management for Peasant projects:
//! - Project configuration (peasant.toml)
//! - The npm package manifest (package.json)
//! - Environment variable overrides
//!
//! # Configuration Hierarchy
//!
//! Configuration is merged in the following order (later overrides earlier):
//! 1. Built-in defaults (`src` -> `lib`, `.js`/`.es6` sources, babel)
//! 2. Project config (./peasant.toml)
//! 3. Environment variables (PEASANT_*)
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use peasant_config::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::new().load_from_directory(Path::new(".")).unwrap();
//! println!("building {} -> {}", config.source_dir().display(), config.output_dir().display());
//! ```

pub mod loader;
pub mod package_json;
pub mod project;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to access {path}: {error}")]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid JSON in {file}: {error}")]
    JsonParseError {
        file: PathBuf,
        error: serde_json::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// Map an I/O error, turning "not found" into [`ConfigError::NotFound`]
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        let path = path.into();
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::IoError { path, error }
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// File name of the project configuration
pub const CONFIG_FILE: &str = "peasant.toml";

// Re-export main types
pub use loader::{Config, ConfigLoader};
pub use package_json::PackageJson;
pub use project::{BuildSection, LintSection, ProjectConfig, TestSection, Transpiler};
