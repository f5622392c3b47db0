//! Configuration Loader
//!
//! Handles locating the project root and merging configuration sources with
//! proper precedence.

use crate::project::ProjectConfig;
use crate::{ConfigError, ConfigResult, CONFIG_FILE};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Loads configuration and merges it with proper precedence:
/// 1. Built-in defaults - lowest priority
/// 2. Project config (./peasant.toml) - overrides defaults
/// 3. Environment variables (PEASANT_*) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Apply PEASANT_* overrides
    use_env: bool,
}

/// Merged configuration result
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Project root directory (where peasant.toml or package.json was found)
    pub project_root: PathBuf,

    /// The peasant.toml that was loaded, if any
    pub config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { use_env: true }
    }

    /// Ignore PEASANT_* environment variables
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to the first directory holding a
    /// peasant.toml or package.json. When neither exists anywhere, `start_dir`
    /// is the project root and defaults apply.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let project_root = find_project_root(start_dir).unwrap_or_else(|| start_dir.to_path_buf());

        let config_path = project_root.join(CONFIG_FILE);
        let (project, config_file) = if config_path.is_file() {
            (ProjectConfig::load_from_file(&config_path)?, Some(config_path))
        } else {
            (ProjectConfig::default(), None)
        };

        let project = if self.use_env {
            apply_env_overrides(project)?
        } else {
            project
        };

        Ok(Config {
            project,
            project_root,
            config_file,
        })
    }

    /// Load configuration from a specific peasant.toml
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let project = ProjectConfig::load_from_file(config_path)?;
        let project = if self.use_env {
            apply_env_overrides(project)?
        } else {
            project
        };

        let project_root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Config {
            project,
            project_root,
            config_file: Some(config_path.to_path_buf()),
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// First ancestor of `start_dir` (inclusive) that looks like a project root
fn find_project_root(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file() || dir.join("package.json").is_file())
        .map(Path::to_path_buf)
}

/// Apply environment variable overrides to project config
///
/// - PEASANT_SOURCE_MAPS=true|1|yes|false|0|no
/// - PEASANT_SOURCE_DIR=<dir>
/// - PEASANT_OUTPUT_DIR=<dir>
fn apply_env_overrides(mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
    if let Ok(value) = env::var("PEASANT_SOURCE_MAPS") {
        config.build_mut().source_maps = Some(parse_bool("PEASANT_SOURCE_MAPS", &value)?);
    }

    if let Ok(dir) = env::var("PEASANT_SOURCE_DIR") {
        config.build_mut().source = Some(PathBuf::from(dir));
    }

    if let Ok(dir) = env::var("PEASANT_OUTPUT_DIR") {
        config.build_mut().output = Some(PathBuf::from(dir));
    }

    config.validate()?;
    Ok(config)
}

fn parse_bool(field: &str, value: &str) -> ConfigResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::invalid(
            field,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}

impl Config {
    /// Source directory, resolved against the project root
    pub fn source_dir(&self) -> PathBuf {
        self.project_root.join(self.project.source_dir())
    }

    /// Output directory, resolved against the project root
    pub fn output_dir(&self) -> PathBuf {
        self.project_root.join(self.project.output_dir())
    }

    /// Path of the project's package.json
    pub fn package_json_path(&self) -> PathBuf {
        self.project_root.join("package.json")
    }

    /// Resolve a project-relative path against the project root
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(path)
    }

    /// Whether a peasant.toml was found
    pub fn has_config_file(&self) -> bool {
        self.config_file.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("true", true)]
    #[case("1", true)]
    #[case("YES", true)]
    #[case("off", false)]
    #[case("0", false)]
    #[case("", false)]
    fn test_parse_bool(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(parse_bool("X", value).unwrap(), expected);
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        assert!(parse_bool("X", "maybe").is_err());
    }
}
