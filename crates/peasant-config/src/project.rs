//! Project Configuration (peasant.toml)
//!
//! Handles project-level configuration stored in `peasant.toml` at the project
//! root. Every section and key is optional; accessors fall back to the
//! conventional layout (`src` -> `lib`, `bin`/`src`/`test` linted, `test`
//! holding the test suite).

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Project configuration from peasant.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Transpile configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSection>,

    /// Lint configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lint: Option<LintSection>,

    /// Test configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<TestSection>,
}

/// `[build]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BuildSection {
    /// Source directory (default: "src")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Output directory (default: "lib")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Recognized source extensions, without dots (default: ["js", "es6"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Extension given to every output (default: "js")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_extension: Option<String>,

    /// Emit source maps (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<bool>,

    /// "babel" (default), "copy", or the path of a babel compatible program
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transpiler: Option<String>,

    /// Extra arguments passed to the transpiler
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transpiler_args: Vec<String>,
}

/// `[lint]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LintSection {
    /// Directories to lint (default: ["bin", "src", "test"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<PathBuf>>,
}

/// `[test]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct TestSection {
    /// Directories holding tests (default: ["test"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<PathBuf>>,

    /// Test reporter name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,

    /// Modules preloaded before tests (default: ["@babel/register"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require: Option<Vec<String>>,
}

/// Which transform the build uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transpiler {
    /// Babel from node_modules/.bin or PATH
    Babel,
    /// Emit sources unchanged
    Copy,
    /// A babel compatible program at the given path
    Program(PathBuf),
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(extensions) = self.build.as_ref().and_then(|b| b.extensions.as_ref()) {
            if extensions.is_empty() {
                return Err(ConfigError::invalid(
                    "build.extensions",
                    "at least one extension is required",
                ));
            }
            for ext in extensions {
                validate_extension("build.extensions", ext)?;
            }
        }

        if let Some(ext) = self
            .build
            .as_ref()
            .and_then(|b| b.canonical_extension.as_ref())
        {
            validate_extension("build.canonical-extension", ext)?;
        }

        let source = without_cur_dir(&self.source_dir());
        let output = without_cur_dir(&self.output_dir());
        if source == output {
            return Err(ConfigError::invalid(
                "build.output",
                "output directory must differ from the source directory",
            ));
        }
        // Outputs under the source root would be picked up as sources next run
        if output.starts_with(&source) || source.starts_with(&output) {
            return Err(ConfigError::invalid(
                "build.output",
                format!(
                    "'{}' and '{}' must not contain one another",
                    self.output_dir().display(),
                    self.source_dir().display()
                ),
            ));
        }

        if let Some(transpiler) = self.build.as_ref().and_then(|b| b.transpiler.as_ref()) {
            if transpiler.trim().is_empty() {
                return Err(ConfigError::invalid(
                    "build.transpiler",
                    "transpiler cannot be empty",
                ));
            }
        }

        Ok(())
    }

    pub fn source_dir(&self) -> PathBuf {
        self.build
            .as_ref()
            .and_then(|b| b.source.clone())
            .unwrap_or_else(|| PathBuf::from("src"))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.build
            .as_ref()
            .and_then(|b| b.output.clone())
            .unwrap_or_else(|| PathBuf::from("lib"))
    }

    pub fn extensions(&self) -> Vec<String> {
        self.build
            .as_ref()
            .and_then(|b| b.extensions.clone())
            .unwrap_or_else(|| vec!["js".to_string(), "es6".to_string()])
    }

    pub fn canonical_extension(&self) -> String {
        self.build
            .as_ref()
            .and_then(|b| b.canonical_extension.clone())
            .unwrap_or_else(|| "js".to_string())
    }

    pub fn source_maps(&self) -> bool {
        self.build
            .as_ref()
            .and_then(|b| b.source_maps)
            .unwrap_or(false)
    }

    pub fn transpiler(&self) -> Transpiler {
        match self.build.as_ref().and_then(|b| b.transpiler.as_deref()) {
            None | Some("babel") => Transpiler::Babel,
            Some("copy") => Transpiler::Copy,
            Some(program) => Transpiler::Program(PathBuf::from(program)),
        }
    }

    pub fn transpiler_args(&self) -> &[String] {
        self.build
            .as_ref()
            .map(|b| b.transpiler_args.as_slice())
            .unwrap_or(&[])
    }

    pub fn lint_paths(&self) -> Vec<PathBuf> {
        self.lint
            .as_ref()
            .and_then(|l| l.paths.clone())
            .unwrap_or_else(|| ["bin", "src", "test"].iter().map(PathBuf::from).collect())
    }

    pub fn test_paths(&self) -> Vec<PathBuf> {
        self.test
            .as_ref()
            .and_then(|t| t.paths.clone())
            .unwrap_or_else(|| vec![PathBuf::from("test")])
    }

    pub fn test_reporter(&self) -> Option<&str> {
        self.test.as_ref().and_then(|t| t.reporter.as_deref())
    }

    pub fn test_require(&self) -> Vec<String> {
        self.test
            .as_ref()
            .and_then(|t| t.require.clone())
            .unwrap_or_else(|| vec!["@babel/register".to_string()])
    }

    /// Mutable `[build]` section, created on first use
    pub fn build_mut(&mut self) -> &mut BuildSection {
        self.build.get_or_insert_with(BuildSection::default)
    }
}

/// `./src/.` and `src` name the same directory
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn validate_extension(field: &str, ext: &str) -> ConfigResult<()> {
    if ext.is_empty() {
        return Err(ConfigError::invalid(field, "extension cannot be empty"));
    }
    if ext.starts_with('.') {
        return Err(ConfigError::invalid(
            field,
            format!("write '{}' without the leading dot", ext),
        ));
    }
    if ext.contains(['/', '\\']) {
        return Err(ConfigError::invalid(
            field,
            format!("'{}' is not a file extension", ext),
        ));
    }
    Ok(())
}
