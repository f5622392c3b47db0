//! Third-party tool capabilities
//!
//! Every tool Peasant drives sits behind a single-method trait so commands can
//! be exercised with fakes. The production implementations shell out to the
//! node tools installed in the project.

mod eslint;
mod mocha;
mod node;
mod npm;
mod nyc;
mod webpack;

pub use eslint::Eslint;
pub use mocha::Mocha;
pub use node::NodeTool;
pub use npm::Npm;
pub use nyc::Nyc;
pub use webpack::Webpack;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Lints a set of files
pub trait Linter {
    fn lint(&self, paths: &[PathBuf]) -> Result<LintReport>;
}

/// Runs a test suite
pub trait TestRunner {
    fn test(&self, paths: &[PathBuf], options: &TestOptions) -> Result<TestOutcome>;
}

/// Bundles an entry module into a single distributable file
pub trait Bundler {
    fn bundle(&self, entry: &Path, options: &BundleOptions) -> Result<BundleArtifact>;
}

/// Runs the tests with `sources` instrumented and collects coverage
pub trait Instrumenter {
    fn instrument(&self, sources: &[PathBuf], tests: &[PathBuf]) -> Result<CoverageReport>;
}

/// Installs packages as development dependencies
pub trait Installer {
    fn install(&self, packages: &[&str]) -> Result<()>;
}

/// Lint results for all files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub files: Vec<FileLint>,
}

impl LintReport {
    pub fn error_count(&self) -> usize {
        self.files.iter().map(|f| f.error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|f| f.warning_count).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Lint results for one file, shaped like ESLint's JSON formatter output
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileLint {
    pub file_path: PathBuf,
    #[serde(default)]
    pub messages: Vec<LintMessage>,
    #[serde(default)]
    pub error_count: usize,
    #[serde(default)]
    pub warning_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintMessage {
    #[serde(default)]
    pub rule_id: Option<String>,
    /// 1 = warning, 2 = error
    pub severity: u8,
    pub message: String,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub column: usize,
}

impl LintMessage {
    pub fn is_error(&self) -> bool {
        self.severity >= 2
    }
}

/// Test run options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestOptions {
    /// Only run tests matching this pattern
    pub grep: Option<String>,
    /// Reporter name
    pub reporter: Option<String>,
}

/// Result of a test run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestOutcome {
    /// Number of failed tests
    pub failures: u32,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}

/// Bundle options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    /// Directory the bundle is written to
    pub output_dir: PathBuf,
    /// Bundle file name
    pub filename: String,
    /// Global name the UMD wrapper exposes
    pub library: String,
    /// Directories modules are resolved from, before node_modules
    pub module_dirs: Vec<PathBuf>,
    /// Emit a source map next to the bundle
    pub source_maps: bool,
}

/// A written bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArtifact {
    pub path: PathBuf,
}

/// Coverage totals for one metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct CoverageMetric {
    pub total: u64,
    pub covered: u64,
    #[serde(default, deserialize_with = "percentage")]
    pub pct: f64,
}

/// istanbul writes `"pct": "Unknown"` when nothing was measured
fn percentage<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

/// Coverage totals, shaped like istanbul's json-summary `total` entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct CoverageReport {
    #[serde(default)]
    pub lines: CoverageMetric,
    #[serde(default)]
    pub statements: CoverageMetric,
    #[serde(default)]
    pub functions: CoverageMetric,
    #[serde(default)]
    pub branches: CoverageMetric,
}

impl CoverageReport {
    /// Whether any code was instrumented at all
    pub fn is_empty(&self) -> bool {
        self.lines.total == 0 && self.statements.total == 0
    }
}

/// The set of tool implementations commands run against
pub struct Toolbox {
    pub linter: Box<dyn Linter>,
    pub test_runner: Box<dyn TestRunner>,
    pub bundler: Box<dyn Bundler>,
    pub instrumenter: Box<dyn Instrumenter>,
    pub installer: Box<dyn Installer>,
}

impl Toolbox {
    /// Node tools from the project at `project_root`
    pub fn node(project_root: &Path, test_require: Vec<String>) -> Self {
        let mocha = Mocha::new(project_root).with_require(test_require);
        Self {
            linter: Box::new(Eslint::new(project_root)),
            test_runner: Box::new(mocha.clone()),
            bundler: Box::new(Webpack::new(project_root)),
            instrumenter: Box::new(Nyc::new(project_root, mocha)),
            installer: Box::new(Npm::new(project_root)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eslint_json() {
        let json = r#"[
            {
                "filePath": "/p/src/a.js",
                "messages": [
                    {"ruleId": "semi", "severity": 2, "message": "Missing semicolon.", "line": 3, "column": 10},
                    {"ruleId": null, "severity": 1, "message": "Unused directive.", "line": 1, "column": 1}
                ],
                "errorCount": 1,
                "warningCount": 1,
                "fixableErrorCount": 1,
                "source": "ignored"
            },
            {"filePath": "/p/src/b.js", "messages": [], "errorCount": 0, "warningCount": 0}
        ]"#;

        let files: Vec<FileLint> = serde_json::from_str(json).unwrap();
        let report = LintReport { files };

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
        assert!(report.files[0].messages[0].is_error());
        assert_eq!(report.files[0].messages[1].rule_id, None);
    }

    #[test]
    fn test_coverage_report_empty() {
        assert!(CoverageReport::default().is_empty());
        let report: CoverageReport = serde_json::from_str(
            r#"{"lines": {"total": 10, "covered": 8, "skipped": 0, "pct": 80}}"#,
        )
        .unwrap();
        assert!(!report.is_empty());
        assert_eq!(report.lines.pct, 80.0);

        let unknown: CoverageReport = serde_json::from_str(
            r#"{"lines": {"total": 0, "covered": 0, "skipped": 0, "pct": "Unknown"}}"#,
        )
        .unwrap();
        assert!(unknown.is_empty());
        assert_eq!(unknown.lines.pct, 0.0);
    }

    #[test]
    fn test_outcome_passed() {
        assert!(TestOutcome { failures: 0 }.passed());
        assert!(!TestOutcome { failures: 2 }.passed());
    }
}
