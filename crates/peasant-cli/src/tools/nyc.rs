use super::{CoverageReport, Instrumenter, Mocha, NodeTool, TestOptions};
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const SUMMARY_FILE: &str = "coverage/coverage-summary.json";

/// nyc wrapping a mocha run
#[derive(Debug, Clone)]
pub struct Nyc {
    tool: NodeTool,
    mocha: Mocha,
}

impl Nyc {
    pub fn new(project_root: &Path, mocha: Mocha) -> Self {
        Self {
            tool: NodeTool::new("nyc", project_root),
            mocha,
        }
    }

    fn args(&self, sources: &[PathBuf], tests: &[PathBuf]) -> Vec<String> {
        let mut args: Vec<String> = ["text-summary", "lcov", "json-summary"]
            .iter()
            .map(|r| format!("--reporter={r}"))
            .collect();
        for source in sources {
            args.push("--include".to_string());
            args.push(format!("{}/**", source.display()));
        }
        args.push(self.mocha.program().display().to_string());

        let options = TestOptions {
            grep: None,
            reporter: Some("dot".to_string()),
        };
        args.extend(self.mocha.args(tests, &options));
        args
    }

    fn read_summary(&self) -> Result<CoverageReport> {
        let path = self.tool.project_root().join(SUMMARY_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CoverageReport::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        parse_summary(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

impl Instrumenter for Nyc {
    fn instrument(&self, sources: &[PathBuf], tests: &[PathBuf]) -> Result<CoverageReport> {
        let mut command = self.tool.command();
        command.args(self.args(sources, tests));

        let status = self.tool.status(command)?;
        if !status.success() {
            bail!("Tests failed under coverage ({})", status);
        }

        self.read_summary()
    }
}

/// The `total` entry of an istanbul json-summary
fn parse_summary(content: &str) -> Result<CoverageReport> {
    let mut summary: HashMap<String, CoverageReport> = serde_json::from_str(content)?;
    Ok(summary.remove("total").unwrap_or_default())
}
