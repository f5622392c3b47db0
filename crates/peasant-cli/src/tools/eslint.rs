use super::{FileLint, LintReport, Linter, NodeTool};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// ESLint, run with its JSON formatter so results can be counted and rendered here
#[derive(Debug, Clone)]
pub struct Eslint {
    tool: NodeTool,
}

impl Eslint {
    pub fn new(project_root: &Path) -> Self {
        Self {
            tool: NodeTool::new("eslint", project_root),
        }
    }
}

impl Linter for Eslint {
    fn lint(&self, paths: &[PathBuf]) -> Result<LintReport> {
        let mut command = self.tool.command();
        command.args(["--cache", "--format", "json"]).args(paths);

        let output = self.tool.output(command)?;

        // 0: clean, 1: lint errors, anything else: eslint itself failed
        match output.status.code() {
            Some(0) | Some(1) => {}
            _ => bail!("eslint exited with {}", output.status),
        }

        let files: Vec<FileLint> =
            serde_json::from_slice(&output.stdout).context("Failed to parse eslint output")?;
        Ok(LintReport { files })
    }
}
