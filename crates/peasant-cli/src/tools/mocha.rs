use super::{NodeTool, TestOptions, TestOutcome, TestRunner};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Mocha, with sources compiled on the fly through the configured require hooks
#[derive(Debug, Clone)]
pub struct Mocha {
    tool: NodeTool,
    require: Vec<String>,
}

impl Mocha {
    pub fn new(project_root: &Path) -> Self {
        Self {
            tool: NodeTool::new("mocha", project_root),
            require: Vec::new(),
        }
    }

    /// Modules to preload (e.g. `@babel/register`)
    pub fn with_require(mut self, require: Vec<String>) -> Self {
        self.require = require;
        self
    }

    pub fn program(&self) -> PathBuf {
        self.tool.program()
    }

    /// Arguments for a run over `paths`, without the program itself
    pub fn args(&self, paths: &[PathBuf], options: &TestOptions) -> Vec<String> {
        let mut args = Vec::new();
        for module in &self.require {
            args.push("--require".to_string());
            args.push(module.clone());
        }
        if let Some(reporter) = &options.reporter {
            args.push("--reporter".to_string());
            args.push(reporter.clone());
        }
        if let Some(grep) = &options.grep {
            args.push("--grep".to_string());
            args.push(grep.clone());
        }
        args.extend(paths.iter().map(|p| p.display().to_string()));
        args
    }
}

impl TestRunner for Mocha {
    fn test(&self, paths: &[PathBuf], options: &TestOptions) -> Result<TestOutcome> {
        let mut command = self.tool.command();
        command.args(self.args(paths, options));

        let status = self.tool.status(command)?;
        match status.code() {
            // mocha exits with the number of failed tests
            Some(code) if code >= 0 => Ok(TestOutcome {
                failures: code as u32,
            }),
            _ => bail!("mocha was terminated ({})", status),
        }
    }
}
