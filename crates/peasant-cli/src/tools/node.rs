//! Locating and running node tools

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

/// An executable from the project's node_modules/.bin, or from PATH
#[derive(Debug, Clone)]
pub struct NodeTool {
    name: &'static str,
    project_root: PathBuf,
}

impl NodeTool {
    pub fn new(name: &'static str, project_root: impl Into<PathBuf>) -> Self {
        Self {
            name,
            project_root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Path of the executable.
    ///
    /// Prefers the project-local install, then PATH. Falls back to the bare
    /// name so a missing tool surfaces as a spawn error when it is used.
    pub fn program(&self) -> PathBuf {
        let local = self
            .project_root
            .join("node_modules")
            .join(".bin")
            .join(self.name);
        if local.is_file() {
            return local;
        }

        which::which(self.name).unwrap_or_else(|_| PathBuf::from(self.name))
    }

    /// A command for this tool, run from the project root
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.current_dir(&self.project_root);
        command
    }

    /// Run with inherited stdio and return the exit status
    pub fn status(&self, mut command: Command) -> Result<ExitStatus> {
        tracing::debug!(tool = self.name, ?command, "running");
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| self.missing_hint())
    }

    /// Run capturing stdout, stderr passes through
    pub fn output(&self, mut command: Command) -> Result<Output> {
        tracing::debug!(tool = self.name, ?command, "running");
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| self.missing_hint())
    }

    /// Run with inherited stdio, failing on a non-zero exit
    pub fn run(&self, command: Command) -> Result<()> {
        let status = self.status(command)?;
        if !status.success() {
            bail!("{} exited with {}", self.name, status);
        }
        Ok(())
    }

    fn missing_hint(&self) -> String {
        format!(
            "Failed to run {}; is it installed? (try `peasant init`)",
            self.name
        )
    }
}
