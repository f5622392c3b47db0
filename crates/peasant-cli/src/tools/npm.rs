use super::{Installer, NodeTool};
use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Npm {
    tool: NodeTool,
}

impl Npm {
    pub fn new(project_root: &Path) -> Self {
        Self {
            tool: NodeTool::new("npm", project_root),
        }
    }
}

impl Installer for Npm {
    fn install(&self, packages: &[&str]) -> Result<()> {
        let mut command = self.tool.command();
        command.args(["install", "--save-dev"]).args(packages);
        self.tool.run(command)
    }
}
