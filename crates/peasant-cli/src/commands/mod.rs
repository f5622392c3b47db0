pub mod build;
pub mod cover;
pub mod init;
pub mod link;
pub mod lint;
pub mod test;
pub mod web;

use anyhow::{Context as _, Result};
use peasant_build::SourceTree;
use peasant_config::Config;
use std::path::{Path, PathBuf};

/// Flags shared by every command of one invocation
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Emit source maps
    pub source_maps: bool,
    /// `build` produces the web bundle instead
    pub web: bool,
    /// Only run tests matching this pattern
    pub grep: Option<String>,
    /// Remove the output directory before building
    pub clean: bool,
    /// Print every rewritten file
    pub verbose: bool,
}

/// Everything a command needs to run against one project
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub options: Options,
}

impl Context {
    pub fn new(config: Config, options: Options) -> Self {
        Self { config, options }
    }

    pub fn project_root(&self) -> &Path {
        &self.config.project_root
    }

    /// Source files under the given project-relative directories, in
    /// directory order then lexicographic order
    pub fn collect(&self, dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let extensions = self.config.project.extensions();
        let mut files = Vec::new();
        for dir in dirs {
            let tree = SourceTree::discover(self.config.resolve(dir), &extensions)
                .with_context(|| format!("Failed to list {}", dir.display()))?;
            files.extend(tree);
        }
        Ok(files)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use peasant_config::ConfigLoader;
    use std::fs;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    /// A throwaway project directory with default configuration
    pub struct Project {
        pub dir: TempDir,
    }

    impl Project {
        pub fn new() -> Self {
            let project = Self {
                dir: TempDir::new().unwrap(),
            };
            project.write("package.json", "{\n  \"name\": \"widget\"\n}\n");
            project
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        pub fn write(&self, rel: &str, content: &str) -> &Self {
            let path = self.root().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            // Backdate so outputs written during the test are strictly newer
            let hour_ago = SystemTime::now() - Duration::from_secs(3600);
            fs::File::options()
                .write(true)
                .open(&path)
                .unwrap()
                .set_modified(hour_ago)
                .unwrap();
            self
        }

        pub fn read(&self, rel: &str) -> String {
            fs::read_to_string(self.root().join(rel)).unwrap()
        }

        pub fn context(&self, options: Options) -> Context {
            let config = ConfigLoader::new()
                .without_env()
                .load_from_directory(self.root())
                .unwrap();
            Context::new(config, options)
        }
    }
}
