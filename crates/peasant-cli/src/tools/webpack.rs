use super::{BundleArtifact, BundleOptions, Bundler, NodeTool};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Webpack producing a minified UMD bundle
#[derive(Debug, Clone)]
pub struct Webpack {
    tool: NodeTool,
}

impl Webpack {
    pub fn new(project_root: &Path) -> Self {
        Self {
            tool: NodeTool::new("webpack", project_root),
        }
    }

    pub fn args(entry: &Path, options: &BundleOptions) -> Vec<String> {
        let mut args = vec![
            "--mode".to_string(),
            "production".to_string(),
            "--entry".to_string(),
            entry.display().to_string(),
            "--output-path".to_string(),
            options.output_dir.display().to_string(),
            "--output-filename".to_string(),
            options.filename.clone(),
            "--output-library-name".to_string(),
            options.library.clone(),
            "--output-library-type".to_string(),
            "umd".to_string(),
            "--output-library-umd-named-define".to_string(),
        ];
        if options.source_maps {
            args.push("--devtool".to_string());
            args.push("source-map".to_string());
        }
        for dir in &options.module_dirs {
            args.push("--resolve-modules".to_string());
            args.push(dir.display().to_string());
        }
        args.push("--resolve-modules".to_string());
        args.push("node_modules".to_string());
        args
    }
}

impl Bundler for Webpack {
    fn bundle(&self, entry: &Path, options: &BundleOptions) -> Result<BundleArtifact> {
        fs::create_dir_all(&options.output_dir).with_context(|| {
            format!("Failed to create {}", options.output_dir.display())
        })?;

        let mut command = self.tool.command();
        command.args(Self::args(entry, options));
        self.tool.run(command)?;

        Ok(BundleArtifact {
            path: options.output_dir.join(&options.filename),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> BundleOptions {
        BundleOptions {
            output_dir: PathBuf::from("/p/lib"),
            filename: "widget.min.js".to_string(),
            library: "widget".to_string(),
            module_dirs: vec![PathBuf::from("/p/src")],
            source_maps: true,
        }
    }

    #[test]
    fn test_args() {
        let args = Webpack::args(Path::new("/p/src/index.js"), &options());
        let joined = args.join(" ");
        assert!(joined.contains("--entry /p/src/index.js"));
        assert!(joined.contains("--output-path /p/lib"));
        assert!(joined.contains("--output-filename widget.min.js"));
        assert!(joined.contains("--output-library-name widget"));
        assert!(joined.contains("--output-library-type umd"));
        assert!(joined.contains("--devtool source-map"));
        assert!(joined.ends_with("--resolve-modules /p/src --resolve-modules node_modules"));
    }

    #[test]
    fn test_args_without_maps() {
        let options = BundleOptions {
            source_maps: false,
            ..options()
        };
        let args = Webpack::args(Path::new("index.js"), &options);
        assert!(!args.iter().any(|a| a == "--devtool"));
    }
}
