//! Init command - set up an npm package to be driven by peasant

use super::{link, Context};
use crate::output;
use crate::tools::Installer;
use anyhow::{Context as _, Result};
use peasant_config::PackageJson;
use std::fs;

pub const LINT_CONFIG: &str = r#"// Generated by Peasant
{
  "extends": "airbnb-base",
  "parser": "@babel/eslint-parser",
  "env": {
    "mocha": true
  }
}
"#;

pub const BABEL_CONFIG: &str = r#"// Generated by Peasant
{
  "presets": ["@babel/preset-env"]
}
"#;

/// npm scripts written into package.json
pub const SCRIPTS: [(&str, &str); 8] = [
    ("lint", "peasant lint"),
    ("test", "peasant test"),
    ("build", "peasant -s build"),
    ("web", "peasant -w build"),
    ("cover", "peasant cover"),
    ("peasant", "peasant"),
    ("ci", "peasant -s lint test"),
    ("prepublishOnly", "npm run ci && npm run build && npm run web"),
];

pub fn run(ctx: &Context, installer: &dyn Installer) -> Result<()> {
    output::status("Installing dependencies...");
    installer
        .install(&["peasant"])
        .context("Failed to install peasant")?;

    output::status("Modifying package.json scripts...");
    let path = ctx.config.package_json_path();
    let mut package = PackageJson::load(&path)
        .with_context(|| format!("No usable package.json in {}", ctx.project_root().display()))?;
    for (name, command) in SCRIPTS {
        package.set_script(name, command);
    }
    package.save()?;

    output::status("Writing linter configuration...");
    write(ctx, ".eslintrc", LINT_CONFIG)?;

    output::status("Creating babel configuration...");
    write(ctx, ".babelrc", BABEL_CONFIG)?;

    output::status("Creating linter links...");
    link::run(ctx)?;

    Ok(())
}

fn write(ctx: &Context, name: &str, content: &str) -> Result<()> {
    let path = ctx.project_root().join(name);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::super::testing::Project;
    use super::super::Options;
    use super::*;
    use anyhow::bail;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeInstaller {
        installed: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Installer for FakeInstaller {
        fn install(&self, packages: &[&str]) -> Result<()> {
            if self.fail {
                bail!("registry unreachable");
            }
            self.installed
                .borrow_mut()
                .extend(packages.iter().map(|p| p.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_init_scaffolds_project() {
        let project = Project::new();
        project.write(
            "package.json",
            "{\n  \"name\": \"widget\",\n  \"scripts\": {\n    \"start\": \"node .\"\n  }\n}\n",
        );

        let installer = FakeInstaller::default();
        run(&project.context(Options::default()), &installer).unwrap();

        assert_eq!(*installer.installed.borrow(), vec!["peasant".to_string()]);
        assert_eq!(project.read(".eslintrc"), LINT_CONFIG);
        assert_eq!(project.read(".babelrc"), BABEL_CONFIG);

        let package = PackageJson::load(project.root().join("package.json")).unwrap();
        assert_eq!(package.script("start"), Some("node ."));
        for (name, command) in SCRIPTS {
            assert_eq!(package.script(name), Some(command));
        }
        assert!(project.read("package.json").ends_with("}\n"));
    }

    #[test]
    fn test_init_stops_when_install_fails() {
        let project = Project::new();
        let installer = FakeInstaller {
            fail: true,
            ..Default::default()
        };

        let err = run(&project.context(Options::default()), &installer).unwrap_err();
        assert!(format!("{err:#}").contains("registry unreachable"));
        assert!(!project.root().join(".eslintrc").exists());
    }

    #[test]
    fn test_init_requires_package_json() {
        let project = Project::new();
        let ctx = project.context(Options::default());
        fs::remove_file(project.root().join("package.json")).unwrap();

        assert!(run(&ctx, &FakeInstaller::default()).is_err());
        assert!(!project.root().join(".babelrc").exists());
    }
}
