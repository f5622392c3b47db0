//! Link command - expose peasant's bundled lint and babel packages to editors

use super::Context;
use anyhow::{Context as _, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Packages linked from `node_modules/peasant/node_modules` into `node_modules`
pub const LINKS: [&str; 6] = [
    ".bin/eslint",
    "eslint",
    "@babel/preset-env",
    "@babel/eslint-parser",
    "eslint-config-airbnb-base",
    "eslint-plugin-import",
];

/// Create every missing link, returning the links created
pub fn run(ctx: &Context) -> Result<Vec<PathBuf>> {
    let base = ctx.project_root().join("node_modules");
    let bundled = base.join("peasant").join("node_modules");

    let mut created = Vec::new();
    for name in LINKS {
        let target = bundled.join(name);
        let link = base.join(name);

        if exists(&link)? {
            continue;
        }
        // Nothing to point at; peasant is not installed (yet)
        if !target.exists() {
            tracing::debug!(target = %target.display(), "link target missing, skipped");
            continue;
        }

        if let Some(parent) = link.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        symlink(&target, &link)
            .with_context(|| format!("Failed to link {}", link.display()))?;
        if ctx.options.verbose {
            println!("node_modules/{} -> {}", name, target.display());
        }
        created.push(link);
    }

    Ok(created)
}

/// Whether something (possibly a dangling link) already sits at `path`
fn exists(path: &Path) -> Result<bool> {
    match path.symlink_metadata() {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to inspect {}", path.display())),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
