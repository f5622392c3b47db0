//! Web command - bundle the package entry for browsers

use super::Context;
use crate::output;
use crate::tools::{BundleArtifact, BundleOptions, Bundler};
use anyhow::{anyhow, Context as _, Result};
use peasant_config::PackageJson;

pub fn run(ctx: &Context, bundler: &dyn Bundler) -> Result<()> {
    let artifact = bundle(ctx, bundler)?;
    output::status(&format!(
        "Bundled {}",
        output::relative(ctx.project_root(), &artifact.path)
    ));
    Ok(())
}

/// Bundle `package.json#module` into `<output>/<name>.min.js`
pub fn bundle(ctx: &Context, bundler: &dyn Bundler) -> Result<BundleArtifact> {
    let package = PackageJson::load(ctx.config.package_json_path())?;

    let entry = package
        .module()
        .ok_or_else(|| anyhow!("package.json has no \"module\" entry to bundle"))?;
    let name = package
        .name()
        .ok_or_else(|| anyhow!("package.json has no \"name\""))?;

    let library = library_name(name);
    let options = BundleOptions {
        output_dir: ctx.config.output_dir(),
        filename: format!("{library}.min.js"),
        library: library.to_string(),
        module_dirs: vec![ctx.config.source_dir()],
        source_maps: true,
    };

    bundler
        .bundle(&ctx.config.resolve(entry), &options)
        .with_context(|| format!("Failed to bundle {entry}"))
}

/// `@scope/widget` -> `widget`
fn library_name(package_name: &str) -> &str {
    package_name.rsplit('/').next().unwrap_or(package_name)
}
