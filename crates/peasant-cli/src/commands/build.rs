//! Build command - transpile stale sources into the output directory

use super::{web, Context};
use crate::output;
use crate::tools::{Bundler, NodeTool};
use anyhow::{Context as _, Result};
use peasant_build::{BuildConfig, CommandTransform, CopyTransform, RunReport, Sequencer, Transform};
use peasant_config::Transpiler;

/// Run the build command
pub fn run(ctx: &Context, bundler: &dyn Bundler) -> Result<()> {
    output::status("Building...");

    if ctx.options.web {
        return web::run(ctx, bundler);
    }

    let transform = transform_for(ctx);
    let report = transpile(ctx, transform.as_ref())?;

    if ctx.options.verbose {
        println!(
            "{} rewritten, {} up to date in {:.2?}",
            report.len(),
            report.stats.skipped,
            report.stats.total_time
        );
    }
    Ok(())
}

/// Build configuration for this project and invocation
pub fn build_config(ctx: &Context) -> BuildConfig {
    let project = &ctx.config.project;
    BuildConfig {
        source_root: ctx.config.source_dir(),
        output_root: ctx.config.output_dir(),
        extensions: project.extensions(),
        canonical_extension: project.canonical_extension(),
        source_maps: ctx.options.source_maps || project.source_maps(),
    }
}

/// The configured transpiler
pub fn transform_for(ctx: &Context) -> Box<dyn Transform> {
    let project = &ctx.config.project;
    let program = match project.transpiler() {
        Transpiler::Copy => return Box::new(CopyTransform),
        Transpiler::Babel => NodeTool::new("babel", ctx.project_root()).program(),
        Transpiler::Program(path) => ctx.config.resolve(path),
    };

    Box::new(
        CommandTransform::babel(program)
            .args(project.transpiler_args().iter().cloned())
            .with_current_dir(ctx.project_root()),
    )
}

/// Run the sequencer with `transform`, printing each rewritten pair
pub fn transpile(ctx: &Context, transform: &dyn Transform) -> Result<RunReport> {
    let sequencer = Sequencer::new(build_config(ctx), transform);

    if ctx.options.clean {
        sequencer.clean().context("Failed to clean output directory")?;
    }

    let report = sequencer.run().context("Build failed")?;

    let root = ctx.project_root();
    for (source, destination) in report.pairs() {
        println!(
            "{} -> {}",
            output::relative(root, source),
            output::relative(root, destination)
        );
    }
    Ok(report)
}
