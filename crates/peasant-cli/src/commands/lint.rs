//! Lint command

use super::{link, Context};
use crate::output;
use crate::tools::{LintReport, Linter};
use anyhow::{bail, Result};

pub fn run(ctx: &Context, linter: &dyn Linter) -> Result<LintReport> {
    output::status("Linting sources...");
    link::run(ctx)?;

    let files = ctx.collect(&ctx.config.project.lint_paths())?;
    if files.is_empty() {
        tracing::info!("no files to lint");
        return Ok(LintReport::default());
    }

    let report = linter.lint(&files)?;

    let rendered = output::render_lint(&report, ctx.project_root());
    if !rendered.is_empty() {
        println!("{rendered}");
    }

    if report.has_errors() {
        bail!(
            "Lint failed with {} error(s) and {} warning(s)",
            report.error_count(),
            report.warning_count()
        );
    }
    Ok(report)
}
