//! Cover command - run the tests with the sources instrumented

use super::Context;
use crate::output;
use crate::tools::{CoverageReport, Instrumenter};
use anyhow::{Context as _, Result};

pub fn run(ctx: &Context, instrumenter: &dyn Instrumenter) -> Result<CoverageReport> {
    output::status("Running tests with coverage...");

    let tests = ctx.collect(&ctx.config.project.test_paths())?;
    let sources = vec![ctx.config.project.source_dir()];

    let report = instrumenter
        .instrument(&sources, &tests)
        .context("Coverage run failed")?;

    if !report.is_empty() {
        output::status("Writing coverage report...");
    }
    println!("{}", output::render_coverage(&report));
    Ok(report)
}
