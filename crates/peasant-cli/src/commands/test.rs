//! Test command

use super::Context;
use crate::output;
use crate::tools::{TestOptions, TestOutcome, TestRunner};
use anyhow::{bail, Result};

pub fn run(ctx: &Context, runner: &dyn TestRunner) -> Result<TestOutcome> {
    output::status("Running tests...");

    let files = ctx.collect(&ctx.config.project.test_paths())?;
    if files.is_empty() {
        tracing::info!("no test files found");
    }

    let options = TestOptions {
        grep: ctx.options.grep.clone(),
        reporter: ctx.config.project.test_reporter().map(str::to_string),
    };
    let outcome = runner.test(&files, &options)?;

    if !outcome.passed() {
        bail!("{} test(s) failed", outcome.failures);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::super::testing::Project;
    use super::super::Options;
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct FakeRunner {
        calls: RefCell<Vec<(Vec<PathBuf>, TestOptions)>>,
        failures: u32,
    }

    impl TestRunner for FakeRunner {
        fn test(&self, paths: &[PathBuf], options: &TestOptions) -> Result<TestOutcome> {
            self.calls
                .borrow_mut()
                .push((paths.to_vec(), options.clone()));
            Ok(TestOutcome {
                failures: self.failures,
            })
        }
    }

    #[test]
    fn test_runs_test_files_with_grep() {
        let project = Project::new();
        project
            .write("peasant.toml", "[test]\nreporter = \"spec\"\n")
            .write("test/b.test.js", "")
            .write("test/nested/a.test.es6", "")
            .write("test/fixtures/data.json", "");
        let runner = FakeRunner::default();
        let ctx = project.context(Options {
            grep: Some("parser".into()),
            ..Default::default()
        });

        run(&ctx, &runner).unwrap();

        let calls = runner.calls.borrow();
        let (files, options) = &calls[0];
        let root = project.root();
        assert_eq!(
            files,
            &vec![root.join("test/b.test.js"), root.join("test/nested/a.test.es6")]
        );
        assert_eq!(options.grep.as_deref(), Some("parser"));
        assert_eq!(options.reporter.as_deref(), Some("spec"));
    }

    #[test]
    fn test_failures_fail_the_command() {
        let project = Project::new();
        project.write("test/a.js", "");
        let runner = FakeRunner {
            failures: 3,
            ..Default::default()
        };

        let err = run(&project.context(Options::default()), &runner).unwrap_err();
        assert_eq!(err.to_string(), "3 test(s) failed");
    }
}
