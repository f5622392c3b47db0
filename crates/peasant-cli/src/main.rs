use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

mod commands;
mod config;
mod logger;
mod output;
mod tools;

use commands::{Context, Options};
use peasant_config::ConfigLoader;
use tools::Toolbox;

/// Lint, test, transpile and bundle JavaScript packages.
///
/// Commands run in the order given and stop at the first failure. Only
/// sources newer than their compiled output are transpiled again.
///
/// EXAMPLES:
///     peasant init                 Set up the package in the current directory
///     peasant -s lint build        Lint, then transpile with source maps
///     peasant test -g parser       Run tests matching "parser"
///     peasant -w build             Bundle package.json#module for browsers
///     peasant --clean build        Rebuild everything from scratch
///
/// ENVIRONMENT VARIABLES:
///     PEASANT_LOG          Diagnostic log level (error, warn, info, debug, trace)
///     PEASANT_SOURCE_MAPS  Emit source maps ('1' or '0')
///     PEASANT_SOURCE_DIR   Source directory (default: src)
///     PEASANT_OUTPUT_DIR   Output directory (default: lib)
///     NO_COLOR             Set to disable colored output
#[derive(Parser, Debug)]
#[command(name = "peasant")]
#[command(version)]
struct Cli {
    /// Commands to run, in order
    #[arg(value_enum, required = true)]
    commands: Vec<CommandName>,

    /// Generate source maps
    #[arg(long = "sourcemaps", short = 's')]
    source_maps: bool,

    /// Make `build` produce the web bundle
    #[arg(long, short = 'w')]
    web: bool,

    /// Run only tests matching this pattern
    #[arg(long, short = 'g', value_name = "PATTERN")]
    grep: Option<String>,

    /// Remove the output directory before building
    #[arg(long)]
    clean: bool,

    /// Verbose output
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Diagnostic log level
    #[arg(long = "log", value_name = "LEVEL", value_parser = parse_level)]
    log_level: Option<logger::Level>,

    /// Project directory (defaults to the current directory)
    #[arg(long = "dir", short = 'C', value_name = "PATH")]
    dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CommandName {
    /// Install peasant and scaffold package.json scripts and configs
    Init,
    /// Link bundled lint and babel packages for editors
    Link,
    /// Lint bin, src and test
    Lint,
    /// Transpile stale sources into lib
    Build,
    /// Bundle the package for browsers
    Web,
    /// Run the test suite
    Test,
    /// Run the test suite with coverage
    Cover,
}

fn parse_level(value: &str) -> Result<logger::Level, String> {
    logger::Level::from_str(value.trim()).map_err(|_| {
        format!(
            "unknown log level '{}' (expected one of: {})",
            value,
            logger::LEVELS.join(", ")
        )
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    if cli_config.no_color {
        colored::control::set_override(false);
    }
    // --log wins over PEASANT_LOG; an unusable PEASANT_LOG is ignored
    let log_level = cli.log_level.or_else(|| {
        cli_config
            .log_level
            .as_deref()
            .and_then(|level| parse_level(level).ok())
    });
    logger::init(log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let config = ConfigLoader::new()
        .load_from_directory(&dir)
        .context("Failed to load configuration")?;
    tracing::debug!(root = %config.project_root.display(), "project");

    let toolbox = Toolbox::node(&config.project_root, config.project.test_require());
    let options = Options {
        source_maps: cli.source_maps,
        web: cli.web,
        grep: cli.grep,
        clean: cli.clean,
        verbose: cli.verbose,
    };
    let ctx = Context::new(config, options);

    for command in cli.commands {
        dispatch(command, &ctx, &toolbox)?;
    }
    Ok(())
}

fn dispatch(command: CommandName, ctx: &Context, toolbox: &Toolbox) -> Result<()> {
    tracing::info!(?command, "running");
    match command {
        CommandName::Init => commands::init::run(ctx, toolbox.installer.as_ref())?,
        CommandName::Link => {
            commands::link::run(ctx)?;
        }
        CommandName::Lint => {
            commands::lint::run(ctx, toolbox.linter.as_ref())?;
        }
        CommandName::Build => commands::build::run(ctx, toolbox.bundler.as_ref())?,
        CommandName::Web => commands::web::run(ctx, toolbox.bundler.as_ref())?,
        CommandName::Test => {
            commands::test::run(ctx, toolbox.test_runner.as_ref())?;
        }
        CommandName::Cover => {
            commands::cover::run(ctx, toolbox.instrumenter.as_ref())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_commands_in_order() {
        let cli = Cli::parse_from(["peasant", "-s", "lint", "test", "build"]);
        assert_eq!(
            cli.commands,
            vec![CommandName::Lint, CommandName::Test, CommandName::Build]
        );
        assert!(cli.source_maps);
        assert!(!cli.web);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "peasant", "test", "--grep", "parser", "--clean", "-v", "-w", "-C", "/tmp/p",
        ]);
        assert_eq!(cli.grep.as_deref(), Some("parser"));
        assert!(cli.clean);
        assert!(cli.verbose);
        assert!(cli.web);
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/p")));
    }

    #[test]
    fn test_cli_requires_a_command() {
        assert!(Cli::try_parse_from(["peasant"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["peasant", "deploy"]).is_err());
    }

    #[test]
    fn test_cli_log_level() {
        let cli = Cli::parse_from(["peasant", "--log", "debug", "build"]);
        assert_eq!(cli.log_level, Some(logger::Level::DEBUG));
        assert!(Cli::try_parse_from(["peasant", "--log", "loud", "build"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
