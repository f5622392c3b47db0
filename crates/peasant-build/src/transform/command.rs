use super::{Transform, TransformError, TransformOptions, TransformOutput};
use crate::sourcemap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Pipes each source through an external transpiler process.
///
/// The source is written to the child's stdin and the emitted code is read
/// from stdout. When source maps are requested the process is asked for an
/// inline map, which is then split off the code and decoded.
#[derive(Debug, Clone)]
pub struct CommandTransform {
    program: PathBuf,
    args: Vec<String>,
    filename_flag: Option<String>,
    source_map_args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl CommandTransform {
    /// Run `program` with no extra arguments
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            filename_flag: None,
            source_map_args: Vec::new(),
            current_dir: None,
        }
    }

    /// Babel CLI reading from stdin (`babel --filename <file> [--source-maps inline]`)
    pub fn babel(program: impl Into<PathBuf>) -> Self {
        Self::new(program)
            .with_filename_flag("--filename")
            .with_source_map_args(["--source-maps", "inline"])
    }

    /// Append arguments passed on every invocation
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Flag used to tell the process which file it is reading
    pub fn with_filename_flag(mut self, flag: impl Into<String>) -> Self {
        self.filename_flag = Some(flag.into());
        self
    }

    /// Arguments that make the process append an inline source map
    pub fn with_source_map_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_map_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Working directory for the process
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    fn command(&self, filename: &Path, options: &TransformOptions) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(flag) = &self.filename_flag {
            command.arg(flag).arg(filename);
        }
        if options.source_maps {
            command.args(&self.source_map_args);
        }
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl Transform for CommandTransform {
    fn transform(
        &self,
        source: &str,
        filename: &Path,
        options: &TransformOptions,
    ) -> Result<TransformOutput, TransformError> {
        let spawn_error = |error| TransformError::Spawn {
            program: self.program_name(),
            error,
        };

        let mut child = self
            .command(filename, options)
            .spawn()
            .map_err(spawn_error)?;

        // Feed stdin from another thread so a large output cannot block us.
        let stdin = child.stdin.take();
        let input = source.to_owned();
        let writer = std::thread::spawn(move || match stdin {
            Some(mut stdin) => stdin.write_all(input.as_bytes()),
            None => Ok(()),
        });

        let output = child.wait_with_output().map_err(spawn_error)?;
        // A process may legitimately stop reading early; its exit status decides.
        let _ = writer.join();

        if !output.status.success() {
            return Err(TransformError::Failed {
                program: self.program_name(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        let code = String::from_utf8(output.stdout)?;
        if !options.source_maps {
            return Ok(TransformOutput::code(code));
        }

        let (code, map) = sourcemap::split_inline_map(&code)?;
        Ok(TransformOutput { code, map })
    }
}
