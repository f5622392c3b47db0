//! Transform capability
//!
//! A transform turns the text of one source file into emitted code and,
//! when asked for, a source map. The sequencer does not care how: the
//! built-in implementations copy the source through or pipe it into an
//! external transpiler process.

mod command;
mod copy;

pub use command::CommandTransform;
pub use copy::CopyTransform;

use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Per-invocation transform options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Produce a source map alongside the code
    pub source_maps: bool,
}

/// Result of transforming one source file
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    /// Emitted code
    pub code: String,
    /// Source map document, when one was requested and produced
    pub map: Option<Value>,
}

impl TransformOutput {
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            map: None,
        }
    }

    pub fn with_map(mut self, map: Value) -> Self {
        self.map = Some(map);
        self
    }
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to start {program}: {error}")]
    Spawn {
        program: String,
        error: std::io::Error,
    },

    #[error("{program} exited with {status}:\n{stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("transpiler output is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("invalid source map: {0}")]
    InvalidSourceMap(String),

    #[error("{0}")]
    Rejected(String),
}

/// Something that can transform a single source file
pub trait Transform {
    fn transform(
        &self,
        source: &str,
        filename: &Path,
        options: &TransformOptions,
    ) -> Result<TransformOutput, TransformError>;
}

impl<F> Transform for F
where
    F: Fn(&str, &Path, &TransformOptions) -> Result<TransformOutput, TransformError>,
{
    fn transform(
        &self,
        source: &str,
        filename: &Path,
        options: &TransformOptions,
    ) -> Result<TransformOutput, TransformError> {
        self(source, filename, options)
    }
}
