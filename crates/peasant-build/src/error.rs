/// Build system error types
use std::path::PathBuf;
use thiserror::Error;

use crate::transform::TransformError;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to scan source directory {path}: {error}")]
    Discovery {
        path: PathBuf,
        error: walkdir::Error,
    },

    #[error("Failed to transform {path}: {error}")]
    Transform {
        path: PathBuf,
        error: TransformError,
    },

    #[error("Failed to read {path}: {error}")]
    Read {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to write {path}: {error}")]
    Write {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Source {path} is outside the source directory {root}")]
    Mapping { path: PathBuf, root: PathBuf },

    #[error("Failed to clean {path}: {error}")]
    Clean {
        path: PathBuf,
        error: std::io::Error,
    },
}

impl BuildError {
    /// Create a discovery error
    pub fn discovery(path: impl Into<PathBuf>, error: walkdir::Error) -> Self {
        Self::Discovery {
            path: path.into(),
            error,
        }
    }

    /// Create a transform error for a source file
    pub fn transform(path: impl Into<PathBuf>, error: TransformError) -> Self {
        Self::Transform {
            path: path.into(),
            error,
        }
    }

    /// Create a read error with path context
    pub fn read(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            error,
        }
    }

    /// Create a write error with path context
    pub fn write(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            error,
        }
    }

    /// Path of the file the error is about
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Discovery { path, .. }
            | Self::Transform { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Mapping { path, .. }
            | Self::Clean { path, .. } => path,
        }
    }
}
