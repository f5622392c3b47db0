//! Source to output path mapping

use crate::error::{BuildError, BuildResult};
use std::path::{Path, PathBuf};

/// Extension given to source map siblings
pub const MAP_EXTENSION: &str = "map";

/// Maps a source path to its destination under the output root.
///
/// `src/a/b.es6` becomes `lib/a/b.js`: the source root prefix is replaced by
/// the output root and the extension by the canonical one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMapping {
    source_root: PathBuf,
    output_root: PathBuf,
    canonical_extension: String,
}

impl OutputMapping {
    pub fn new(
        source_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        canonical_extension: impl Into<String>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            canonical_extension: canonical_extension.into(),
        }
    }

    /// Destination for a source file.
    ///
    /// The source must lie strictly below the source root. The root itself
    /// has no relative path and would map onto the output root's sibling.
    pub fn destination(&self, source: &Path) -> BuildResult<PathBuf> {
        let outside = || BuildError::Mapping {
            path: source.to_path_buf(),
            root: self.source_root.clone(),
        };
        let relative = source.strip_prefix(&self.source_root).map_err(|_| outside())?;
        if relative.as_os_str().is_empty() {
            return Err(outside());
        }

        Ok(self
            .output_root
            .join(relative)
            .with_extension(&self.canonical_extension))
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}

/// Sibling source map path for an output file (`lib/a.js` -> `lib/a.map`)
pub fn source_map_path(destination: &Path) -> PathBuf {
    destination.with_extension(MAP_EXTENSION)
}
