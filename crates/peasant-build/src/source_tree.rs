//! Source discovery

use crate::error::{BuildError, BuildResult};
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Snapshot of the source files under a root, in lexicographic path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTree {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl SourceTree {
    /// Scan `root` recursively for files whose extension is one of `extensions`.
    ///
    /// A missing root is an empty tree, and so is a root that is a plain file.
    /// Any other failure while walking the tree (usually permissions or a
    /// dangling root link) is a [`BuildError::Discovery`].
    pub fn discover(root: impl AsRef<Path>, extensions: &[String]) -> BuildResult<Self> {
        Self::scan(root.as_ref(), extensions, None)
    }

    /// Like [`SourceTree::discover`], but never descends into `excluded`.
    ///
    /// The sequencer passes its output root here so that outputs written
    /// inside the source root are not discovered as sources.
    pub fn discover_excluding(
        root: impl AsRef<Path>,
        extensions: &[String],
        excluded: impl AsRef<Path>,
    ) -> BuildResult<Self> {
        Self::scan(root.as_ref(), extensions, Some(excluded.as_ref()))
    }

    fn scan(root: &Path, extensions: &[String], excluded: Option<&Path>) -> BuildResult<Self> {
        let root = root.to_path_buf();

        match root.symlink_metadata() {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(root = %root.display(), "source directory missing, nothing to build");
                return Ok(Self { root, files: Vec::new() });
            }
            Ok(metadata) if metadata.is_file() => {
                tracing::warn!(root = %root.display(), "source root is a file, nothing to build");
                return Ok(Self { root, files: Vec::new() });
            }
            _ => {}
        }

        let excluded = excluded.map(without_cur_dir);
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| match &excluded {
                Some(excluded) => entry.depth() == 0 || without_cur_dir(entry.path()) != *excluded,
                None => true,
            });

        let mut files = Vec::new();

        for entry in walker {
            let entry = entry.map_err(|e| BuildError::discovery(&root, e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if has_extension(path, extensions) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();

        tracing::debug!(root = %root.display(), count = files.len(), "discovered sources");
        Ok(Self { root, files })
    }

    /// Root directory this tree was discovered from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discovered files
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }
}

impl IntoIterator for SourceTree {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Whether `path` ends in one of the given extensions (compared without the dot)
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|known| known == ext))
        .unwrap_or(false)
}
