//! Incremental build sequencing
use crate::error::{BuildError, BuildResult};
use crate::mapping::{source_map_path, OutputMapping};
use crate::source_tree::SourceTree;
use crate::sourcemap;
use crate::staleness::is_stale;
use crate::transform::{Transform, TransformOptions};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Directory sources are read from
    pub source_root: PathBuf,
    /// Directory outputs are written to
    pub output_root: PathBuf,
    /// Recognized source extensions, without the leading dot
    pub extensions: Vec<String>,
    /// Extension every output file gets
    pub canonical_extension: String,
    /// Emit a sibling source map per output
    pub source_maps: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src"),
            output_root: PathBuf::from("lib"),
            extensions: vec!["js".to_string(), "es6".to_string()],
            canonical_extension: "js".to_string(),
            source_maps: false,
        }
    }
}

/// A source file that was rewritten during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Sibling map written next to the destination
    pub source_map: Option<PathBuf>,
}

/// Build statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Sources found under the source root
    pub discovered: usize,
    /// Sources whose output was already up to date
    pub skipped: usize,
    /// Total run time
    pub total_time: Duration,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Rewritten files, in processing order
    pub rewritten: Vec<RewrittenFile>,
    pub stats: BuildStats,
}

impl RunReport {
    /// `(source, destination)` pairs rewritten in this run
    pub fn pairs(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.rewritten
            .iter()
            .map(|f| (f.source.as_path(), f.destination.as_path()))
    }

    pub fn len(&self) -> usize {
        self.rewritten.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewritten.is_empty()
    }
}

/// Regenerates out-of-date outputs for a source tree.
///
/// Each run is a single sequential pass: discover, then for every source
/// check staleness, transform, write. The first error ends the run; outputs
/// written before it stay on disk.
pub struct Sequencer<'a> {
    config: BuildConfig,
    transform: &'a dyn Transform,
}

impl<'a> Sequencer<'a> {
    pub fn new(config: BuildConfig, transform: &'a dyn Transform) -> Self {
        Self { config, transform }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Execute one build pass
    pub fn run(&self) -> BuildResult<RunReport> {
        let start = Instant::now();

        let tree = SourceTree::discover_excluding(
            &self.config.source_root,
            &self.config.extensions,
            &self.config.output_root,
        )?;
        let mapping = OutputMapping::new(
            &self.config.source_root,
            &self.config.output_root,
            &self.config.canonical_extension,
        );

        let mut report = RunReport::default();
        report.stats.discovered = tree.len();

        for source in tree {
            let destination = mapping.destination(&source)?;

            if !is_stale(&source, &destination) {
                tracing::debug!(source = %source.display(), "up to date");
                report.stats.skipped += 1;
                continue;
            }

            let rewritten = self.rebuild(source, destination)?;
            report.rewritten.push(rewritten);
        }

        report.stats.total_time = start.elapsed();
        tracing::info!(
            rewritten = report.len(),
            skipped = report.stats.skipped,
            "build finished"
        );

        Ok(report)
    }

    /// Remove the output root and everything in it
    pub fn clean(&self) -> BuildResult<()> {
        let output_root = &self.config.output_root;
        match fs::remove_dir_all(output_root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(BuildError::Clean {
                path: output_root.clone(),
                error,
            }),
        }
    }

    /// Transform one stale source and write its outputs
    fn rebuild(&self, source: PathBuf, destination: PathBuf) -> BuildResult<RewrittenFile> {
        let text = fs::read_to_string(&source).map_err(|e| BuildError::read(&source, e))?;
        let options = TransformOptions {
            source_maps: self.config.source_maps,
        };
        let output = self
            .transform
            .transform(&text, &source, &options)
            .map_err(|e| BuildError::transform(&source, e))?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::write(parent, e))?;
        }

        // The map is only written once the code referencing it is on disk
        let pending_map = match (self.config.source_maps, output.map) {
            (true, Some(map)) => Some((source_map_path(&destination), map)),
            _ => None,
        };
        let code = match &pending_map {
            Some((map_path, _)) => sourcemap::append_reference(&output.code, map_path),
            None => output.code,
        };

        fs::write(&destination, code).map_err(|e| BuildError::write(&destination, e))?;

        let source_map = match pending_map {
            Some((map_path, map)) => {
                let json = serde_json::to_string(&map).map_err(|e| {
                    BuildError::write(&map_path, io::Error::new(io::ErrorKind::InvalidData, e))
                })?;
                fs::write(&map_path, json).map_err(|e| BuildError::write(&map_path, e))?;
                Some(map_path)
            }
            None => None,
        };

        tracing::debug!(
            source = %source.display(),
            destination = %destination.display(),
            "rewrote"
        );

        Ok(RewrittenFile {
            source,
            destination,
            source_map,
        })
    }
}

/// Run one build pass with `config`, transforming stale sources with `transform`
pub fn run(config: &BuildConfig, transform: &dyn Transform) -> BuildResult<RunReport> {
    Sequencer::new(config.clone(), transform).run()
}
