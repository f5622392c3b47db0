//! Peasant build infrastructure
//!
//! Incremental transpilation of a JavaScript source tree:
//! - Source discovery by extension
//! - Source to output path mapping with extension normalization
//! - Timestamp based staleness checks
//! - Pluggable transforms (copy, external transpiler process)
//! - Optional source map emission

pub mod error;
pub mod mapping;
pub mod sequencer;
pub mod source_tree;
pub mod sourcemap;
pub mod staleness;
pub mod transform;

// Re-export main types
pub use error::{BuildError, BuildResult};
pub use mapping::{source_map_path, OutputMapping};
pub use sequencer::{run, BuildConfig, BuildStats, RewrittenFile, RunReport, Sequencer};
pub use source_tree::SourceTree;
pub use staleness::is_stale;
pub use transform::{
    CommandTransform, CopyTransform, Transform, TransformError, TransformOptions, TransformOutput,
};
