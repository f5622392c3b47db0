use super::{Transform, TransformError, TransformOptions, TransformOutput};
use crate::sourcemap;
use std::path::Path;

/// Emits sources unchanged, for projects that need no transpilation
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyTransform;

impl Transform for CopyTransform {
    fn transform(
        &self,
        source: &str,
        filename: &Path,
        options: &TransformOptions,
    ) -> Result<TransformOutput, TransformError> {
        let output = TransformOutput::code(source);
        if !options.source_maps {
            return Ok(output);
        }

        let name = filename
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let map = sourcemap::identity_map(&name, &filename.to_string_lossy(), source);
        Ok(output.with_map(map))
    }
}
