//! Source map helpers
//!
//! Only what the build pipeline needs: an identity line map for transforms
//! that do not rewrite code, the trailing reference comment, and extraction of
//! inline (data URL) maps emitted by external transpilers.

use crate::transform::TransformError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use std::path::Path;

const REFERENCE_PREFIX: &str = "//# sourceMappingURL=";
const BASE64_MARKER: &str = "base64,";
const BASE64_DIGITS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Build a version 3 map where every line of `source` maps onto itself
pub fn identity_map(file: &str, source_name: &str, source: &str) -> Value {
    let mut mappings = String::new();
    for line in 0..source.lines().count() {
        if line > 0 {
            mappings.push(';');
        }
        // generated column, source index, original line delta, original column
        encode_segment(&mut mappings, &[0, 0, if line == 0 { 0 } else { 1 }, 0]);
    }

    json!({
        "version": 3,
        "file": file,
        "sources": [source_name],
        "sourcesContent": [source],
        "names": [],
        "mappings": mappings,
    })
}

/// Append a reference comment naming the sibling map by its base filename
pub fn append_reference(code: &str, map_path: &Path) -> String {
    let name = map_path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    format!("{}\n{}{}", code, REFERENCE_PREFIX, name)
}

/// Split a trailing inline source map comment off `code`.
///
/// Returns the code without the comment and the decoded map, or the code
/// unchanged and `None` when there is no inline map.
pub fn split_inline_map(code: &str) -> Result<(String, Option<Value>), TransformError> {
    let trimmed = code.trim_end();
    let (body, last_line) = match trimmed.rfind('\n') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx + 1..]),
        None => ("", trimmed),
    };

    let Some(url) = last_line.trim().strip_prefix(REFERENCE_PREFIX) else {
        return Ok((code.to_string(), None));
    };
    let Some(payload) = url
        .strip_prefix("data:")
        .and_then(|rest| rest.find(BASE64_MARKER).map(|i| &rest[i + BASE64_MARKER.len()..]))
    else {
        return Ok((code.to_string(), None));
    };

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| TransformError::InvalidSourceMap(e.to_string()))?;
    let map: Value = serde_json::from_slice(&bytes)
        .map_err(|e| TransformError::InvalidSourceMap(e.to_string()))?;

    Ok((body.trim_end_matches('\r').to_string(), Some(map)))
}

fn encode_segment(out: &mut String, fields: &[i64]) {
    for &value in fields {
        encode_vlq(out, value);
    }
}

fn encode_vlq(out: &mut String, value: i64) {
    let mut vlq = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };

    loop {
        let mut digit = (vlq & 0b1_1111) as usize;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0b10_0000;
        }
        out.push(BASE64_DIGITS[digit] as char);
        if vlq == 0 {
            break;
        }
    }
}
