//! npm package manifest (package.json)
//!
//! Only the handful of fields Peasant reads or patches are typed; everything
//! else is carried through untouched, in its original key order.

use crate::{ConfigError, ConfigResult};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct PackageJson {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl PackageJson {
    /// Load package.json from a file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::parse(path, &content)
    }

    /// Parse package.json content that lives at `path`
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> ConfigResult<Self> {
        let path = path.into();
        let value: Value =
            serde_json::from_str(content).map_err(|e| ConfigError::JsonParseError {
                file: path.clone(),
                error: e,
            })?;

        match value {
            Value::Object(fields) => Ok(Self { path, fields }),
            _ => Err(ConfigError::invalid(
                path.display().to_string(),
                "package.json must contain an object",
            )),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Package name
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// ES module entry point (`module` field)
    pub fn module(&self) -> Option<&str> {
        self.fields.get("module").and_then(Value::as_str)
    }

    /// Script command registered under `name`
    pub fn script(&self, name: &str) -> Option<&str> {
        self.fields
            .get("scripts")
            .and_then(Value::as_object)
            .and_then(|scripts| scripts.get(name))
            .and_then(Value::as_str)
    }

    /// Set (or replace) a script, creating the `scripts` object when missing
    pub fn set_script(&mut self, name: impl Into<String>, command: impl Into<String>) {
        let scripts = self
            .fields
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));

        if !scripts.is_object() {
            *scripts = Value::Object(Map::new());
        }
        if let Value::Object(scripts) = scripts {
            scripts.insert(name.into(), Value::String(command.into()));
        }
    }

    /// Serialize like npm does: two space indent and a trailing newline
    pub fn to_json_string(&self) -> String {
        let mut out = serde_json::to_string_pretty(&self.fields).unwrap_or_else(|_| "{}".into());
        out.push('\n');
        out
    }

    /// Write back to the file it was loaded from
    pub fn save(&self) -> ConfigResult<()> {
        fs::write(&self.path, self.to_json_string()).map_err(|e| ConfigError::io(&self.path, e))
    }
}
