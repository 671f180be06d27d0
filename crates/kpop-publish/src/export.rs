//! Published JSON files.
//!
//! Both forms have object keys sorted at every level and keep non-ASCII text
//! as-is. The pretty form indents by two spaces; the compact form has no
//! whitespace at all.

use std::fs;
use std::path::{Path, PathBuf};

use kpop_core::entities::Profiles;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PublishError;

/// Where and under which names the two files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub out_dir: PathBuf,
    pub json_file_name: String,
    pub min_json_file_name: String,
}

impl Default for ExportTarget {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            json_file_name: "kpopnet.json".to_string(),
            min_json_file_name: "kpopnet.min.json".to_string(),
        }
    }
}

impl ExportTarget {
    #[must_use]
    pub fn json_path(&self) -> PathBuf {
        self.out_dir.join(&self.json_file_name)
    }

    #[must_use]
    pub fn min_json_path(&self) -> PathBuf {
        self.out_dir.join(&self.min_json_file_name)
    }
}

/// Two-space indented, sorted keys. Works for either revision's snapshot.
///
/// # Errors
///
/// `PublishError::Json` if serialization fails.
pub fn render_pretty<T: Serialize>(value: &T) -> Result<String, PublishError> {
    Ok(serde_json::to_string_pretty(&sorted_value(value)?)?)
}

/// No whitespace, sorted keys.
///
/// # Errors
///
/// `PublishError::Json` if serialization fails.
pub fn render_min<T: Serialize>(value: &T) -> Result<String, PublishError> {
    Ok(serde_json::to_string(&sorted_value(value)?)?)
}

/// Write both forms, creating the output directory if needed. Returns the
/// pretty and compact paths.
///
/// # Errors
///
/// `PublishError::Io` for filesystem failures, `PublishError::Json` if
/// serialization fails.
pub fn write_files(
    profiles: &Profiles,
    target: &ExportTarget,
) -> Result<(PathBuf, PathBuf), PublishError> {
    fs::create_dir_all(&target.out_dir).map_err(|e| PublishError::io(&target.out_dir, e))?;

    let json_path = target.json_path();
    let min_json_path = target.min_json_path();
    write(&json_path, &render_pretty(profiles)?)?;
    write(&min_json_path, &render_min(profiles)?)?;

    tracing::info!(
        json = %json_path.display(),
        min_json = %min_json_path.display(),
        idols = profiles.idols.len(),
        groups = profiles.groups.len(),
        "wrote profiles"
    );
    Ok((json_path, min_json_path))
}

fn write(path: &Path, contents: &str) -> Result<(), PublishError> {
    fs::write(path, contents).map_err(|e| PublishError::io(path, e))
}

fn sorted_value<T: Serialize>(value: &T) -> Result<Value, PublishError> {
    Ok(sort_keys(serde_json::to_value(value)?))
}

/// Rebuild every object with its keys in order, whatever map type
/// `serde_json` was built with.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
