//! Publishing settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_site_base_url() -> String {
    "https://net.kpop.re".to_string()
}

fn default_overrides_path() -> String {
    "overrides.json".to_string()
}

fn default_out_dir() -> String {
    ".".to_string()
}

fn default_json_file_name() -> String {
    "kpopnet.json".to_string()
}

fn default_min_json_file_name() -> String {
    "kpopnet.min.json".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublishConfig {
    /// Site that serves profile pages; ids are appended as `/?id=...`.
    #[serde(default = "default_site_base_url")]
    pub site_base_url: String,

    /// Manual overrides file, used when it exists.
    #[serde(default = "default_overrides_path")]
    pub overrides_path: String,

    /// Directory the published files are written to.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_json_file_name")]
    pub json_file_name: String,

    #[serde(default = "default_min_json_file_name")]
    pub min_json_file_name: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            site_base_url: default_site_base_url(),
            overrides_path: default_overrides_path(),
            out_dir: default_out_dir(),
            json_file_name: default_json_file_name(),
            min_json_file_name: default_min_json_file_name(),
        }
    }
}

impl PublishConfig {
    /// Reject values the publisher cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a base url that is not
    /// http(s), an empty or path-like file name, or two identical file names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.site_base_url.starts_with("https://")
            || self.site_base_url.starts_with("http://"))
        {
            return Err(invalid(
                "publish.site_base_url",
                "must start with http:// or https://",
            ));
        }
        for (field, name) in [
            ("publish.json_file_name", &self.json_file_name),
            ("publish.min_json_file_name", &self.min_json_file_name),
        ] {
            if name.is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(invalid(field, "must be a file name, not a path"));
            }
        }
        if self.json_file_name == self.min_json_file_name {
            return Err(invalid(
                "publish.min_json_file_name",
                "must differ from publish.json_file_name",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn json_path(&self) -> PathBuf {
        Path::new(&self.out_dir).join(&self.json_file_name)
    }

    #[must_use]
    pub fn min_json_path(&self) -> PathBuf {
        Path::new(&self.out_dir).join(&self.min_json_file_name)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
