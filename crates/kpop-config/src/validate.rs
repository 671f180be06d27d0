//! Validation settings.

use serde::{Deserialize, Serialize};

const fn enabled() -> bool {
    true
}

/// Which optional validator checks run by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidateConfig {
    /// Report fields outside the record shape.
    #[serde(default = "enabled")]
    pub deny_unknown_fields: bool,

    /// Check date fields against the wire date forms.
    #[serde(default = "enabled")]
    pub check_formats: bool,

    /// Check that url fields are http(s) urls.
    #[serde(default)]
    pub check_urls: bool,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            deny_unknown_fields: true,
            check_formats: true,
            check_urls: false,
        }
    }
}
