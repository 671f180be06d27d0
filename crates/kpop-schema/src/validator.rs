//! Structural validator for profiles documents.
//!
//! Validation runs in two passes. The structural pass walks the raw JSON
//! against the field tables and collects every missing, mistyped, unknown or
//! malformed field. Only a structurally clean document is decoded into typed
//! records, after which the referential pass (see [`crate::check_integrity`])
//! checks ids and references. Any issue fails the whole document.
//!
//! Validation does not mutate its input and is deterministic.

use std::sync::LazyLock;

use kpop_core::dates::{PartialDate, parse_full_date};
use kpop_core::entities::Profiles;
use kpop_core::enums::SchemaRevision;
use kpop_core::errors::CoreError;
use kpop_core::legacy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ValidationError, ValidationFailure};
use crate::fields::{FieldKind, RecordSpec};
use crate::integrity::{check_integrity, check_legacy_integrity};

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("valid regex"));

const ROOT: &str = "$";
const ROOT_KEYS: [&str; 2] = ["groups", "idols"];

/// Which optional checks run on top of presence and type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Report fields that are not part of the record shape.
    pub deny_unknown_fields: bool,
    /// Check date fields against the wire date forms.
    pub check_formats: bool,
    /// Check that `urls` entries and `thumb_url` are http(s) urls.
    pub check_urls: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            deny_unknown_fields: true,
            check_formats: true,
            check_urls: false,
        }
    }
}

impl ValidatorOptions {
    /// Presence and type checks only.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            deny_unknown_fields: false,
            check_formats: false,
            check_urls: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    #[must_use]
    pub const fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate a current-revision document and decode it.
    ///
    /// # Errors
    ///
    /// Returns every structural issue if there are any; otherwise every
    /// referential issue if there are any.
    pub fn validate(&self, value: &Value) -> Result<Profiles, ValidationFailure> {
        ValidationFailure::check(self.check_structure(value, SchemaRevision::Current))?;
        let profiles: Profiles = decode(value)?;
        ValidationFailure::check(check_integrity(&profiles))?;
        tracing::debug!(
            idols = profiles.idols.len(),
            groups = profiles.groups.len(),
            "validated current profiles"
        );
        Ok(profiles)
    }

    /// Validate a legacy-revision document and decode it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate`], against the legacy shapes.
    pub fn validate_legacy(&self, value: &Value) -> Result<legacy::Profiles, ValidationFailure> {
        ValidationFailure::check(self.check_structure(value, SchemaRevision::Legacy))?;
        let profiles: legacy::Profiles = decode(value)?;
        ValidationFailure::check(check_legacy_integrity(&profiles))?;
        tracing::debug!(
            idols = profiles.idols.len(),
            groups = profiles.groups.len(),
            "validated legacy profiles"
        );
        Ok(profiles)
    }

    /// Structural pass only: presence, JSON types and, depending on options,
    /// unknown fields and formats.
    #[must_use]
    pub fn check_structure(&self, value: &Value, revision: SchemaRevision) -> Vec<ValidationError> {
        let mut issues = Vec::new();
        let Some(root) = value.as_object() else {
            issues.push(type_mismatch(ROOT, "object", value));
            return issues;
        };

        let (idol_spec, group_spec) = RecordSpec::for_revision(revision);
        for (key, spec) in [("groups", group_spec), ("idols", idol_spec)] {
            match root.get(key) {
                None => issues.push(ValidationError::MissingField {
                    path: ROOT.to_string(),
                    field: key.to_string(),
                }),
                Some(Value::Array(items)) => {
                    for (i, item) in items.iter().enumerate() {
                        self.check_record(item, spec, &format!("{key}[{i}]"), &mut issues);
                    }
                }
                Some(other) => issues.push(type_mismatch(key, "array", other)),
            }
        }

        if self.options.deny_unknown_fields {
            for key in root.keys().filter(|k| !ROOT_KEYS.contains(&k.as_str())) {
                issues.push(ValidationError::UnknownField {
                    path: ROOT.to_string(),
                    field: key.clone(),
                });
            }
        }

        issues
    }

    fn check_record(
        &self,
        value: &Value,
        spec: &RecordSpec,
        path: &str,
        issues: &mut Vec<ValidationError>,
    ) {
        let Some(obj) = value.as_object() else {
            issues.push(type_mismatch(path, "object", value));
            return;
        };

        for field in spec.fields {
            match (obj.get(field.name), field.required) {
                (None, true) => issues.push(ValidationError::MissingField {
                    path: path.to_string(),
                    field: field.name.to_string(),
                }),
                (None | Some(Value::Null), false) => {}
                (Some(v), _) => {
                    self.check_field(v, field.kind, &format!("{path}.{}", field.name), issues);
                }
            }
        }

        if self.options.deny_unknown_fields {
            for key in obj.keys().filter(|k| spec.field(k).is_none()) {
                issues.push(ValidationError::UnknownField {
                    path: path.to_string(),
                    field: key.clone(),
                });
            }
        }
    }

    fn check_field(&self, value: &Value, kind: FieldKind, path: &str, issues: &mut Vec<ValidationError>) {
        match kind {
            FieldKind::Text | FieldKind::Id => {
                expect_str(value, path, issues);
            }
            FieldKind::FullDate => {
                let Some(s) = expect_str(value, path, issues) else {
                    return;
                };
                if self.options.check_formats {
                    if let Err(e) = parse_full_date(s) {
                        issues.push(invalid_format(path, s, &e));
                    }
                }
            }
            FieldKind::PartialDate => {
                let Some(s) = expect_str(value, path, issues) else {
                    return;
                };
                if self.options.check_formats {
                    if let Err(e) = s.parse::<PartialDate>() {
                        issues.push(invalid_format(path, s, &e));
                    }
                }
            }
            FieldKind::Url => {
                if let Some(s) = expect_str(value, path, issues) {
                    self.check_url(s, path, issues);
                }
            }
            FieldKind::Number => {
                if !value.is_number() {
                    issues.push(type_mismatch(path, kind.expected(), value));
                }
            }
            FieldKind::Bool => {
                if !value.is_boolean() {
                    issues.push(type_mismatch(path, kind.expected(), value));
                }
            }
            FieldKind::Urls | FieldKind::IdList => {
                let Some(items) = value.as_array() else {
                    issues.push(type_mismatch(path, kind.expected(), value));
                    return;
                };
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    let s = expect_str(item, &item_path, issues);
                    if let (Some(s), FieldKind::Urls) = (s, kind) {
                        self.check_url(s, &item_path, issues);
                    }
                }
            }
            FieldKind::Records(spec) => {
                let Some(items) = value.as_array() else {
                    issues.push(type_mismatch(path, kind.expected(), value));
                    return;
                };
                for (i, item) in items.iter().enumerate() {
                    self.check_record(item, spec, &format!("{path}[{i}]"), issues);
                }
            }
        }
    }

    fn check_url(&self, s: &str, path: &str, issues: &mut Vec<ValidationError>) {
        if self.options.check_urls && !URL_RE.is_match(s) {
            issues.push(ValidationError::InvalidFormat {
                path: path.to_string(),
                value: s.to_string(),
                reason: "expected an http(s) url".to_string(),
            });
        }
    }
}

/// JSON type name of a value, as used in mismatch reports.
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn decode<'de, T: Deserialize<'de>>(value: &'de Value) -> Result<T, ValidationFailure> {
    T::deserialize(value).map_err(|e| ValidationFailure {
        issues: vec![ValidationError::TypeMismatch {
            path: ROOT.to_string(),
            expected: "profiles document".to_string(),
            found: e.to_string(),
        }],
    })
}

fn expect_str<'v>(value: &'v Value, path: &str, issues: &mut Vec<ValidationError>) -> Option<&'v str> {
    let s = value.as_str();
    if s.is_none() {
        issues.push(type_mismatch(path, "string", value));
    }
    s
}

fn type_mismatch(path: &str, expected: &str, found: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        found: json_type_name(found).to_string(),
    }
}

fn invalid_format(path: &str, value: &str, error: &CoreError) -> ValidationError {
    let reason = match error {
        CoreError::InvalidDate { reason, .. } => reason.clone(),
        other => other.to_string(),
    };
    ValidationError::InvalidFormat {
        path: path.to_string(),
        value: value.to_string(),
        reason,
    }
}
