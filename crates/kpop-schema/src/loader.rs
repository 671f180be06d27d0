//! One-step loading of a profiles document of either revision.

use kpop_core::entities::Profiles;
use kpop_core::enums::SchemaRevision;
use serde_json::Value;

use crate::error::{SchemaError, ValidationFailure};
use crate::integrity::check_integrity;
use crate::migrate;
use crate::validator::{Validator, ValidatorOptions};

/// A validated snapshot together with the revision it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub revision: SchemaRevision,
    pub profiles: Profiles,
}

/// Parse JSON text and load it. See [`load_value`].
///
/// # Errors
///
/// Returns `SchemaError::Json` for malformed JSON, otherwise whatever
/// [`load_value`] returns.
pub fn load_str(input: &str, options: ValidatorOptions) -> Result<Loaded, SchemaError> {
    let value: Value = serde_json::from_str(input)?;
    load_value(&value, options)
}

/// Detect the revision, validate against that revision's shapes, upgrade
/// legacy data, and re-check the current invariants on the result.
///
/// # Errors
///
/// - `SchemaError::UnrecognizedShape` if the revision cannot be detected
/// - `SchemaError::Invalid` with every issue found
/// - `SchemaError::InconsistentMembership` for legacy data whose two
///   membership directions disagree
pub fn load_value(value: &Value, options: ValidatorOptions) -> Result<Loaded, SchemaError> {
    let revision = migrate::detect_revision(value)?;
    let validator = Validator::new(options);

    let profiles = match revision {
        SchemaRevision::Current => validator.validate(value)?,
        SchemaRevision::Legacy => {
            let legacy = validator.validate_legacy(value)?;
            let profiles = migrate::upgrade(legacy)?;
            ValidationFailure::check(check_integrity(&profiles))?;
            profiles
        }
    };

    for (i, idol) in profiles.idols.iter().enumerate() {
        if idol.urls.is_empty() {
            tracing::warn!(index = i, id = %idol.id, "idol has no reference urls");
        }
    }
    for (i, group) in profiles.groups.iter().enumerate() {
        if group.urls.is_empty() {
            tracing::warn!(index = i, id = %group.id, "group has no reference urls");
        }
    }

    Ok(Loaded { revision, profiles })
}
