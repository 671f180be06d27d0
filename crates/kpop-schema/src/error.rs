//! Validation and schema error types.

use std::fmt;

use kpop_core::enums::EntityKind;
use thiserror::Error;

/// A single problem found in a profiles document.
///
/// `path` values point into the document: `idols[3].urls[1]`,
/// `groups[0].members[2].idol_id`, or `$` for the root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent.
    #[error("{path}: missing required field '{field}'")]
    MissingField { path: String, field: String },

    /// A present field has the wrong JSON type.
    #[error("{path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// A field that is not part of the record shape.
    #[error("{path}: unknown field '{field}'")]
    UnknownField { path: String, field: String },

    /// A string field that does not have the expected form.
    #[error("{path}: invalid value '{value}': {reason}")]
    InvalidFormat {
        path: String,
        value: String,
        reason: String,
    },

    /// Two records of the same kind share an id.
    #[error("{path}: duplicate {entity} id '{id}'")]
    DuplicateId {
        path: String,
        entity: EntityKind,
        id: String,
    },

    /// The same idol is listed twice in one group.
    #[error("{path}: idol '{idol_id}' listed more than once in group '{group_id}'")]
    DuplicateMember {
        path: String,
        group_id: String,
        idol_id: String,
    },

    /// A reference to an id that does not exist in the same snapshot.
    #[error("{path}: no {target} with id '{id}'")]
    DanglingReference {
        path: String,
        target: EntityKind,
        id: String,
    },

    /// Following `parent_id` from this group leads back to it.
    #[error("{path}: group '{group_id}' is its own ancestor")]
    ParentCycle { path: String, group_id: String },
}

impl ValidationError {
    /// Location of the problem inside the document.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::MissingField { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::UnknownField { path, .. }
            | Self::InvalidFormat { path, .. }
            | Self::DuplicateId { path, .. }
            | Self::DuplicateMember { path, .. }
            | Self::DanglingReference { path, .. }
            | Self::ParentCycle { path, .. } => path,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::UnknownField { .. } => "unknown_field",
            Self::InvalidFormat { .. } => "invalid_format",
            Self::DuplicateId { .. } => "duplicate_id",
            Self::DuplicateMember { .. } => "duplicate_member",
            Self::DanglingReference { .. } => "dangling_reference",
            Self::ParentCycle { .. } => "parent_cycle",
        }
    }
}

/// Every issue found in one document. Any issue fails the whole load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub issues: Vec<ValidationError>,
}

impl ValidationFailure {
    /// Turn a collected issue list into a result.
    ///
    /// # Errors
    ///
    /// Returns `Self` when `issues` is not empty.
    pub fn check(issues: Vec<ValidationError>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self { issues })
        }
    }

    /// Whether any issue carries the given [`ValidationError::code`].
    #[must_use]
    pub fn has(&self, code: &str) -> bool {
        self.issues.iter().any(|i| i.code() == code)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [] => f.write_str("validation failed"),
            [only] => write!(f, "validation failed: {only}"),
            [first, rest @ ..] => write!(
                f,
                "validation failed: {first} (and {} more)",
                rest.len()
            ),
        }
    }
}

impl std::error::Error for ValidationFailure {}

/// Errors from loading, migrating, or schema lookups.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass JSON Schema validation.
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),

    /// Structural or referential validation failed.
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    /// Input is not JSON.
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is JSON but not shaped like a profiles document of any revision.
    #[error("unrecognized document shape: {0}")]
    UnrecognizedShape(String),

    /// Legacy data where `Idol.groups` and `Group.members` disagree.
    #[error("inconsistent membership between idol '{idol_id}' and group '{group_id}': {reason}")]
    InconsistentMembership {
        idol_id: String,
        group_id: String,
        reason: String,
    },
}
