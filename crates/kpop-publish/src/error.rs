//! Publishing error types.

use std::path::PathBuf;

use kpop_core::enums::EntityKind;
use kpop_schema::ValidationFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    /// A required draft field is absent, null or empty.
    #[error("{kind} draft #{index}: required field '{field}' is missing or empty")]
    MissingField {
        kind: EntityKind,
        index: usize,
        field: String,
    },

    /// A draft does not have the draft shape (wrong type, unknown field).
    #[error("{kind} draft #{index}: {reason}")]
    InvalidDraft {
        kind: EntityKind,
        index: usize,
        reason: String,
    },

    /// A date in a draft could not be read.
    #[error("{kind} draft #{index}: bad {field}: {reason}")]
    InvalidDate {
        kind: EntityKind,
        index: usize,
        field: String,
        reason: String,
    },

    /// An idol links to, or a group names as parent, a group name no draft has.
    #[error("'{referrer}' refers to unknown group '{name}'")]
    UnknownGroup { referrer: String, name: String },

    /// Two group drafts share a display name, so name links are ambiguous.
    #[error("group name '{name}' is used by more than one group")]
    DuplicateGroupName { name: String },

    /// The assembled snapshot failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PublishError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
