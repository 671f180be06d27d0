//! Entity kinds and schema revisions.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The two record kinds that carry an `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Idol,
    Group,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idol => "idol",
            Self::Group => "group",
        }
    }

    /// Key of the top-level array holding this kind in a dump.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Idol => "idols",
            Self::Group => "groups",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SchemaRevision
// ---------------------------------------------------------------------------

/// Observed shapes of a profiles dump.
///
/// ```text
/// legacy  (v1): Idol.groups = [group id], GroupMember.id
/// current (v2): Group.members[].idol_id, name_alias, thumb_url, parent_id
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SchemaRevision {
    Legacy,
    Current,
}

impl SchemaRevision {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Current => "current",
        }
    }
}

impl fmt::Display for SchemaRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
