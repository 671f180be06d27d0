//! CLI response types returned as JSON by `kpopnet` commands.
//!
//! These structs define the shape of JSON output for `kpopnet validate`,
//! `kpopnet migrate`, `kpopnet publish` and `kpopnet show`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Group, Idol};
use crate::enums::SchemaRevision;

/// Response from `kpopnet validate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ValidateResponse {
    pub revision: SchemaRevision,
    pub valid: bool,
    pub idols: usize,
    pub groups: usize,
    pub memberships: usize,
    pub issues: Vec<String>,
}

/// Response from `kpopnet migrate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MigrateResponse {
    pub from: SchemaRevision,
    pub to: SchemaRevision,
    pub idols: usize,
    pub groups: usize,
    pub output: Option<String>,
}

/// Response from `kpopnet publish`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PublishResponse {
    pub idols: usize,
    pub groups: usize,
    pub memberships: usize,
    pub json_path: String,
    pub min_json_path: String,
}

/// Short reference to a group.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GroupRef {
    pub id: String,
    pub name: String,
}

/// One group an idol belongs to, as seen from the idol.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IdolMembership {
    pub group: GroupRef,
    pub current: bool,
    pub roles: Option<String>,
}

/// One member of a group, with the idol's display name when it resolves.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MemberDetail {
    pub idol_id: String,
    pub name: Option<String>,
    pub current: bool,
    pub roles: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct IdolDetail {
    pub idol: Idol,
    pub groups: Vec<IdolMembership>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GroupDetail {
    pub group: Group,
    pub members: Vec<MemberDetail>,
    pub parent: Option<GroupRef>,
    pub subunits: Vec<GroupRef>,
}

/// Response from `kpopnet show`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShowResponse {
    Idol(IdolDetail),
    Group(GroupDetail),
}

impl From<&Group> for GroupRef {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
        }
    }
}
