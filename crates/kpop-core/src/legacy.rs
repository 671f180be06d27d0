//! Record structs for the legacy (v1) schema revision.
//!
//! In this revision each idol lists the ids of its groups and the join record
//! names its foreign key `id`. There are no alias, thumbnail or parent fields.
//! Conversion to and from the current revision lives in `kpop-schema`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Idol {
    // required
    pub id: String,
    pub name: String,
    pub name_original: String,
    pub real_name: String,
    pub real_name_original: String,
    pub birth_date: String,
    pub urls: Vec<String>,
    // optional
    pub debut_date: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    // references
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GroupMember {
    /// Idol id.
    pub id: String,
    pub current: bool,
    pub roles: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Group {
    // required
    pub id: String,
    pub name: String,
    pub name_original: String,
    pub agency_name: String,
    pub urls: Vec<String>,
    // optional
    pub debut_date: Option<String>,
    pub disband_date: Option<String>,
    // references
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Profiles {
    pub groups: Vec<Group>,
    pub idols: Vec<Idol>,
}
