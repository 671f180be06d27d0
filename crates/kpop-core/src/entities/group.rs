use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Membership of one idol in one group.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct GroupMember {
    /// Foreign key into [`crate::entities::Profiles::idols`].
    pub idol_id: String,
    /// `false` for former members.
    pub current: bool,
    /// Free-form role text, e.g. `"leader, vocalist"`.
    pub roles: Option<String>,
}

/// A performing unit. Sub-units point at their parent through `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Group {
    // required
    pub id: String,
    pub name: String,
    pub name_original: String,
    pub agency_name: String,
    pub urls: Vec<String>,
    // optional
    pub name_alias: Option<String>,
    pub debut_date: Option<String>,
    pub disband_date: Option<String>,
    pub thumb_url: Option<String>,
    pub parent_id: Option<String>,
    // references
    pub members: Vec<GroupMember>,
}

impl Group {
    /// Ordering key used for published dumps: debut date (unknown sorts as
    /// `"0"`) then name. Dumps list groups by this key, newest first.
    #[must_use]
    pub fn sort_key(&self) -> (&str, &str) {
        (self.debut_date.as_deref().unwrap_or("0"), &self.name)
    }

    /// Whether `idol_id` appears in this group's member list.
    #[must_use]
    pub fn has_member(&self, idol_id: &str) -> bool {
        self.members.iter().any(|m| m.idol_id == idol_id)
    }
}
