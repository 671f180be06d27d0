use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Group, Idol};

/// Root aggregate of a dataset snapshot.
///
/// Every cross-reference (`GroupMember::idol_id`, `Group::parent_id`) is
/// resolved against this same value; there is no external resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Profiles {
    pub groups: Vec<Group>,
    pub idols: Vec<Idol>,
}

impl Profiles {
    /// Total number of membership rows across all groups.
    #[must_use]
    pub fn membership_count(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.idols.is_empty()
    }
}
