//! Borrowed lookup index over a [`Profiles`] snapshot.
//!
//! The current schema stores membership on the group side only, so answering
//! "which groups is this idol in" needs a reverse map. The index builds the
//! id maps once and then serves reads without touching the snapshot again.
//! Duplicate ids keep the first record; run the validator first if that
//! matters.

use std::collections::{HashMap, HashSet};

use crate::entities::{Group, GroupMember, Idol, Profiles};
use crate::enums::EntityKind;
use crate::errors::CoreError;

/// Id lookups and reverse relations for one snapshot.
#[derive(Debug)]
pub struct ProfileIndex<'a> {
    idols: HashMap<&'a str, &'a Idol>,
    groups: HashMap<&'a str, &'a Group>,
    memberships: HashMap<&'a str, Vec<(&'a Group, &'a GroupMember)>>,
    subunits: HashMap<&'a str, Vec<&'a Group>>,
}

impl<'a> ProfileIndex<'a> {
    #[must_use]
    pub fn new(profiles: &'a Profiles) -> Self {
        let mut idols = HashMap::with_capacity(profiles.idols.len());
        for idol in &profiles.idols {
            idols.entry(idol.id.as_str()).or_insert(idol);
        }

        let mut groups = HashMap::with_capacity(profiles.groups.len());
        let mut memberships: HashMap<&str, Vec<_>> = HashMap::new();
        let mut subunits: HashMap<&str, Vec<_>> = HashMap::new();
        for group in &profiles.groups {
            groups.entry(group.id.as_str()).or_insert(group);
            for member in &group.members {
                memberships
                    .entry(member.idol_id.as_str())
                    .or_default()
                    .push((group, member));
            }
            if let Some(parent_id) = group.parent_id.as_deref() {
                subunits.entry(parent_id).or_default().push(group);
            }
        }

        Self {
            idols,
            groups,
            memberships,
            subunits,
        }
    }

    #[must_use]
    pub fn idol(&self, id: &str) -> Option<&'a Idol> {
        self.idols.get(id).copied()
    }

    #[must_use]
    pub fn group(&self, id: &str) -> Option<&'a Group> {
        self.groups.get(id).copied()
    }

    /// Like [`Self::idol`] but reports a missing id as an error.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no idol has this id.
    pub fn require_idol(&self, id: &str) -> Result<&'a Idol, CoreError> {
        self.idol(id).ok_or_else(|| not_found(EntityKind::Idol, id))
    }

    /// Like [`Self::group`] but reports a missing id as an error.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no group has this id.
    pub fn require_group(&self, id: &str) -> Result<&'a Group, CoreError> {
        self.group(id).ok_or_else(|| not_found(EntityKind::Group, id))
    }

    /// Which kind of record, if any, owns `id`.
    #[must_use]
    pub fn kind_of(&self, id: &str) -> Option<EntityKind> {
        if self.idols.contains_key(id) {
            Some(EntityKind::Idol)
        } else if self.groups.contains_key(id) {
            Some(EntityKind::Group)
        } else {
            None
        }
    }

    /// Members of a group in list order, each paired with the resolved idol
    /// (`None` for a dangling reference).
    #[must_use]
    pub fn members_of(&self, group_id: &str) -> Vec<(&'a GroupMember, Option<&'a Idol>)> {
        self.group(group_id)
            .map(|group| {
                group
                    .members
                    .iter()
                    .map(|m| (m, self.idol(&m.idol_id)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Groups an idol belongs to, in snapshot order.
    #[must_use]
    pub fn groups_of(&self, idol_id: &str) -> &[(&'a Group, &'a GroupMember)] {
        self.memberships.get(idol_id).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn parent(&self, group_id: &str) -> Option<&'a Group> {
        self.group(group_id)?
            .parent_id
            .as_deref()
            .and_then(|pid| self.group(pid))
    }

    /// Direct sub-units of a group.
    #[must_use]
    pub fn subunits(&self, group_id: &str) -> &[&'a Group] {
        self.subunits.get(group_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Parent chain from the nearest parent upwards. Stops at a missing
    /// parent or when a group would repeat.
    #[must_use]
    pub fn ancestors(&self, group_id: &str) -> Vec<&'a Group> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([group_id]);
        let mut cursor = self.parent(group_id);
        while let Some(group) = cursor {
            if !seen.insert(group.id.as_str()) {
                break;
            }
            chain.push(group);
            cursor = self.parent(&group.id);
        }
        chain
    }

    #[must_use]
    pub fn idol_count(&self) -> usize {
        self.idols.len()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

fn not_found(kind: EntityKind, id: &str) -> CoreError {
    CoreError::NotFound {
        entity_type: kind.to_string(),
        id: id.to_string(),
    }
}
