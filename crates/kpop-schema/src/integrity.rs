//! Referential checks on typed snapshots.
//!
//! These run after decoding, so they only see well-typed records. Each check
//! collects every violation it finds.

use std::collections::{HashMap, HashSet};

use kpop_core::entities::{Group, Profiles};
use kpop_core::enums::EntityKind;
use kpop_core::legacy;

use crate::error::ValidationError;

/// Id uniqueness, member and parent references, duplicate members and parent
/// cycles for a current-revision snapshot.
#[must_use]
pub fn check_integrity(profiles: &Profiles) -> Vec<ValidationError> {
    let mut issues = Vec::new();
    let idol_ids = unique_ids(
        profiles.idols.iter().map(|i| i.id.as_str()),
        EntityKind::Idol,
        &mut issues,
    );
    let group_ids = unique_ids(
        profiles.groups.iter().map(|g| g.id.as_str()),
        EntityKind::Group,
        &mut issues,
    );

    for (gi, group) in profiles.groups.iter().enumerate() {
        check_members(
            gi,
            &group.id,
            group.members.iter().map(|m| m.idol_id.as_str()),
            "idol_id",
            &idol_ids,
            &mut issues,
        );
        if let Some(parent_id) = group.parent_id.as_deref() {
            if !group_ids.contains(parent_id) {
                issues.push(ValidationError::DanglingReference {
                    path: format!("groups[{gi}].parent_id"),
                    target: EntityKind::Group,
                    id: parent_id.to_string(),
                });
            }
        }
    }

    check_parent_cycles(&profiles.groups, &mut issues);
    issues
}

/// Same checks for a legacy snapshot, where members use `id` and idols list
/// their group ids.
#[must_use]
pub fn check_legacy_integrity(profiles: &legacy::Profiles) -> Vec<ValidationError> {
    let mut issues = Vec::new();
    let idol_ids = unique_ids(
        profiles.idols.iter().map(|i| i.id.as_str()),
        EntityKind::Idol,
        &mut issues,
    );
    let group_ids = unique_ids(
        profiles.groups.iter().map(|g| g.id.as_str()),
        EntityKind::Group,
        &mut issues,
    );

    for (gi, group) in profiles.groups.iter().enumerate() {
        check_members(
            gi,
            &group.id,
            group.members.iter().map(|m| m.id.as_str()),
            "id",
            &idol_ids,
            &mut issues,
        );
    }

    for (ii, idol) in profiles.idols.iter().enumerate() {
        let mut seen = HashSet::new();
        for (gi, group_id) in idol.groups.iter().enumerate() {
            let path = format!("idols[{ii}].groups[{gi}]");
            if !group_ids.contains(group_id.as_str()) {
                issues.push(ValidationError::DanglingReference {
                    path: path.clone(),
                    target: EntityKind::Group,
                    id: group_id.clone(),
                });
            }
            if !seen.insert(group_id.as_str()) {
                issues.push(ValidationError::DuplicateMember {
                    path,
                    group_id: group_id.clone(),
                    idol_id: idol.id.clone(),
                });
            }
        }
    }

    issues
}

fn unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: EntityKind,
    issues: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for (i, id) in ids.enumerate() {
        if !seen.insert(id) {
            issues.push(ValidationError::DuplicateId {
                path: format!("{}[{i}].id", kind.collection()),
                entity: kind,
                id: id.to_string(),
            });
        }
    }
    seen
}

fn check_members<'a>(
    group_index: usize,
    group_id: &str,
    member_ids: impl Iterator<Item = &'a str>,
    key: &str,
    idol_ids: &HashSet<&str>,
    issues: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for (mi, idol_id) in member_ids.enumerate() {
        let path = format!("groups[{group_index}].members[{mi}].{key}");
        if !idol_ids.contains(idol_id) {
            issues.push(ValidationError::DanglingReference {
                path: path.clone(),
                target: EntityKind::Idol,
                id: idol_id.to_string(),
            });
        }
        if !seen.insert(idol_id) {
            issues.push(ValidationError::DuplicateMember {
                path,
                group_id: group_id.to_string(),
                idol_id: idol_id.to_string(),
            });
        }
    }
}

fn check_parent_cycles(groups: &[Group], issues: &mut Vec<ValidationError>) {
    let parents: HashMap<&str, &str> = groups
        .iter()
        .filter_map(|g| g.parent_id.as_deref().map(|p| (g.id.as_str(), p)))
        .collect();

    for (gi, group) in groups.iter().enumerate() {
        let start = group.id.as_str();
        let mut seen = HashSet::from([start]);
        let mut cursor = parents.get(start).copied();
        while let Some(id) = cursor {
            if id == start {
                issues.push(ValidationError::ParentCycle {
                    path: format!("groups[{gi}].parent_id"),
                    group_id: start.to_string(),
                });
                break;
            }
            if !seen.insert(id) {
                break;
            }
            cursor = parents.get(id).copied();
        }
    }
}
