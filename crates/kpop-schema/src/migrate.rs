//! Conversion between the legacy and current schema revisions.
//!
//! The legacy revision stores membership twice (idol → group ids and
//! group → members); the current one keeps only the group side and renames
//! the member key to `idol_id`. Conversion is explicit: callers detect the
//! revision of raw input and then upgrade, or downgrade current data for
//! consumers that still read the old shape.

use std::collections::{HashMap, HashSet};

use kpop_core::entities::{Group, GroupMember, Idol, Profiles};
use kpop_core::enums::SchemaRevision;
use kpop_core::index::ProfileIndex;
use kpop_core::legacy;
use serde_json::Value;

use crate::error::SchemaError;
use crate::validator::json_type_name;

/// Work out which revision a raw document uses.
///
/// A document is legacy when any idol carries `groups` or any member has an
/// `id` key without `idol_id`. Everything else, including an empty dataset,
/// is current.
///
/// # Errors
///
/// Returns `SchemaError::UnrecognizedShape` when the root is not an object or
/// has neither `groups` nor `idols`.
pub fn detect_revision(value: &Value) -> Result<SchemaRevision, SchemaError> {
    let root = value.as_object().ok_or_else(|| {
        SchemaError::UnrecognizedShape(format!(
            "expected an object at the root, found {}",
            json_type_name(value)
        ))
    })?;
    if !root.contains_key("groups") && !root.contains_key("idols") {
        return Err(SchemaError::UnrecognizedShape(
            "root has neither 'groups' nor 'idols'".to_string(),
        ));
    }

    let idol_lists_groups = root
        .get("idols")
        .and_then(Value::as_array)
        .is_some_and(|idols| idols.iter().any(|i| i.get("groups").is_some()));

    let member_uses_id = root
        .get("groups")
        .and_then(Value::as_array)
        .is_some_and(|groups| {
            groups
                .iter()
                .filter_map(|g| g.get("members")?.as_array())
                .flatten()
                .any(|m| m.get("id").is_some() && m.get("idol_id").is_none())
        });

    let revision = if idol_lists_groups || member_uses_id {
        SchemaRevision::Legacy
    } else {
        SchemaRevision::Current
    };
    tracing::debug!(%revision, "detected schema revision");
    Ok(revision)
}

/// Convert legacy records to the current revision.
///
/// Fields introduced by the current revision start out as `None`.
///
/// # Errors
///
/// Returns `SchemaError::InconsistentMembership` when an idol's `groups`
/// list and the groups' `members` lists disagree.
pub fn upgrade(profiles: legacy::Profiles) -> Result<Profiles, SchemaError> {
    check_membership_agreement(&profiles)?;

    let groups: Vec<Group> = profiles
        .groups
        .into_iter()
        .map(|g| Group {
            id: g.id,
            name: g.name,
            name_original: g.name_original,
            agency_name: g.agency_name,
            urls: g.urls,
            name_alias: None,
            debut_date: g.debut_date,
            disband_date: g.disband_date,
            thumb_url: None,
            parent_id: None,
            members: g
                .members
                .into_iter()
                .map(|m| GroupMember {
                    idol_id: m.id,
                    current: m.current,
                    roles: m.roles,
                })
                .collect(),
        })
        .collect();

    let idols: Vec<Idol> = profiles
        .idols
        .into_iter()
        .map(|i| Idol {
            id: i.id,
            name: i.name,
            name_original: i.name_original,
            real_name: i.real_name,
            real_name_original: i.real_name_original,
            birth_date: i.birth_date,
            urls: i.urls,
            name_alias: None,
            debut_date: i.debut_date,
            height: i.height,
            weight: i.weight,
            thumb_url: None,
        })
        .collect();

    tracing::debug!(
        idols = idols.len(),
        groups = groups.len(),
        "upgraded legacy profiles"
    );
    Ok(Profiles { groups, idols })
}

/// Convert current records to the legacy revision.
///
/// Each idol's `groups` list is rebuilt from memberships and ordered by the
/// group sort key, newest first. `name_alias`, `thumb_url` and `parent_id`
/// have no legacy counterpart and are dropped.
#[must_use]
pub fn downgrade(profiles: &Profiles) -> legacy::Profiles {
    let index = ProfileIndex::new(profiles);

    let idols = profiles
        .idols
        .iter()
        .map(|i| {
            let mut groups: Vec<&Group> = index.groups_of(&i.id).iter().map(|(g, _)| *g).collect();
            groups.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
            groups.dedup_by(|a, b| a.id == b.id);
            legacy::Idol {
                id: i.id.clone(),
                name: i.name.clone(),
                name_original: i.name_original.clone(),
                real_name: i.real_name.clone(),
                real_name_original: i.real_name_original.clone(),
                birth_date: i.birth_date.clone(),
                urls: i.urls.clone(),
                debut_date: i.debut_date.clone(),
                height: i.height,
                weight: i.weight,
                groups: groups.iter().map(|g| g.id.clone()).collect(),
            }
        })
        .collect();

    let groups = profiles
        .groups
        .iter()
        .map(|g| legacy::Group {
            id: g.id.clone(),
            name: g.name.clone(),
            name_original: g.name_original.clone(),
            agency_name: g.agency_name.clone(),
            urls: g.urls.clone(),
            debut_date: g.debut_date.clone(),
            disband_date: g.disband_date.clone(),
            members: g
                .members
                .iter()
                .map(|m| legacy::GroupMember {
                    id: m.idol_id.clone(),
                    current: m.current,
                    roles: m.roles.clone(),
                })
                .collect(),
        })
        .collect();

    legacy::Profiles { groups, idols }
}

fn check_membership_agreement(profiles: &legacy::Profiles) -> Result<(), SchemaError> {
    let groups: HashMap<&str, &legacy::Group> =
        profiles.groups.iter().map(|g| (g.id.as_str(), g)).collect();
    let idol_ids: HashSet<&str> = profiles.idols.iter().map(|i| i.id.as_str()).collect();
    let mut listed: HashSet<(&str, &str)> = HashSet::new();

    for idol in &profiles.idols {
        for group_id in &idol.groups {
            let inconsistent = |reason: &str| SchemaError::InconsistentMembership {
                idol_id: idol.id.clone(),
                group_id: group_id.clone(),
                reason: reason.to_string(),
            };
            if !listed.insert((idol.id.as_str(), group_id.as_str())) {
                return Err(inconsistent("idol lists the group more than once"));
            }
            match groups.get(group_id.as_str()) {
                None => return Err(inconsistent("group does not exist")),
                Some(group) if !group.members.iter().any(|m| m.id == idol.id) => {
                    return Err(inconsistent("idol lists the group but is not one of its members"));
                }
                Some(_) => {}
            }
        }
    }

    for group in &profiles.groups {
        for member in &group.members {
            let known = idol_ids.contains(member.id.as_str());
            if known && !listed.contains(&(member.id.as_str(), group.id.as_str())) {
                return Err(SchemaError::InconsistentMembership {
                    idol_id: member.id.clone(),
                    group_id: group.id.clone(),
                    reason: "group lists the idol but the idol does not list the group".to_string(),
                });
            }
        }
    }

    Ok(())
}
