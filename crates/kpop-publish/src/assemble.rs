//! Membership linking and ordering.

use std::collections::HashMap;

use kpop_core::entities::{GroupMember, Profiles};

use crate::draft::{NormalizedGroup, NormalizedIdol};
use crate::error::PublishError;

/// Build a snapshot from normalized drafts.
///
/// Idols are ordered by birth date then real name and groups by debut date
/// then name, both newest first. Each idol's group links become member
/// entries on the named group, in idol order; parent names become
/// `parent_id`.
///
/// # Errors
///
/// `DuplicateGroupName` if two groups share a name, `UnknownGroup` if a
/// link or parent names no group.
pub fn assemble(
    mut idols: Vec<NormalizedIdol>,
    mut groups: Vec<NormalizedGroup>,
) -> Result<Profiles, PublishError> {
    idols.sort_by(|a, b| b.idol.sort_key().cmp(&a.idol.sort_key()));
    groups.sort_by(|a, b| b.group.sort_key().cmp(&a.group.sort_key()));

    let mut by_name: HashMap<String, usize> = HashMap::with_capacity(groups.len());
    for (i, g) in groups.iter().enumerate() {
        if by_name.insert(g.group.name.clone(), i).is_some() {
            return Err(PublishError::DuplicateGroupName {
                name: g.group.name.clone(),
            });
        }
    }
    let lookup = |referrer: &str, name: &str| {
        by_name
            .get(name)
            .copied()
            .ok_or_else(|| PublishError::UnknownGroup {
                referrer: referrer.to_string(),
                name: name.to_string(),
            })
    };

    let mut parent_ids = Vec::with_capacity(groups.len());
    for g in &groups {
        let parent_id = match g.parent.as_deref() {
            Some(name) => Some(groups[lookup(&g.group.name, name)?].group.id.clone()),
            None => None,
        };
        parent_ids.push(parent_id);
    }

    let mut members: Vec<Vec<GroupMember>> = vec![Vec::new(); groups.len()];
    for n in &idols {
        for link in &n.links {
            let gi = lookup(&n.idol.name, &link.name)?;
            members[gi].push(GroupMember {
                idol_id: n.idol.id.clone(),
                current: link.current,
                roles: link.roles.clone(),
            });
        }
    }

    let groups = groups
        .into_iter()
        .zip(parent_ids)
        .zip(members)
        .map(|((n, parent_id), members)| {
            let mut group = n.group;
            group.parent_id = parent_id;
            group.members = members;
            group
        })
        .collect();
    let idols = idols.into_iter().map(|n| n.idol).collect();

    Ok(Profiles { groups, idols })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::GroupLink;
    use kpop_core::entities::{Group, Idol};
    use pretty_assertions::assert_eq;

    fn idol(id: &str, birth_date: &str, real_name: &str, links: &[(&str, bool)]) -> NormalizedIdol {
        NormalizedIdol {
            idol: Idol {
                id: id.into(),
                name: id.into(),
                name_original: id.into(),
                real_name: real_name.into(),
                real_name_original: real_name.into(),
                birth_date: birth_date.into(),
                urls: vec![],
                name_alias: None,
                debut_date: None,
                height: None,
                weight: None,
                thumb_url: None,
            },
            links: links
                .iter()
                .map(|(name, current)| GroupLink {
                    name: (*name).into(),
                    current: *current,
                    roles: None,
                })
                .collect(),
        }
    }

    fn group(id: &str, name: &str, debut: Option<&str>, parent: Option<&str>) -> NormalizedGroup {
        NormalizedGroup {
            group: Group {
                id: id.into(),
                name: name.into(),
                name_original: name.into(),
                agency_name: "A".into(),
                urls: vec![],
                name_alias: None,
                debut_date: debut.map(Into::into),
                disband_date: None,
                thumb_url: None,
                parent_id: None,
                members: vec![],
            },
            parent: parent.map(Into::into),
        }
    }

    #[test]
    fn orders_newest_first() {
        let profiles = assemble(
            vec![
                idol("a", "1990-01-01", "A", &[]),
                idol("b", "2000-01-01", "B", &[]),
                idol("c", "2000-01-01", "C", &[]),
            ],
            vec![
                group("g1", "One", Some("2009-07-29"), None),
                group("g2", "Two", None, None),
                group("g3", "Three", Some("2012-00-00"), None),
            ],
        )
        .unwrap();
        let idol_ids: Vec<&str> = profiles.idols.iter().map(|i| i.id.as_str()).collect();
        let group_ids: Vec<&str> = profiles.groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(idol_ids, ["c", "b", "a"]);
        assert_eq!(group_ids, ["g3", "g1", "g2"]);
    }

    #[test]
    fn links_become_members_in_idol_order() {
        let profiles = assemble(
            vec![
                idol("old", "1990-01-01", "Old", &[("One", false)]),
                idol("new", "2000-01-01", "New", &[("One", true), ("Sub", true)]),
            ],
            vec![
                group("g1", "One", Some("2009-07-29"), None),
                group("g2", "Sub", Some("2011-00-00"), Some("One")),
            ],
        )
        .unwrap();
        let one = profiles.groups.iter().find(|g| g.id == "g1").unwrap();
        let sub = profiles.groups.iter().find(|g| g.id == "g2").unwrap();
        assert_eq!(
            one.members,
            vec![
                GroupMember {
                    idol_id: "new".into(),
                    current: true,
                    roles: None
                },
                GroupMember {
                    idol_id: "old".into(),
                    current: false,
                    roles: None
                },
            ]
        );
        assert_eq!(sub.members.len(), 1);
        assert_eq!(sub.parent_id.as_deref(), Some("g1"));
        assert_eq!(one.parent_id, None);
    }

    #[test]
    fn unknown_group_link() {
        let err = assemble(
            vec![idol("a", "1990-01-01", "A", &[("Nope", true)])],
            vec![group("g1", "One", None, None)],
        )
        .unwrap_err();
        assert!(matches!(err, PublishError::UnknownGroup { ref name, .. } if name == "Nope"));
    }

    #[test]
    fn unknown_parent() {
        let err = assemble(vec![], vec![group("g1", "One", None, Some("Gone"))]).unwrap_err();
        assert!(matches!(err, PublishError::UnknownGroup { ref referrer, .. } if referrer == "One"));
    }

    #[test]
    fn duplicate_group_names() {
        let err = assemble(
            vec![],
            vec![group("g1", "One", None, None), group("g2", "One", None, None)],
        )
        .unwrap_err();
        assert!(matches!(err, PublishError::DuplicateGroupName { .. }));
    }
}
