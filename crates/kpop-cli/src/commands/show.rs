use anyhow::{Context, bail};
use kpop_config::KpopConfig;
use kpop_core::enums::EntityKind;
use kpop_core::index::ProfileIndex;
use kpop_core::responses::{
    GroupDetail, GroupRef, IdolDetail, IdolMembership, MemberDetail, ShowResponse,
};
use kpop_schema::load_value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ShowArgs;
use crate::commands::shared::{read_json, validator_options};
use crate::output::output;

/// Handle `kpopnet show`.
pub fn handle(args: &ShowArgs, config: &KpopConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let value = read_json(&args.file)?;
    let loaded = load_value(&value, validator_options(&config.validate))
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let index = ProfileIndex::new(&loaded.profiles);

    let Some(response) = describe(&index, &args.id)? else {
        bail!("no idol or group with id '{}' in {}", args.id, args.file.display());
    };
    output(&response, flags.format)
}

/// Resolve an id to its record and relations. `None` if nothing has that id.
fn describe(index: &ProfileIndex<'_>, id: &str) -> anyhow::Result<Option<ShowResponse>> {
    let response = match index.kind_of(id) {
        None => return Ok(None),
        Some(EntityKind::Idol) => {
            let idol = index.require_idol(id)?;
            let groups = index
                .groups_of(id)
                .iter()
                .map(|(group, member)| IdolMembership {
                    group: GroupRef::from(*group),
                    current: member.current,
                    roles: member.roles.clone(),
                })
                .collect();
            ShowResponse::Idol(IdolDetail {
                idol: idol.clone(),
                groups,
            })
        }
        Some(EntityKind::Group) => {
            let group = index.require_group(id)?;
            let members = index
                .members_of(id)
                .into_iter()
                .map(|(member, idol)| MemberDetail {
                    idol_id: member.idol_id.clone(),
                    name: idol.map(|i| i.name.clone()),
                    current: member.current,
                    roles: member.roles.clone(),
                })
                .collect();
            ShowResponse::Group(GroupDetail {
                group: group.clone(),
                members,
                parent: index.parent(id).map(GroupRef::from),
                subunits: index.subunits(id).iter().map(|g| GroupRef::from(*g)).collect(),
            })
        }
    };
    Ok(Some(response))
}

#[cfg(test)]
mod tests {
    use kpop_core::entities::Profiles;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn profiles() -> Profiles {
        serde_json::from_value(json!({
            "groups": [
                {
                    "id": "g2", "name": "Sub", "name_original": "Sub", "agency_name": "A",
                    "urls": [], "name_alias": null, "debut_date": null, "disband_date": null,
                    "thumb_url": null, "parent_id": "g1",
                    "members": [{"idol_id": "i1", "current": true, "roles": null}]
                },
                {
                    "id": "g1", "name": "Main", "name_original": "Main", "agency_name": "A",
                    "urls": [], "name_alias": null, "debut_date": null, "disband_date": null,
                    "thumb_url": null, "parent_id": null,
                    "members": [{"idol_id": "i1", "current": false, "roles": "leader"}]
                }
            ],
            "idols": [{
                "id": "i1", "name": "Y", "name_original": "Y", "real_name": "Z",
                "real_name_original": "Z", "birth_date": "2000-01-01", "urls": [],
                "name_alias": null, "debut_date": null, "height": null, "weight": null,
                "thumb_url": null
            }]
        }))
        .unwrap()
    }

    #[test]
    fn describes_idol_with_groups() {
        let profiles = profiles();
        let index = ProfileIndex::new(&profiles);
        let Some(ShowResponse::Idol(detail)) = describe(&index, "i1").unwrap() else {
            panic!("expected idol");
        };
        let names: Vec<&str> = detail.groups.iter().map(|m| m.group.name.as_str()).collect();
        assert_eq!(names, ["Sub", "Main"]);
        assert_eq!(detail.groups[1].roles.as_deref(), Some("leader"));
    }

    #[test]
    fn describes_group_with_relations() {
        let profiles = profiles();
        let index = ProfileIndex::new(&profiles);
        let Some(ShowResponse::Group(detail)) = describe(&index, "g1").unwrap() else {
            panic!("expected group");
        };
        assert_eq!(detail.parent, None);
        assert_eq!(
            detail.subunits,
            vec![GroupRef {
                id: "g2".into(),
                name: "Sub".into()
            }]
        );
        assert_eq!(detail.members[0].name.as_deref(), Some("Y"));

        let Some(ShowResponse::Group(sub)) = describe(&index, "g2").unwrap() else {
            panic!("expected group");
        };
        assert_eq!(sub.parent.map(|p| p.id), Some("g1".to_string()));
    }

    #[test]
    fn unknown_id_is_none() {
        let profiles = profiles();
        let index = ProfileIndex::new(&profiles);
        assert!(describe(&index, "zzz").unwrap().is_none());
    }
}
