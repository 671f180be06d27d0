//! Draft records and their normalization into published records.
//!
//! Drafts are what a collector produces: records without ids, dates possibly
//! embedded in free text, and group membership expressed on the idol side as
//! links by group name. Normalization reads dates, applies overrides, checks
//! required fields, generates the id and puts the profile url first.
//!
//! Dates are read before overrides are matched, so `match` keys compare
//! against wire dates rather than the collector's free text.

use kpop_core::dates::extract_date;
use kpop_core::entities::{Group, Idol};
use kpop_core::enums::EntityKind;
use kpop_core::errors::CoreError;
use kpop_core::ids;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PublishError;
use crate::overrides::{self, Override};

const IDOL_REQUIRED: [&str; 6] = [
    "name",
    "name_original",
    "real_name",
    "real_name_original",
    "birth_date",
    "urls",
];

const GROUP_REQUIRED: [&str; 4] = ["name", "name_original", "agency_name", "urls"];

/// Date fields and whether each must be a full date.
const IDOL_DATES: [(&str, bool); 2] = [("birth_date", true), ("debut_date", false)];
const GROUP_DATES: [(&str, bool); 2] = [("debut_date", false), ("disband_date", false)];

/// Membership of a draft idol, naming the group by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupLink {
    pub name: String,
    pub current: bool,
    #[serde(default)]
    pub roles: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IdolDraft {
    name: String,
    name_original: String,
    real_name: String,
    real_name_original: String,
    birth_date: String,
    urls: Vec<String>,
    name_alias: Option<String>,
    debut_date: Option<String>,
    height: Option<f64>,
    weight: Option<f64>,
    thumb_url: Option<String>,
    #[serde(default)]
    groups: Vec<GroupLink>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupDraft {
    name: String,
    name_original: String,
    agency_name: String,
    urls: Vec<String>,
    name_alias: Option<String>,
    debut_date: Option<String>,
    disband_date: Option<String>,
    thumb_url: Option<String>,
    /// Display name of the parent group, for sub-units.
    parent: Option<String>,
}

/// A published idol plus the group links still to be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIdol {
    pub idol: Idol,
    pub links: Vec<GroupLink>,
}

/// A published group (members still empty) plus its parent's name.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGroup {
    pub group: Group,
    pub parent: Option<String>,
}

/// Turn an idol draft into an idol record.
///
/// `index` is the draft's position, used in error messages.
///
/// # Errors
///
/// `MissingField` for an absent or empty required field, `InvalidDraft` for
/// a mistyped or unknown field, `InvalidDate` for an unreadable date.
pub fn normalize_idol(
    mut draft: Map<String, Value>,
    index: usize,
    overrides: &[Override],
    site_base_url: &str,
) -> Result<NormalizedIdol, PublishError> {
    let kind = EntityKind::Idol;
    read_draft_dates(&mut draft, &IDOL_DATES, kind, index)?;
    if overrides::apply_first(&mut draft, overrides) {
        tracing::debug!(index, "override applied to idol draft");
    }
    require(&draft, &IDOL_REQUIRED, kind, index)?;
    let d: IdolDraft = decode(draft, kind, index)?;

    let birth_date = read_date(&d.birth_date, true, kind, index, "birth_date")?;
    let debut_date = d
        .debut_date
        .map(|s| read_date(&s, false, kind, index, "debut_date"))
        .transpose()?;

    let id = ids::idol_id(&d.real_name_original, &birth_date);
    let mut urls = d.urls;
    urls.insert(0, ids::profile_url(site_base_url, &id));

    Ok(NormalizedIdol {
        idol: Idol {
            id,
            name: d.name,
            name_original: d.name_original,
            real_name: d.real_name,
            real_name_original: d.real_name_original,
            birth_date,
            urls,
            name_alias: d.name_alias,
            debut_date,
            height: d.height,
            weight: d.weight,
            thumb_url: d.thumb_url,
        },
        links: d.groups,
    })
}

/// Turn a group draft into a group record with no members yet.
///
/// # Errors
///
/// Same as [`normalize_idol`].
pub fn normalize_group(
    mut draft: Map<String, Value>,
    index: usize,
    overrides: &[Override],
    site_base_url: &str,
) -> Result<NormalizedGroup, PublishError> {
    let kind = EntityKind::Group;
    read_draft_dates(&mut draft, &GROUP_DATES, kind, index)?;
    if overrides::apply_first(&mut draft, overrides) {
        tracing::debug!(index, "override applied to group draft");
    }
    require(&draft, &GROUP_REQUIRED, kind, index)?;
    let d: GroupDraft = decode(draft, kind, index)?;

    let debut_date = d
        .debut_date
        .map(|s| read_date(&s, false, kind, index, "debut_date"))
        .transpose()?;
    let disband_date = d
        .disband_date
        .map(|s| read_date(&s, false, kind, index, "disband_date"))
        .transpose()?;

    let id = ids::group_id(&d.name_original);
    let mut urls = d.urls;
    urls.insert(0, ids::profile_url(site_base_url, &id));

    Ok(NormalizedGroup {
        group: Group {
            id,
            name: d.name,
            name_original: d.name_original,
            agency_name: d.agency_name,
            urls,
            name_alias: d.name_alias,
            debut_date,
            disband_date,
            thumb_url: d.thumb_url,
            parent_id: None,
            members: Vec::new(),
        },
        parent: d.parent,
    })
}

fn require(
    draft: &Map<String, Value>,
    fields: &[&str],
    kind: EntityKind,
    index: usize,
) -> Result<(), PublishError> {
    for field in fields {
        let blank = match draft.get(*field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Array(a)) => a.is_empty(),
            Some(_) => false,
        };
        if blank {
            return Err(PublishError::MissingField {
                kind,
                index,
                field: (*field).to_string(),
            });
        }
    }
    Ok(())
}

fn decode<T: for<'de> Deserialize<'de>>(
    draft: Map<String, Value>,
    kind: EntityKind,
    index: usize,
) -> Result<T, PublishError> {
    serde_json::from_value(Value::Object(draft)).map_err(|e| PublishError::InvalidDraft {
        kind,
        index,
        reason: e.to_string(),
    })
}

/// Rewrite free-text dates in place. Non-string and empty values are left
/// for `require` and `decode` to report.
fn read_draft_dates(
    draft: &mut Map<String, Value>,
    fields: &[(&str, bool)],
    kind: EntityKind,
    index: usize,
) -> Result<(), PublishError> {
    for &(field, full) in fields {
        if let Some(Value::String(raw)) = draft.get_mut(field) {
            if !raw.is_empty() {
                *raw = read_date(raw, full, kind, index, field)?;
            }
        }
    }
    Ok(())
}

fn read_date(
    raw: &str,
    full: bool,
    kind: EntityKind,
    index: usize,
    field: &str,
) -> Result<String, PublishError> {
    extract_date(raw, full).map_err(|e| PublishError::InvalidDate {
        kind,
        index,
        field: field.to_string(),
        reason: match e {
            CoreError::InvalidDate { reason, .. } => reason,
            other => other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    const SITE: &str = "https://net.kpop.re";

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            other => panic!("not an object: {other}"),
        }
    }

    fn boram() -> Map<String, Value> {
        map(json!({
            "name": "Boram",
            "name_original": "보람",
            "real_name": "Jeon Boram",
            "real_name_original": "전보람",
            "birth_date": "1986-03-22 (age 37)",
            "urls": ["https://selca.kastden.org/noona/idol/boram/"],
            "height": 152.8,
            "debut_date": "2008-04-15 (15 years ago)",
            "groups": [{"name": "T-ara", "current": true, "roles": "vocalist"}]
        }))
    }

    fn tara() -> Map<String, Value> {
        map(json!({
            "name": "T-ara",
            "name_original": "티아라",
            "agency_name": "MBK Entertainment",
            "urls": ["https://selca.kastden.org/noona/group/tara/"],
            "debut_date": "2009-07-29 (14 years ago)"
        }))
    }

    #[test]
    fn idol_is_normalized() {
        let n = normalize_idol(boram(), 0, &[], SITE).unwrap();
        assert_eq!(n.idol.id, "qt8x63mMzyiN");
        assert_eq!(n.idol.birth_date, "1986-03-22");
        assert_eq!(n.idol.debut_date.as_deref(), Some("2008-04-15"));
        assert_eq!(
            n.idol.urls,
            vec![
                "https://net.kpop.re/?id=qt8x63mMzyiN".to_string(),
                "https://selca.kastden.org/noona/idol/boram/".to_string(),
            ]
        );
        assert_eq!(n.idol.height, Some(152.8));
        assert_eq!(n.idol.weight, None);
        assert_eq!(n.idol.name_alias, None);
        assert_eq!(
            n.links,
            vec![GroupLink {
                name: "T-ara".into(),
                current: true,
                roles: Some("vocalist".into()),
            }]
        );
    }

    #[test]
    fn group_is_normalized() {
        let n = normalize_group(tara(), 0, &[], SITE).unwrap();
        assert_eq!(n.group.id, "9wq8mpthDFAG");
        assert_eq!(n.group.urls[0], "https://net.kpop.re/?id=9wq8mpthDFAG");
        assert_eq!(n.group.debut_date.as_deref(), Some("2009-07-29"));
        assert_eq!(n.group.disband_date, None);
        assert!(n.group.members.is_empty());
        assert_eq!(n.parent, None);
    }

    #[test]
    fn partial_group_dates_are_padded() {
        let mut draft = tara();
        draft.insert("disband_date".into(), json!("2023"));
        let n = normalize_group(draft, 0, &[], SITE).unwrap();
        assert_eq!(n.group.disband_date.as_deref(), Some("2023-00-00"));
    }

    #[rstest]
    #[case::absent(None)]
    #[case::null(Some(Value::Null))]
    #[case::empty(Some(json!("")))]
    fn required_name_must_be_present(#[case] value: Option<Value>) {
        let mut draft = boram();
        match value {
            Some(v) => draft.insert("real_name".into(), v),
            None => draft.remove("real_name"),
        };
        let err = normalize_idol(draft, 3, &[], SITE).unwrap_err();
        assert!(
            matches!(err, PublishError::MissingField { index: 3, ref field, .. } if field == "real_name"),
            "{err}"
        );
    }

    #[test]
    fn empty_urls_are_missing() {
        let mut draft = tara();
        draft.insert("urls".into(), json!([]));
        let err = normalize_group(draft, 0, &[], SITE).unwrap_err();
        assert!(matches!(err, PublishError::MissingField { ref field, .. } if field == "urls"));
    }

    #[test]
    fn unknown_draft_field_is_rejected() {
        let mut draft = tara();
        draft.insert("fandom".into(), json!("Queen's"));
        let err = normalize_group(draft, 1, &[], SITE).unwrap_err();
        assert!(matches!(err, PublishError::InvalidDraft { index: 1, .. }), "{err}");
    }

    #[test]
    fn birth_date_must_be_full() {
        let mut draft = boram();
        draft.insert("birth_date".into(), json!("1986"));
        let err = normalize_idol(draft, 0, &[], SITE).unwrap_err();
        assert!(matches!(err, PublishError::InvalidDate { ref field, .. } if field == "birth_date"));
    }

    #[test]
    fn override_fills_missing_required_field() {
        let mut draft = tara();
        draft.remove("agency_name");
        let overrides = [Override {
            criteria: map(json!({"name": "T-ara"})),
            update: map(json!({"agency_name": "Dream Star"})),
        }];
        let n = normalize_group(draft, 0, &overrides, SITE).unwrap();
        assert_eq!(n.group.agency_name, "Dream Star");
    }

    #[test]
    fn override_changes_the_id_key() {
        let overrides = [Override {
            criteria: map(json!({"name": "T-ara"})),
            update: map(json!({"name_original": "티아라 (T-ara)"})),
        }];
        let n = normalize_group(tara(), 0, &overrides, SITE).unwrap();
        assert_eq!(n.group.id, ids::group_id("티아라 (T-ara)"));
    }

    #[test]
    fn override_matches_on_read_birth_date() {
        let overrides = [Override {
            criteria: map(json!({"real_name_original": "전보람", "birth_date": "1986-03-22"})),
            update: map(json!({"name_alias": "Jeon Boram"})),
        }];
        let n = normalize_idol(boram(), 0, &overrides, SITE).unwrap();
        assert_eq!(n.idol.name_alias.as_deref(), Some("Jeon Boram"));
    }

    #[test]
    fn override_matches_on_padded_disband_date() {
        let mut draft = tara();
        draft.insert("disband_date".into(), json!("2023 (hiatus)"));
        let overrides = [Override {
            criteria: map(json!({"disband_date": "2023-00-00"})),
            update: map(json!({"name_alias": "Tiara"})),
        }];
        let n = normalize_group(draft, 0, &overrides, SITE).unwrap();
        assert_eq!(n.group.name_alias.as_deref(), Some("Tiara"));
        assert_eq!(n.group.disband_date.as_deref(), Some("2023-00-00"));
    }

    #[test]
    fn unreadable_date_is_reported_before_overrides() {
        let mut draft = tara();
        draft.insert("debut_date".into(), json!("someday"));
        let err = normalize_group(draft, 2, &[], SITE).unwrap_err();
        assert!(
            matches!(err, PublishError::InvalidDate { index: 2, ref field, .. } if field == "debut_date"),
            "{err}"
        );
    }

    #[test]
    fn empty_alias_is_kept() {
        let mut draft = boram();
        draft.insert("name_alias".into(), json!(""));
        let n = normalize_idol(draft, 0, &[], SITE).unwrap();
        assert_eq!(n.idol.name_alias.as_deref(), Some(""));
    }
}
