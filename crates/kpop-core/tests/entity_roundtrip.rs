//! Serde roundtrip and JsonSchema validation tests for all record types.

use kpop_core::entities::*;
use kpop_core::enums::SchemaRevision;
use kpop_core::legacy;
use kpop_core::responses::*;
use pretty_assertions::assert_eq;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn boram() -> Idol {
    Idol {
        id: "qt8x63mMzyiN".into(),
        name: "Boram".into(),
        name_original: "보람".into(),
        real_name: "Jeon Boram".into(),
        real_name_original: "전보람".into(),
        birth_date: "1986-03-22".into(),
        urls: vec![
            "https://net.kpop.re/?id=qt8x63mMzyiN".into(),
            "https://selca.kastden.org/noona/idol/boram/".into(),
        ],
        name_alias: None,
        debut_date: Some("2008-04-15".into()),
        height: Some(152.8),
        weight: Some(40.0),
        thumb_url: Some("https://up.kpop.re/net/ab/cdef.jpg".into()),
    }
}

fn tara() -> Group {
    Group {
        id: "9wq8mpthDFAG".into(),
        name: "T-ara".into(),
        name_original: "티아라".into(),
        agency_name: "MBK Entertainment".into(),
        urls: vec!["https://net.kpop.re/?id=9wq8mpthDFAG".into()],
        name_alias: Some("Tiara".into()),
        debut_date: Some("2009-07-29".into()),
        disband_date: None,
        thumb_url: None,
        parent_id: None,
        members: vec![GroupMember {
            idol_id: "qt8x63mMzyiN".into(),
            current: true,
            roles: Some("vocalist".into()),
        }],
    }
}

roundtrip_and_validate!(idol_roundtrip, Idol, boram());

roundtrip_and_validate!(group_roundtrip, Group, tara());

roundtrip_and_validate!(
    group_member_roundtrip,
    GroupMember,
    GroupMember {
        idol_id: "qt8x63mMzyiN".into(),
        current: false,
        roles: None,
    }
);

roundtrip_and_validate!(
    profiles_roundtrip,
    Profiles,
    Profiles {
        groups: vec![tara()],
        idols: vec![boram()],
    }
);

roundtrip_and_validate!(
    legacy_profiles_roundtrip,
    legacy::Profiles,
    legacy::Profiles {
        groups: vec![legacy::Group {
            id: "9wq8mpthDFAG".into(),
            name: "T-ara".into(),
            name_original: "티아라".into(),
            agency_name: "MBK Entertainment".into(),
            urls: vec![],
            debut_date: Some("2009-07-29".into()),
            disband_date: None,
            members: vec![legacy::GroupMember {
                id: "qt8x63mMzyiN".into(),
                current: true,
                roles: None,
            }],
        }],
        idols: vec![legacy::Idol {
            id: "qt8x63mMzyiN".into(),
            name: "Boram".into(),
            name_original: "보람".into(),
            real_name: "Jeon Boram".into(),
            real_name_original: "전보람".into(),
            birth_date: "1986-03-22".into(),
            urls: vec![],
            debut_date: None,
            height: None,
            weight: None,
            groups: vec!["9wq8mpthDFAG".into()],
        }],
    }
);

roundtrip_and_validate!(
    validate_response_roundtrip,
    ValidateResponse,
    ValidateResponse {
        revision: SchemaRevision::Legacy,
        valid: false,
        idols: 2,
        groups: 1,
        memberships: 3,
        issues: vec!["groups[0].members[1].idol_id: dangling reference".into()],
    }
);

roundtrip_and_validate!(
    show_group_roundtrip,
    ShowResponse,
    ShowResponse::Group(GroupDetail {
        group: tara(),
        members: vec![MemberDetail {
            idol_id: "qt8x63mMzyiN".into(),
            name: Some("Boram".into()),
            current: true,
            roles: Some("vocalist".into()),
        }],
        parent: None,
        subunits: vec![GroupRef {
            id: "sub".into(),
            name: "T-ara N4".into(),
        }],
    })
);

#[test]
fn optional_fields_serialize_as_null() {
    let mut idol = boram();
    idol.debut_date = None;
    idol.height = None;
    let value = serde_json::to_value(&idol).unwrap();
    assert_eq!(value["debut_date"], serde_json::Value::Null);
    assert_eq!(value["height"], serde_json::Value::Null);
    assert_eq!(value["name_alias"], serde_json::Value::Null);
}

#[test]
fn absent_optional_fields_decode_to_none() {
    let json = r#"{"id":"i1","name":"Y","name_original":"Y","real_name":"Z",
        "real_name_original":"Z","birth_date":"2000-01-01","urls":[]}"#;
    let idol: Idol = serde_json::from_str(json).unwrap();
    assert_eq!(idol.debut_date, None);
    assert_eq!(idol.height, None);
    assert_eq!(idol.thumb_url, None);
}

#[test]
fn empty_string_is_not_absent() {
    let json = r#"{"id":"i1","name":"Y","name_original":"Y","real_name":"Z",
        "real_name_original":"Z","birth_date":"2000-01-01","urls":[],"name_alias":""}"#;
    let idol: Idol = serde_json::from_str(json).unwrap();
    assert_eq!(idol.name_alias.as_deref(), Some(""));
}

#[test]
fn show_response_is_tagged_by_kind() {
    let value = serde_json::to_value(ShowResponse::Idol(IdolDetail {
        idol: boram(),
        groups: vec![IdolMembership {
            group: GroupRef::from(&tara()),
            current: true,
            roles: None,
        }],
    }))
    .unwrap();
    assert_eq!(value["kind"], "idol");
    assert_eq!(value["groups"][0]["group"]["name"], "T-ara");
}
