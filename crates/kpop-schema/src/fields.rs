//! Field tables for every record shape of both schema revisions.
//!
//! The validator walks raw JSON against these tables before anything is
//! decoded into typed records, which is what lets it report every missing or
//! mistyped field at once instead of stopping at the first serde error.

use kpop_core::enums::SchemaRevision;

/// What a field must hold.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Any string.
    Text,
    /// String id; may be checked against another collection later.
    Id,
    /// `YYYY-MM-DD`, month and day known.
    FullDate,
    /// `YYYY-MM-DD`, `00` for an unknown month or day.
    PartialDate,
    /// A single url string.
    Url,
    Number,
    Bool,
    /// Array of url strings.
    Urls,
    /// Array of id strings.
    IdList,
    /// Array of nested records.
    Records(&'static RecordSpec),
}

impl FieldKind {
    /// JSON type name used in mismatch reports.
    #[must_use]
    pub const fn expected(self) -> &'static str {
        match self {
            Self::Text | Self::Id | Self::FullDate | Self::PartialDate | Self::Url => "string",
            Self::Number => "number",
            Self::Bool => "boolean",
            Self::Urls | Self::IdList | Self::Records(_) => "array",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// The fields of one record shape.
#[derive(Debug)]
pub struct RecordSpec {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSpec {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Record shapes for `(idol, group)` in a revision. Member shapes hang off
    /// the group's `members` field.
    #[must_use]
    pub fn for_revision(revision: SchemaRevision) -> (&'static Self, &'static Self) {
        match revision {
            SchemaRevision::Current => (&IDOL, &GROUP),
            SchemaRevision::Legacy => (&LEGACY_IDOL, &LEGACY_GROUP),
        }
    }
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: false,
    }
}

pub static IDOL: RecordSpec = RecordSpec {
    name: "idol",
    fields: &[
        required("id", FieldKind::Id),
        required("name", FieldKind::Text),
        required("name_original", FieldKind::Text),
        required("real_name", FieldKind::Text),
        required("real_name_original", FieldKind::Text),
        required("birth_date", FieldKind::FullDate),
        required("urls", FieldKind::Urls),
        optional("name_alias", FieldKind::Text),
        optional("debut_date", FieldKind::PartialDate),
        optional("height", FieldKind::Number),
        optional("weight", FieldKind::Number),
        optional("thumb_url", FieldKind::Url),
    ],
};

pub static GROUP_MEMBER: RecordSpec = RecordSpec {
    name: "group_member",
    fields: &[
        required("idol_id", FieldKind::Id),
        required("current", FieldKind::Bool),
        optional("roles", FieldKind::Text),
    ],
};

pub static GROUP: RecordSpec = RecordSpec {
    name: "group",
    fields: &[
        required("id", FieldKind::Id),
        required("name", FieldKind::Text),
        required("name_original", FieldKind::Text),
        required("agency_name", FieldKind::Text),
        required("urls", FieldKind::Urls),
        optional("name_alias", FieldKind::Text),
        optional("debut_date", FieldKind::PartialDate),
        optional("disband_date", FieldKind::PartialDate),
        optional("thumb_url", FieldKind::Url),
        optional("parent_id", FieldKind::Id),
        required("members", FieldKind::Records(&GROUP_MEMBER)),
    ],
};

pub static LEGACY_IDOL: RecordSpec = RecordSpec {
    name: "legacy_idol",
    fields: &[
        required("id", FieldKind::Id),
        required("name", FieldKind::Text),
        required("name_original", FieldKind::Text),
        required("real_name", FieldKind::Text),
        required("real_name_original", FieldKind::Text),
        required("birth_date", FieldKind::FullDate),
        required("urls", FieldKind::Urls),
        optional("debut_date", FieldKind::PartialDate),
        optional("height", FieldKind::Number),
        optional("weight", FieldKind::Number),
        required("groups", FieldKind::IdList),
    ],
};

pub static LEGACY_GROUP_MEMBER: RecordSpec = RecordSpec {
    name: "legacy_group_member",
    fields: &[
        required("id", FieldKind::Id),
        required("current", FieldKind::Bool),
        optional("roles", FieldKind::Text),
    ],
};

pub static LEGACY_GROUP: RecordSpec = RecordSpec {
    name: "legacy_group",
    fields: &[
        required("id", FieldKind::Id),
        required("name", FieldKind::Text),
        required("name_original", FieldKind::Text),
        required("agency_name", FieldKind::Text),
        required("urls", FieldKind::Urls),
        optional("debut_date", FieldKind::PartialDate),
        optional("disband_date", FieldKind::PartialDate),
        required("members", FieldKind::Records(&LEGACY_GROUP_MEMBER)),
    ],
};
