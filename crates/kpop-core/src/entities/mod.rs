//! Record structs for the current schema revision.
//!
//! These shapes are the wire contract of `kpopnet.json`: field names are
//! stable, optional fields serialize as `null` and required fields are always
//! present. All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! JSON roundtrip and schema validation.

mod group;
mod idol;
mod profiles;

pub use group::{Group, GroupMember};
pub use idol::Idol;
pub use profiles::Profiles;
