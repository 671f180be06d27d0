//! # kpop-publish
//!
//! Turns collected drafts into the published `kpopnet.json` files.
//!
//! Pipeline, in order:
//! 1. apply the first matching override to each draft
//! 2. normalize: required fields, dates, ids, profile url first
//! 3. link idols to groups by name and resolve sub-unit parents
//! 4. order idols and groups newest first
//! 5. validate the result like any loaded dump
//! 6. export pretty and compact JSON
//!
//! Steps 1 to 5 are [`publish`]; step 6 is [`export::write_files`].

pub mod assemble;
pub mod draft;
pub mod error;
pub mod export;
pub mod overrides;

pub use error::PublishError;
pub use export::{ExportTarget, render_min, render_pretty, write_files};
pub use kpop_core::dates::extract_date as parse_date;
pub use overrides::{Override, Overrides};

use kpop_core::entities::Profiles;
use kpop_schema::{Validator, ValidatorOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default site serving profile pages.
pub const DEFAULT_SITE_BASE_URL: &str = "https://net.kpop.re";

/// Raw draft records, as read from a drafts file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drafts {
    #[serde(default)]
    pub groups: Vec<Map<String, Value>>,
    #[serde(default)]
    pub idols: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOptions {
    /// Base of the profile url put first in every record's `urls`.
    pub site_base_url: String,
    /// Checks the assembled snapshot must pass.
    pub validator: ValidatorOptions,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            site_base_url: DEFAULT_SITE_BASE_URL.to_string(),
            validator: ValidatorOptions::default(),
        }
    }
}

/// Normalize, link, order and validate drafts into a snapshot.
///
/// # Errors
///
/// The first draft problem found (`MissingField`, `InvalidDraft`,
/// `InvalidDate`), a linking problem (`UnknownGroup`, `DuplicateGroupName`),
/// or `Invalid` with every validation issue of the assembled snapshot, such
/// as two idols whose ids collide.
pub fn publish(
    drafts: Drafts,
    overrides: &Overrides,
    options: &PublishOptions,
) -> Result<Profiles, PublishError> {
    tracing::debug!(
        idols = drafts.idols.len(),
        groups = drafts.groups.len(),
        "normalizing drafts"
    );
    let idols = drafts
        .idols
        .into_iter()
        .enumerate()
        .map(|(i, d)| draft::normalize_idol(d, i, &overrides.idols, &options.site_base_url))
        .collect::<Result<Vec<_>, _>>()?;
    let groups = drafts
        .groups
        .into_iter()
        .enumerate()
        .map(|(i, d)| draft::normalize_group(d, i, &overrides.groups, &options.site_base_url))
        .collect::<Result<Vec<_>, _>>()?;

    let assembled = assemble::assemble(idols, groups)?;
    tracing::debug!(
        memberships = assembled.membership_count(),
        "linked memberships"
    );

    let value = serde_json::to_value(&assembled)?;
    let profiles = Validator::new(options.validator).validate(&value)?;
    Ok(profiles)
}
