use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single performer.
///
/// Group membership is not stored here; it is owned by [`Group::members`]
/// and resolved through [`crate::index::ProfileIndex::groups_of`].
///
/// [`Group::members`]: crate::entities::Group::members
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Idol {
    // required
    pub id: String,
    pub name: String,
    pub name_original: String,
    pub real_name: String,
    pub real_name_original: String,
    /// Full calendar date, `YYYY-MM-DD`.
    pub birth_date: String,
    pub urls: Vec<String>,
    // optional
    pub name_alias: Option<String>,
    /// Partial date, `00` for an unknown month or day.
    pub debut_date: Option<String>,
    /// Centimeters.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub thumb_url: Option<String>,
}

impl Idol {
    /// Sort key: birth date then real name. Dumps list idols by this key,
    /// youngest first.
    #[must_use]
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.birth_date, &self.real_name)
    }
}
