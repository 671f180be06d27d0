//! Manual corrections applied to drafts before normalization.
//!
//! An overrides document has the shape
//! `{"idols": [{"match": {...}, "update": {...}}], "groups": [...]}`. For each
//! draft the first override whose every `match` entry equals the draft's
//! field has its `update` merged in; later overrides are not consulted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PublishError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Override {
    #[serde(rename = "match")]
    pub criteria: Map<String, Value>,
    pub update: Map<String, Value>,
}

impl Override {
    /// Every `match` key is present in `draft` with an equal value.
    ///
    /// An override with an empty `match` applies to every draft.
    #[must_use]
    pub fn matches(&self, draft: &Map<String, Value>) -> bool {
        self.criteria.iter().all(|(k, v)| draft.get(k) == Some(v))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overrides {
    #[serde(default)]
    pub idols: Vec<Override>,
    #[serde(default)]
    pub groups: Vec<Override>,
}

impl Overrides {
    /// Read an overrides file.
    ///
    /// # Errors
    ///
    /// `PublishError::Io` if the file cannot be read, `PublishError::Json`
    /// if it is not an overrides document.
    pub fn from_path(path: &Path) -> Result<Self, PublishError> {
        let text = std::fs::read_to_string(path).map_err(|e| PublishError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Like [`Self::from_path`], but a missing file means no overrides.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_path`] for any failure other than the file not
    /// existing.
    pub fn from_path_if_exists(path: &Path) -> Result<Self, PublishError> {
        if path.exists() {
            Self::from_path(path)
        } else {
            tracing::debug!(path = %path.display(), "no overrides file");
            Ok(Self::default())
        }
    }
}

/// Merge the first matching override into `draft`. Returns whether one
/// applied.
pub fn apply_first(draft: &mut Map<String, Value>, overrides: &[Override]) -> bool {
    let Some(found) = overrides.iter().find(|o| o.matches(draft)) else {
        return false;
    };
    for (k, v) in &found.update {
        draft.insert(k.clone(), v.clone());
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            other => panic!("not an object: {other}"),
        }
    }

    fn ov(criteria: Value, update: Value) -> Override {
        Override {
            criteria: map(criteria),
            update: map(update),
        }
    }

    #[test]
    fn first_match_wins() {
        let mut draft = map(json!({"name": "Boram", "agency_name": "MBK"}));
        let overrides = [
            ov(json!({"name": "Other"}), json!({"agency_name": "X"})),
            ov(json!({"name": "Boram"}), json!({"agency_name": "Y"})),
            ov(json!({"name": "Boram"}), json!({"agency_name": "Z"})),
        ];
        assert!(apply_first(&mut draft, &overrides));
        assert_eq!(draft["agency_name"], json!("Y"));
    }

    #[test]
    fn all_match_keys_must_agree() {
        let mut draft = map(json!({"name": "Boram", "birth_date": "1986-03-22"}));
        let overrides = [ov(
            json!({"name": "Boram", "birth_date": "1990-01-01"}),
            json!({"name": "Changed"}),
        )];
        assert!(!apply_first(&mut draft, &overrides));
        assert_eq!(draft["name"], json!("Boram"));
    }

    #[test]
    fn missing_match_key_does_not_match() {
        let mut draft = map(json!({"name": "Boram"}));
        let overrides = [ov(json!({"debut_date": null}), json!({"name": "X"}))];
        assert!(!apply_first(&mut draft, &overrides));
    }

    #[test]
    fn update_can_add_fields() {
        let mut draft = map(json!({"name": "Boram"}));
        let overrides = [ov(json!({"name": "Boram"}), json!({"name_alias": "Jeon Boram"}))];
        assert!(apply_first(&mut draft, &overrides));
        assert_eq!(draft["name_alias"], json!("Jeon Boram"));
    }

    #[test]
    fn document_shape() {
        let parsed: Overrides = serde_json::from_value(json!({
            "idols": [{"match": {"name": "A"}, "update": {"name": "B"}}]
        }))
        .unwrap();
        assert_eq!(parsed.idols.len(), 1);
        assert!(parsed.groups.is_empty());
        assert_eq!(parsed.idols[0].criteria["name"], json!("A"));
    }

    #[test]
    fn missing_file_means_no_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let parsed = Overrides::from_path_if_exists(&dir.path().join("nope.json")).unwrap();
        assert_eq!(parsed, Overrides::default());
    }
}
