//! Central schema registry for all kpopnet types.
//!
//! The `SchemaRegistry` builds JSON Schemas from kpop-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of all JSON Schemas in the kpopnet system.
///
/// Built from kpop-core types via [`schemars::schema_for!`]. Provides lookup
/// by name and validation of arbitrary JSON values against registered schemas.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a new registry containing the record schemas of both revisions
    /// and the CLI response schemas.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema. This is not expected in practice because `schemars` always
    /// produces valid JSON-serialisable output.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Current revision (4) ---
        register!(schemas, "idol", kpop_core::entities::Idol);
        register!(schemas, "group", kpop_core::entities::Group);
        register!(schemas, "group_member", kpop_core::entities::GroupMember);
        register!(schemas, "profiles", kpop_core::entities::Profiles);

        // --- Legacy revision (4) ---
        register!(schemas, "legacy_idol", kpop_core::legacy::Idol);
        register!(schemas, "legacy_group", kpop_core::legacy::Group);
        register!(
            schemas,
            "legacy_group_member",
            kpop_core::legacy::GroupMember
        );
        register!(schemas, "legacy_profiles", kpop_core::legacy::Profiles);

        // --- CLI response types (4) ---
        register!(
            schemas,
            "validate_response",
            kpop_core::responses::ValidateResponse
        );
        register!(
            schemas,
            "migrate_response",
            kpop_core::responses::MigrateResponse
        );
        register!(
            schemas,
            "publish_response",
            kpop_core::responses::PublishResponse
        );
        register!(schemas, "show_response", kpop_core::responses::ShowResponse);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
