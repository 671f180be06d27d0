use std::path::Path;

use anyhow::Context;
use kpop_config::ValidateConfig;
use kpop_schema::ValidatorOptions;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a `snake_case` enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

pub const fn validator_options(config: &ValidateConfig) -> ValidatorOptions {
    ValidatorOptions {
        deny_unknown_fields: config.deny_unknown_fields,
        check_formats: config.check_formats,
        check_urls: config.check_urls,
    }
}
