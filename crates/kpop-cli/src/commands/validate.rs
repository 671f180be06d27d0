use anyhow::{Context, bail};
use kpop_config::KpopConfig;
use kpop_core::responses::ValidateResponse;
use kpop_schema::{SchemaError, load_value, migrate};
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::commands::shared::{read_json, validator_options};
use crate::output::output;

/// Handle `kpopnet validate`.
pub fn handle(args: &ValidateArgs, config: &KpopConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let value = read_json(&args.file)?;
    let mut options = validator_options(&config.validate);
    options.check_urls |= args.check_urls;

    let revision = migrate::detect_revision(&value)
        .with_context(|| format!("{} is not a profiles dump", args.file.display()))?;

    match load_value(&value, options) {
        Ok(loaded) => {
            if flags.quiet {
                return Ok(());
            }
            output(
                &ValidateResponse {
                    revision,
                    valid: true,
                    idols: loaded.profiles.idols.len(),
                    groups: loaded.profiles.groups.len(),
                    memberships: loaded.profiles.membership_count(),
                    issues: Vec::new(),
                },
                flags.format,
            )
        }
        Err(SchemaError::Invalid(failure)) => {
            let (idols, groups, memberships) = raw_counts(&value);
            let issues: Vec<String> = failure.issues.iter().map(ToString::to_string).collect();
            let count = issues.len();
            output(
                &ValidateResponse {
                    revision,
                    valid: false,
                    idols,
                    groups,
                    memberships,
                    issues,
                },
                flags.format,
            )?;
            bail!("{} has {count} validation issue(s)", args.file.display())
        }
        Err(other) => Err(other).with_context(|| format!("failed to load {}", args.file.display())),
    }
}

/// Record counts read straight off the JSON, for dumps that did not load.
fn raw_counts(value: &Value) -> (usize, usize, usize) {
    let len = |key: &str| value.get(key).and_then(Value::as_array).map_or(0, Vec::len);
    let memberships = value
        .get("groups")
        .and_then(Value::as_array)
        .map_or(0, |groups| {
            groups
                .iter()
                .filter_map(|g| g.get("members")?.as_array())
                .map(Vec::len)
                .sum()
        });
    (len("idols"), len("groups"), memberships)
}
