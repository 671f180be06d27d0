use anyhow::Context;
use kpop_config::KpopConfig;
use kpop_core::enums::SchemaRevision;
use kpop_core::responses::MigrateResponse;
use kpop_publish::render_pretty;
use kpop_schema::{load_value, migrate};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MigrateArgs;
use crate::commands::shared::{parse_enum, read_json, validator_options};
use crate::output::output;

/// Handle `kpopnet migrate`.
///
/// Without `--output` the converted dump goes to stdout; with it, the dump is
/// written to that path and a summary is printed instead.
pub fn handle(args: &MigrateArgs, config: &KpopConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let to: SchemaRevision = parse_enum(&args.to, "target revision")?;
    let value = read_json(&args.file)?;
    let loaded = load_value(&value, validator_options(&config.validate))
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    let rendered = match to {
        SchemaRevision::Current => render_pretty(&loaded.profiles)?,
        SchemaRevision::Legacy => render_pretty(&migrate::downgrade(&loaded.profiles))?,
    };
    tracing::debug!(from = %loaded.revision, %to, "migrated dump");

    let Some(path) = &args.output else {
        println!("{rendered}");
        return Ok(());
    };
    std::fs::write(path, &rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if flags.quiet {
        return Ok(());
    }
    output(
        &MigrateResponse {
            from: loaded.revision,
            to,
            idols: loaded.profiles.idols.len(),
            groups: loaded.profiles.groups.len(),
            output: Some(path.display().to_string()),
        },
        flags.format,
    )
}
