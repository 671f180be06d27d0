use std::path::{Path, PathBuf};

use anyhow::Context;
use kpop_config::KpopConfig;
use kpop_core::responses::PublishResponse;
use kpop_publish::{Drafts, ExportTarget, Overrides, PublishOptions, publish, write_files};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PublishArgs;
use crate::commands::shared::{read_json, validator_options};
use crate::output::output;

/// Handle `kpopnet publish`.
pub fn handle(args: &PublishArgs, config: &KpopConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let drafts: Drafts = serde_json::from_value(read_json(&args.drafts)?)
        .with_context(|| format!("{} is not a drafts document", args.drafts.display()))?;

    // An explicit overrides file must exist; the configured one is optional.
    let overrides = match &args.overrides {
        Some(path) => Overrides::from_path(path),
        None => Overrides::from_path_if_exists(Path::new(&config.publish.overrides_path)),
    }
    .context("failed to load overrides")?;

    let options = PublishOptions {
        site_base_url: config.publish.site_base_url.clone(),
        validator: validator_options(&config.validate),
    };
    let profiles = publish(drafts, &overrides, &options).context("publishing failed")?;

    let target = ExportTarget {
        out_dir: args
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.publish.out_dir)),
        json_file_name: config.publish.json_file_name.clone(),
        min_json_file_name: config.publish.min_json_file_name.clone(),
    };
    let (json_path, min_json_path) = write_files(&profiles, &target)?;

    if flags.quiet {
        return Ok(());
    }
    output(
        &PublishResponse {
            idols: profiles.idols.len(),
            groups: profiles.groups.len(),
            memberships: profiles.membership_count(),
            json_path: json_path.display().to_string(),
            min_json_path: min_json_path.display().to_string(),
        },
        flags.format,
    )
}
