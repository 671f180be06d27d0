use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Check a profiles dump of either revision.
    Validate(ValidateArgs),
    /// Convert a profiles dump between revisions.
    Migrate(MigrateArgs),
    /// Build and write the published dump from drafts.
    Publish(PublishArgs),
    /// Show one idol or group with its relations resolved.
    Show(ShowArgs),
    /// List schema names, or print one JSON Schema.
    Schema(SchemaArgs),
}

/// Arguments for `kpopnet validate`.
#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    pub file: PathBuf,
    /// Also require http(s) urls, whatever the config says.
    #[arg(long)]
    pub check_urls: bool,
}

/// Arguments for `kpopnet migrate`.
#[derive(Clone, Debug, Args)]
pub struct MigrateArgs {
    pub file: PathBuf,
    /// Target revision: current or legacy.
    #[arg(long, default_value = "current")]
    pub to: String,
    /// Write the converted dump here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `kpopnet publish`.
#[derive(Clone, Debug, Args)]
pub struct PublishArgs {
    /// Drafts document: `{"idols": [...], "groups": [...]}`.
    #[arg(long)]
    pub drafts: PathBuf,
    /// Overrides document (defaults to `publish.overrides_path`, if it exists).
    #[arg(long)]
    pub overrides: Option<PathBuf>,
    /// Output directory (defaults to `publish.out_dir`).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for `kpopnet show`.
#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    pub id: String,
    /// Profiles dump to look in.
    #[arg(long)]
    pub file: PathBuf,
}

/// Arguments for `kpopnet schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub name: Option<String>,
}
