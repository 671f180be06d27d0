use kpop_config::KpopConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod migrate;
pub mod publish;
pub mod schema;
pub mod shared;
pub mod show;
pub mod validate;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &KpopConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Validate(args) => validate::handle(&args, config, flags),
        Commands::Migrate(args) => migrate::handle(&args, config, flags),
        Commands::Publish(args) => publish::handle(&args, config, flags),
        Commands::Show(args) => show::handle(&args, config, flags),
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}
