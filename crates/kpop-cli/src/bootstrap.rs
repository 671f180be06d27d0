use std::path::Path;

use anyhow::Context;
use kpop_config::KpopConfig;

/// Load `./.env` if present, then the layered config.
pub fn load_config() -> anyhow::Result<KpopConfig> {
    let env_path = Path::new(".env");
    if env_path.exists() {
        dotenvy::from_path(env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    let config = KpopConfig::load()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
