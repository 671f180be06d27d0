//! # kpop-config
//!
//! Layered configuration loading for kpopnet using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KPOPNET_*` prefix, `__` as separator)
//! 2. Project-level `./kpopnet.toml`
//! 3. User-level `~/.config/kpopnet/config.toml`
//! 4. Built-in defaults
//!
//! `KPOPNET_PUBLISH__OUT_DIR` maps to `publish.out_dir`,
//! `KPOPNET_VALIDATE__CHECK_URLS` to `validate.check_urls`.
//!
//! ```no_run
//! use kpop_config::KpopConfig;
//!
//! let config = KpopConfig::load_with_dotenv().expect("config");
//! println!("publishing to {}", config.publish.json_path().display());
//! ```

mod error;
mod publish;
mod validate;

pub use error::ConfigError;
pub use publish::PublishConfig;
pub use validate::ValidateConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the project-level config, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "kpopnet.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "KPOPNET_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KpopConfig {
    #[serde(default)]
    pub validate: ValidateConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

impl KpopConfig {
    /// Load configuration from TOML files and environment variables, then
    /// check the values.
    ///
    /// Does not read `.env`; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be read or a value
    /// has the wrong type, `ConfigError::InvalidValue` if a value is
    /// rejected.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and check a config from any figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.publish.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kpopnet").join("config.toml"))
    }
}
