//! # tnf-config
//!
//! Layered configuration loading for TrackNFix using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TNF_*` prefix, `__` as separator)
//! 2. Project-level `.tracknfix/config.toml`
//! 3. User-level `~/.config/tracknfix/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TNF_BACKEND__BASE_URL` -> `backend.base_url`,
//! `TNF_FIELDS__ID` -> `fields.id`, and so on.
//!
//! # Usage
//!
//! ```no_run
//! use tnf_config::TnfConfig;
//!
//! let config = TnfConfig::load_with_dotenv().expect("config");
//! println!("rows endpoint: {}", config.backend.rows_url());
//! ```

mod backend;
mod error;
mod general;

pub use backend::BackendConfig;
pub use error::ConfigError;
pub use general::{GeneralConfig, TimezoneSetting};
pub use tnf_core::fields::FieldNames;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TnfConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub fields: FieldNames,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TnfConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".tracknfix/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TNF_").split("__"))
    }

    /// Reject values that would only fail later at request time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend.validate()?;
        for (key, name) in self.fields.entries() {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("fields.{key}"),
                    reason: "field name must not be empty".into(),
                });
            }
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tracknfix").join("config.toml"))
    }
}
