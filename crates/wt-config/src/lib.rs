//! # wt-config
//!
//! Layered configuration for Worktable, built on figment.
//!
//! Four sources merge into one [`WorktableConfig`], later ones winning:
//! built-in defaults, then `~/.config/worktable/config.toml`, then the
//! project's `.worktable/config.toml`, then `WORKTABLE_*` environment
//! variables. A double underscore in a variable name addresses a nested
//! section, so `WORKTABLE_API__BASE_URL` sets `api.base_url` and
//! `WORKTABLE_ENTERPRISE__RESTRICT_HIGHLIGHTING` sets
//! `enterprise.restrict_highlighting`.
//!
//! ```no_run
//! use wt_config::WorktableConfig;
//!
//! // With .env support (the usual application entry point):
//! let config = WorktableConfig::load_with_dotenv().expect("config");
//!
//! // Without it, when the environment is already populated:
//! let config = WorktableConfig::load().expect("config");
//!
//! if config.api.is_configured() {
//!     println!("API base: {}", config.api.base_url);
//! }
//! ```

mod api;
mod enterprise;
mod error;

pub use api::ApiConfig;
pub use enterprise::EnterpriseConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorktableConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub enterprise: EnterpriseConfig,
}

impl WorktableConfig {
    /// Extract and validate a config from TOML files plus the process
    /// environment. No `.env` file is read here; see
    /// [`load_with_dotenv`](Self::load_with_dotenv) for that.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] on a failed figment extraction or a value that
    /// fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Convenience entry point that seeds the environment from a `.env`
    /// file before calling [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// [`ConfigError`] on a failed figment extraction or a value that
    /// fails validation.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::seed_env_from_dotenv();
        Self::load()
    }

    /// The merged provider chain, exposed so tests can extract from it
    /// directly or stack extra providers before extraction.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Per-user file first, so the project file can override it.
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".worktable/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Environment variables override everything below them.
        figment = figment.merge(Env::prefixed("WORKTABLE_").split("__"));

        figment
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("worktable").join("config.toml"))
    }

    /// Locate a `.env` near the running crate and feed it into the
    /// environment. A missing file is not an error.
    fn seed_env_from_dotenv() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // The manifest dir may be a workspace member, so check its
            // parents too before giving up.
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
