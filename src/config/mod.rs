#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, LogFormat};
pub use toml_config::SiteConfig;

use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

/// Reads `path` when it exists. Without it, each store setting comes from the
/// command line or else its environment variable. Overrides are applied before
/// validation.
pub fn load_site_config(
    path: &Path,
    store_url: Option<String>,
    store_key: Option<String>,
) -> Result<SiteConfig> {
    let config = if path.exists() {
        tracing::info!("📁 Loading configuration from: {}", path.display());
        SiteConfig::from_file(path)?.with_store_overrides(store_url, store_key)
    } else {
        tracing::info!(
            "No config file at {}, using command line or environment store settings",
            path.display()
        );
        SiteConfig::from_env(store_url, store_key)?
    };

    config.validate()?;
    Ok(config)
}
