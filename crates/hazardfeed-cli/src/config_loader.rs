//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use hazardfeed_client::ReqwestClient;
use hazardfeed_core::config::{CliConfigOverrides, LayeredConfig};
use hazardfeed_nsw::{FeedOptions, Hazard, NswTransportServiceIncidentsFeed};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "hazardfeed.toml";

/// Load layered configuration: defaults, file, environment, then CLI
pub fn load_config(path: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path(path) {
        tracing::debug!(path = %path.display(), "Loading config file");
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}

/// An explicit path is always used; the default file only when it exists
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}

/// Build the Live Traffic feed described by `config`
pub fn feed_from_config(config: &LayeredConfig) -> Result<NswTransportServiceIncidentsFeed> {
    let home = config
        .home()
        .context("Home location is required. Use --lat/--lon, HAZARDFEED_LATITUDE/HAZARDFEED_LONGITUDE or the [home] table")?;

    let options = FeedOptions {
        hazard: Some(Hazard::from(config.hazard.value.as_str())),
        filter_radius: config.filter_radius.value,
        filter_categories: config.categories(),
    };

    let feed = NswTransportServiceIncidentsFeed::new(ReqwestClient::new(), home, options)
        .context("Invalid feed configuration")?
        .with_timeout(config.timeout());
    Ok(feed)
}
