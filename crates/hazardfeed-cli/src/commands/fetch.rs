//! Fetch command implementation

use super::render_update;
use crate::config_loader::feed_from_config;
use crate::output::OutputWriter;
use crate::output_types::UpdateOutput;
use anyhow::{bail, Result};
use hazardfeed_core::config::LayeredConfig;
use hazardfeed_core::UpdateStatus;

pub async fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut feed = feed_from_config(config)?;

    let (status, entries) = feed.update().await;
    match status {
        UpdateStatus::UpdateError => {
            bail!("Failed to update {}", feed.url());
        }
        UpdateStatus::UpdateOkNoData => {
            output.info("Feed returned no new data");
            Ok(())
        }
        UpdateStatus::UpdateOk => {
            let entries = entries.unwrap_or_default();
            render_update(
                UpdateOutput::new(&feed, status, feed.last_timestamp(), &entries),
                output,
            )
        }
    }
}
