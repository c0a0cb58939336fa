//! Watch command implementation

use super::render_update;
use crate::cli::WatchArgs;
use crate::config_loader::feed_from_config;
use crate::output::OutputWriter;
use crate::output_types::UpdateOutput;
use anyhow::{bail, Result};
use hazardfeed_core::config::LayeredConfig;
use hazardfeed_core::UpdateStatus;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

pub async fn execute(args: WatchArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    if args.interval == 0 {
        bail!("--interval must be at least 1 second");
    }

    let mut feed = feed_from_config(config)?;
    let mut ticker = interval(Duration::from_secs(args.interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    output.info(format!("Watching {} every {}s", feed.url(), args.interval));

    let mut cycles = 0u64;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                output.info("Stopped");
                return Ok(());
            }
        }

        // Updates run one at a time on a single feed instance
        let (status, entries) = feed.update().await;
        match status {
            UpdateStatus::UpdateOk => render_update(
                UpdateOutput::new(&feed, status, feed.last_timestamp(), &entries.unwrap_or_default()),
                output,
            )?,
            UpdateStatus::UpdateOkNoData => output.info("No new data"),
            UpdateStatus::UpdateError => output.error(format!("Failed to update {}", feed.url())),
        }

        cycles += 1;
        if args.count.is_some_and(|count| cycles >= count) {
            output.success(format!("Completed {} updates", cycles));
            return Ok(());
        }
    }
}
