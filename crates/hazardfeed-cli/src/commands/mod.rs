//! Command implementations

mod config;
mod fetch;
mod watch;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use crate::output_types::{EntryRow, UpdateOutput};
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(cli.config.as_deref(), cli.feed.to_overrides())?;

    match cli.command {
        Commands::Fetch => fetch::execute(&config, &output).await,
        Commands::Watch(args) => watch::execute(args, &config, &output).await,
        Commands::Config => config::execute(&config, &output),
    }
}

/// Print one update in the active format
fn render_update(update: UpdateOutput, output: &OutputWriter) -> Result<()> {
    if output.is_json() {
        return output.result(update);
    }

    output.section(&update.feed);
    output.kv("Status", &update.status);
    output.kv(
        "Last Update",
        update
            .last_timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "None".to_string()),
    );

    let rows: Vec<EntryRow> = update.entries.iter().map(EntryRow::from).collect();
    output.kv("Hazards", rows.len());
    output.table(rows);
    Ok(())
}
