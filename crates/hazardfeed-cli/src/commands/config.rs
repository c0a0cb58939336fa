//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::{ConfigOutput, ConfigValue};
use anyhow::Result;
use hazardfeed_core::config::{ConfigSource, LayeredConfig};
use serde::Serialize;
use tabled::Tabled;

#[derive(Serialize, Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let inspection_map = config.to_inspection_map();

    if output.is_json() {
        let entry = |key: &str| {
            inspection_map
                .get(key)
                .map(|(value, source)| ConfigValue::new(value, *source))
                .unwrap_or_else(|| ConfigValue::new("None", ConfigSource::Default))
        };

        output.result(ConfigOutput {
            latitude: entry("latitude"),
            longitude: entry("longitude"),
            hazard: entry("hazard"),
            filter_radius: entry("filter_radius"),
            filter_categories: entry("filter_categories"),
            timeout_secs: entry("timeout_secs"),
        })?;
    } else {
        output.section("Configuration Values");

        let mut rows: Vec<ConfigRow> = inspection_map
            .into_iter()
            .map(|(key, (value, source))| ConfigRow {
                key,
                value,
                source: format!("{:?}", source),
            })
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));

        output.table(rows);

        if config.home().is_err() {
            output.warning("Home location is not set; fetch and watch need --lat and --lon");
        }

        output.section("Configuration Precedence");
        output.info("CLI arguments > Environment variables > Config file > Defaults");
    }

    Ok(())
}
