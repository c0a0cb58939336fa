use clap::{Args, Parser, Subcommand};
use hazardfeed_core::config::{parse_radius, CliConfigOverrides};
use std::path::PathBuf;

/// Hazardfeed - NSW Live Traffic hazards near you
#[derive(Parser, Debug)]
#[command(name = "hazardfeed")]
#[command(about = "Poll Transport for NSW Live Traffic hazard feeds", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ./hazardfeed.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub feed: FeedArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Feed settings that override file and environment values
#[derive(Args, Debug, Default)]
pub struct FeedArgs {
    /// Home latitude in decimal degrees
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Home longitude in decimal degrees
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Hazard feed to query (e.g. incident-open, flood-open, fire-open)
    #[arg(long, global = true)]
    pub hazard: Option<String>,

    /// Only keep hazards within this distance of home (e.g. "50", "12.5km")
    #[arg(long, global = true, value_parser = radius_arg)]
    pub radius: Option<f64>,

    /// Only keep hazards in this category; repeat for several
    #[arg(long = "category", global = true, value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

impl FeedArgs {
    pub fn to_overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            latitude: self.lat,
            longitude: self.lon,
            hazard: self.hazard.clone(),
            filter_radius: self.radius,
            filter_categories: if self.categories.is_empty() {
                None
            } else {
                Some(self.categories.clone())
            },
            timeout_secs: self.timeout,
        }
    }
}

fn radius_arg(s: &str) -> Result<f64, String> {
    parse_radius(s).map_err(|e| e.to_string())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the feed once and print the matching hazards
    Fetch,

    /// Poll the feed repeatedly
    Watch(WatchArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Seconds between updates
    #[arg(long, default_value = "300")]
    pub interval: u64,

    /// Stop after this many updates
    #[arg(long)]
    pub count: Option<u64>,
}
