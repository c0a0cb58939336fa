use crate::error::{FeedError, Result};
use crate::models::{format_float, Coordinates};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Hazard queried when nothing else is configured
pub const DEFAULT_HAZARD: &str = "incident-open";

/// Request timeout applied when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered feed configuration
///
/// Precedence: CLI arguments > environment variables > config file > defaults.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub latitude: ConfigValue<Option<f64>>,
    pub longitude: ConfigValue<Option<f64>>,
    pub hazard: ConfigValue<String>,
    pub filter_radius: ConfigValue<Option<f64>>,
    pub filter_categories: ConfigValue<Vec<String>>,
    pub timeout_secs: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            latitude: ConfigValue::new(None, ConfigSource::Default),
            longitude: ConfigValue::new(None, ConfigSource::Default),
            hazard: ConfigValue::new(DEFAULT_HAZARD.to_string(), ConfigSource::Default),
            filter_radius: ConfigValue::new(None, ConfigSource::Default),
            filter_categories: ConfigValue::new(Vec::new(), ConfigSource::Default),
            timeout_secs: ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FeedError::ConfigNotFound { path: path.to_path_buf() });
        }

        let content = fs::read_to_string(path).map_err(|e| FeedError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| FeedError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(home) = file_config.home {
            self.latitude.update(Some(home.latitude), ConfigSource::File);
            self.longitude.update(Some(home.longitude), ConfigSource::File);
        }

        if let Some(hazard) = file_config.hazard {
            self.hazard.update(hazard, ConfigSource::File);
        }

        if let Some(radius) = file_config.filter_radius {
            self.filter_radius.update(Some(radius), ConfigSource::File);
        }

        if let Some(categories) = file_config.filter_categories {
            self.filter_categories.update(categories, ConfigSource::File);
        }

        if let Some(timeout) = file_config.timeout_secs {
            if timeout == 0 {
                return Err(FeedError::ConfigInvalid {
                    key: "timeout_secs".to_string(),
                    reason: "Timeout must be at least 1 second".to_string(),
                });
            }
            self.timeout_secs.update(timeout, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // HAZARDFEED_LATITUDE
        if let Ok(lat_str) = env::var("HAZARDFEED_LATITUDE") {
            match lat_str.trim().parse::<f64>() {
                Ok(lat) => self.latitude.update(Some(lat), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid HAZARDFEED_LATITUDE value '{}': expected decimal degrees",
                    lat_str
                ),
            }
        }

        // HAZARDFEED_LONGITUDE
        if let Ok(lon_str) = env::var("HAZARDFEED_LONGITUDE") {
            match lon_str.trim().parse::<f64>() {
                Ok(lon) => self.longitude.update(Some(lon), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid HAZARDFEED_LONGITUDE value '{}': expected decimal degrees",
                    lon_str
                ),
            }
        }

        // HAZARDFEED_HAZARD
        if let Ok(hazard) = env::var("HAZARDFEED_HAZARD") {
            if hazard.trim().is_empty() {
                tracing::warn!("Ignoring empty HAZARDFEED_HAZARD");
            } else {
                self.hazard.update(hazard.trim().to_string(), ConfigSource::Environment);
            }
        }

        // HAZARDFEED_RADIUS
        if let Ok(radius_str) = env::var("HAZARDFEED_RADIUS") {
            match parse_radius(&radius_str) {
                Ok(radius) => self.filter_radius.update(Some(radius), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid HAZARDFEED_RADIUS value '{}': expected a non-negative number of kilometres",
                    radius_str
                ),
            }
        }

        // HAZARDFEED_CATEGORIES
        if let Ok(categories_str) = env::var("HAZARDFEED_CATEGORIES") {
            self.filter_categories
                .update(parse_categories(&categories_str), ConfigSource::Environment);
        }

        // HAZARDFEED_TIMEOUT_SECS
        if let Ok(timeout_str) = env::var("HAZARDFEED_TIMEOUT_SECS") {
            match timeout_str.trim().parse::<u64>() {
                Ok(timeout) if timeout > 0 => {
                    self.timeout_secs.update(timeout, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid HAZARDFEED_TIMEOUT_SECS value '{}': expected a positive integer",
                    timeout_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(lat) = overrides.latitude {
            self.latitude.update(Some(lat), ConfigSource::Cli);
        }

        if let Some(lon) = overrides.longitude {
            self.longitude.update(Some(lon), ConfigSource::Cli);
        }

        if let Some(hazard) = overrides.hazard {
            self.hazard.update(hazard, ConfigSource::Cli);
        }

        if let Some(radius) = overrides.filter_radius {
            self.filter_radius.update(Some(radius), ConfigSource::Cli);
        }

        if let Some(categories) = overrides.filter_categories {
            self.filter_categories.update(categories, ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs.update(timeout, ConfigSource::Cli);
        }
    }

    /// Resolve the home location, failing when either half is missing
    pub fn home(&self) -> Result<Coordinates> {
        let latitude = self
            .latitude
            .value
            .ok_or_else(|| FeedError::ConfigMissing { key: "latitude".to_string() })?;
        let longitude = self
            .longitude
            .value
            .ok_or_else(|| FeedError::ConfigMissing { key: "longitude".to_string() })?;

        let home = Coordinates::new(latitude, longitude);
        home.validate()?;
        Ok(home)
    }

    /// Category allow-list, or `None` when no filter is configured
    pub fn categories(&self) -> Option<Vec<String>> {
        if self.filter_categories.value.is_empty() {
            None
        } else {
            Some(self.filter_categories.value.clone())
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        let fmt_opt = |v: Option<f64>| v.map(format_float).unwrap_or_else(|| "None".to_string());

        map.insert(
            "latitude".to_string(),
            (fmt_opt(self.latitude.value), self.latitude.source),
        );

        map.insert(
            "longitude".to_string(),
            (fmt_opt(self.longitude.value), self.longitude.source),
        );

        map.insert("hazard".to_string(), (self.hazard.value.clone(), self.hazard.source));

        map.insert(
            "filter_radius".to_string(),
            (fmt_opt(self.filter_radius.value), self.filter_radius.source),
        );

        map.insert(
            "filter_categories".to_string(),
            (self.filter_categories.value.join(","), self.filter_categories.source),
        );

        map.insert(
            "timeout_secs".to_string(),
            (self.timeout_secs.value.to_string(), self.timeout_secs.source),
        );

        map
    }
}

/// Home location as written in the config file
#[derive(Debug, Deserialize, Serialize)]
struct FileHome {
    latitude: f64,
    longitude: f64,
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    home: Option<FileHome>,
    hazard: Option<String>,
    filter_radius: Option<f64>,
    filter_categories: Option<Vec<String>>,
    timeout_secs: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub hazard: Option<String>,
    pub filter_radius: Option<f64>,
    pub filter_categories: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

/// Parse a filter radius in kilometres
pub fn parse_radius(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let number = trimmed
        .strip_suffix("km")
        .map(str::trim_end)
        .unwrap_or(trimmed);

    match number.parse::<f64>() {
        Ok(radius) if radius.is_finite() && radius >= 0.0 => Ok(radius),
        _ => Err(FeedError::ConfigInvalid {
            key: "filter_radius".to_string(),
            reason: format!("Invalid radius: {}. Use a non-negative number of kilometres", s),
        }),
    }
}

/// Parse a comma separated category list; blank items are dropped
pub fn parse_categories(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
