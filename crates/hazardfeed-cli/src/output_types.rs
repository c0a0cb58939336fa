use chrono::{DateTime, Utc};
use hazardfeed_client::{ExternalId, FeedEntry};
use hazardfeed_core::config::ConfigSource;
use hazardfeed_core::{Coordinates, UpdateStatus};
use hazardfeed_nsw::NswTransportServiceIncidentsFeedEntry;
use serde::Serialize;
use tabled::Tabled;

/// Output for one feed update
#[derive(Debug, Serialize)]
pub struct UpdateOutput {
    pub feed: String,
    pub status: String,
    pub last_timestamp: Option<DateTime<Utc>>,
    pub entries: Vec<EntryOutput>,
}

impl UpdateOutput {
    pub fn new(
        feed: impl ToString,
        status: UpdateStatus,
        last_timestamp: Option<DateTime<Utc>>,
        entries: &[NswTransportServiceIncidentsFeedEntry],
    ) -> Self {
        Self {
            feed: feed.to_string(),
            status: status.to_string(),
            last_timestamp,
            entries: entries.iter().map(EntryOutput::from).collect(),
        }
    }
}

/// Serialized form of a hazard entry
#[derive(Debug, Serialize)]
pub struct EntryOutput {
    pub id: Option<ExternalId>,
    pub title: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    pub description: Option<String>,
    pub road: Option<String>,
    pub suburb: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// `null` when the entry has no geometry
    pub distance_km: Option<f64>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub is_major: bool,
    pub ended: bool,
    pub attribution: Option<String>,
}

impl From<&NswTransportServiceIncidentsFeedEntry> for EntryOutput {
    fn from(entry: &NswTransportServiceIncidentsFeedEntry) -> Self {
        let distance = entry.distance_to_home();

        Self {
            id: entry.external_id(),
            title: entry.title().map(str::to_string),
            category: entry.category().map(str::to_string),
            entry_type: entry.entry_type().map(str::to_string),
            description: entry.description().map(str::to_string),
            road: entry.road().map(str::to_string),
            suburb: entry.suburb().map(str::to_string),
            coordinates: entry.coordinates(),
            distance_km: distance.is_finite().then_some(distance),
            published: entry.publication_date(),
            updated: entry.updated_date(),
            is_major: entry.is_major(),
            ended: entry.ended(),
            attribution: entry.attribution().map(str::to_string),
        }
    }
}

/// Table row for human output
#[derive(Debug, Serialize, Tabled)]
pub struct EntryRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Distance (km)")]
    pub distance: String,
    #[tabled(rename = "Published")]
    pub published: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

impl From<&EntryOutput> for EntryRow {
    fn from(entry: &EntryOutput) -> Self {
        let dash = || "-".to_string();
        let mut title = entry.title.clone().unwrap_or_else(dash);
        if entry.is_major {
            title.push_str(" (major)");
        }

        let location = match (&entry.road, &entry.suburb) {
            (Some(road), Some(suburb)) => format!("{}, {}", road, suburb),
            (Some(part), None) | (None, Some(part)) => part.clone(),
            (None, None) => dash(),
        };

        Self {
            id: entry.id.as_ref().map(ToString::to_string).unwrap_or_else(dash),
            title,
            category: entry.category.clone().unwrap_or_else(dash),
            distance: entry.distance_km.map(|d| format!("{:.1}", d)).unwrap_or_else(dash),
            published: entry
                .published
                .map(|p| p.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(dash),
            location,
        }
    }
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub latitude: ConfigValue<String>,
    pub longitude: ConfigValue<String>,
    pub hazard: ConfigValue<String>,
    pub filter_radius: ConfigValue<String>,
    pub filter_categories: ConfigValue<String>,
    pub timeout_secs: ConfigValue<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: String,
}

impl ConfigValue<String> {
    pub fn new(value: &str, source: ConfigSource) -> Self {
        Self { value: value.to_string(), source: format!("{:?}", source) }
    }
}
