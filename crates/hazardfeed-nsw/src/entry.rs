use crate::consts::*;
use chrono::{DateTime, Utc};
use hazardfeed_client::{FeatureEntry, FeedEntry};
use std::fmt;

/// One Live Traffic hazard with its distance to home
#[derive(Debug, Clone)]
pub struct NswTransportServiceIncidentsFeedEntry {
    entry: FeatureEntry,
}

impl NswTransportServiceIncidentsFeedEntry {
    pub fn new(entry: FeatureEntry) -> Self {
        Self { entry }
    }

    /// Full headline, e.g. `FLOODING Burrendong Way Mumbil`
    pub fn description(&self) -> Option<&str> {
        self.entry.string_property(ATTR_DESCRIPTION)
    }

    pub fn updated_date(&self) -> Option<DateTime<Utc>> {
        self.entry.timestamp_property(ATTR_UPDATED_DATE)
    }

    pub fn advice_a(&self) -> Option<&str> {
        self.entry.string_property(ATTR_ADVICE_A).filter(|s| !s.is_empty())
    }

    pub fn advice_b(&self) -> Option<&str> {
        self.entry.string_property(ATTR_ADVICE_B).filter(|s| !s.is_empty())
    }

    pub fn is_major(&self) -> bool {
        self.entry.bool_property(ATTR_IS_MAJOR).unwrap_or(false)
    }

    pub fn ended(&self) -> bool {
        self.entry.bool_property(ATTR_ENDED).unwrap_or(false)
    }

    /// Main street of the first affected road
    pub fn road(&self) -> Option<&str> {
        self.first_road_field(ATTR_ROAD_MAIN_STREET)
    }

    /// Suburb of the first affected road
    pub fn suburb(&self) -> Option<&str> {
        self.first_road_field(ATTR_ROAD_SUBURB)
    }

    fn first_road_field(&self, key: &str) -> Option<&str> {
        self.entry
            .property(ATTR_ROADS)?
            .as_array()?
            .first()?
            .get(key)?
            .as_str()
            .filter(|s| !s.is_empty())
    }
}

impl FeedEntry for NswTransportServiceIncidentsFeedEntry {
    fn feature_entry(&self) -> &FeatureEntry {
        &self.entry
    }

    fn title(&self) -> Option<&str> {
        self.entry.string_property(ATTR_TITLE)
    }

    fn category(&self) -> Option<&str> {
        self.entry.string_property(ATTR_CATEGORY)
    }

    fn entry_type(&self) -> Option<&str> {
        self.entry.string_property(ATTR_TYPE)
    }

    fn publication_date(&self) -> Option<DateTime<Utc>> {
        self.entry.timestamp_property(ATTR_PUB_DATE)
    }

    fn attribution(&self) -> Option<&str> {
        Some(ATTRIBUTION)
    }
}

impl fmt::Display for NswTransportServiceIncidentsFeedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.external_id() {
            Some(id) => write!(f, "<NswTransportServiceIncidentsFeedEntry(id={})>", id),
            None => write!(f, "<NswTransportServiceIncidentsFeedEntry(id=None)>"),
        }
    }
}
