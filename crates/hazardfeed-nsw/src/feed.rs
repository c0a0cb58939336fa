use crate::consts::{URL_AUTHORITY, URL_PATH_PREFIX};
use crate::entry::NswTransportServiceIncidentsFeedEntry;
use crate::hazard::Hazard;
use chrono::{DateTime, Utc};
use geojson::Feature;
use hazardfeed_client::{FeatureEntry, FeedFilter, FeedSource, GeoJsonFeed, ReqwestClient, UpdateResult};
use hazardfeed_core::ports::HttpClient;
use hazardfeed_core::{Coordinates, Result};
use std::fmt;
use std::time::Duration;

/// Optional settings for [`NswTransportServiceIncidentsFeed`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedOptions {
    /// Dataset to query, `incident-open` when unset
    pub hazard: Option<Hazard>,
    /// Maximum distance to home in kilometres
    pub filter_radius: Option<f64>,
    /// Allowed `mainCategory` values
    pub filter_categories: Option<Vec<String>>,
}

impl FeedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hazard(mut self, hazard: impl Into<Hazard>) -> Self {
        self.hazard = Some(hazard.into());
        self
    }

    pub fn filter_radius(mut self, radius: f64) -> Self {
        self.filter_radius = Some(radius);
        self
    }

    pub fn filter_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }
}

/// URL builder and entry mapper for the Live Traffic hazard feeds
#[derive(Debug, Clone)]
pub struct IncidentsSource {
    hazard: Hazard,
}

impl IncidentsSource {
    pub fn new(hazard: Hazard) -> Self {
        Self { hazard }
    }

    pub fn hazard(&self) -> &Hazard {
        &self.hazard
    }
}

impl FeedSource for IncidentsSource {
    type Entry = NswTransportServiceIncidentsFeedEntry;

    fn name(&self) -> &'static str {
        "NswTransportServiceIncidentsFeed"
    }

    fn url(&self) -> String {
        format!("{}{}{}.json", URL_AUTHORITY, URL_PATH_PREFIX, self.hazard)
    }

    fn new_entry(&self, home: Coordinates, feature: Feature) -> Self::Entry {
        NswTransportServiceIncidentsFeedEntry::new(FeatureEntry::new(home, feature))
    }
}

/// Transport for NSW Live Traffic hazard feed
pub struct NswTransportServiceIncidentsFeed<C = ReqwestClient> {
    feed: GeoJsonFeed<C, IncidentsSource>,
}

impl<C: HttpClient> NswTransportServiceIncidentsFeed<C> {
    /// Create a feed for `home`
    ///
    /// Fails when the home coordinates are out of range or the radius is
    /// negative.
    pub fn new(client: C, home: impl Into<Coordinates>, options: FeedOptions) -> Result<Self> {
        let hazard = options.hazard.unwrap_or_default();
        if !hazard.is_known() {
            tracing::debug!(hazard = %hazard, "Using unrecognised hazard selector");
        }

        let filter = FeedFilter {
            radius: options.filter_radius,
            categories: options.filter_categories,
        };
        let feed = GeoJsonFeed::new(client, IncidentsSource::new(hazard), home.into(), filter)?;
        Ok(Self { feed })
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.feed = self.feed.with_timeout(timeout);
        self
    }

    /// Fetch the hazard feed and return the filtered entries
    pub async fn update(&mut self) -> UpdateResult<NswTransportServiceIncidentsFeedEntry> {
        self.feed.update().await
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.feed.last_timestamp()
    }

    pub fn url(&self) -> String {
        self.feed.url()
    }

    pub fn hazard(&self) -> &Hazard {
        self.feed.source().hazard()
    }

    pub fn home(&self) -> Coordinates {
        self.feed.home()
    }

    pub fn filter(&self) -> &FeedFilter {
        self.feed.filter()
    }

    pub fn timeout(&self) -> Duration {
        self.feed.timeout()
    }
}

impl<C: HttpClient> fmt::Display for NswTransportServiceIncidentsFeed<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.feed, f)
    }
}

impl<C: HttpClient> fmt::Debug for NswTransportServiceIncidentsFeed<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.feed, f)
    }
}
