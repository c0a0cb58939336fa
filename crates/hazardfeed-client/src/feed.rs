//! Generic fetch → parse → convert → filter pipeline for GeoJSON feeds.

use crate::entry::FeedEntry;
use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection, GeoJson};
use hazardfeed_core::config::DEFAULT_TIMEOUT_SECS;
use hazardfeed_core::models::format_float;
use hazardfeed_core::ports::HttpClient;
use hazardfeed_core::{Coordinates, FeedError, Result, UpdateStatus};
use std::fmt;
use std::time::Duration;

/// Status of an update together with the entries it produced, if any
pub type UpdateResult<E> = (UpdateStatus, Option<Vec<E>>);

/// Source-specific strategies plugged into [`GeoJsonFeed`]
pub trait FeedSource: Send + Sync {
    type Entry: FeedEntry + Send;

    /// Type name shown in the feed's debug representation
    fn name(&self) -> &'static str;

    /// Request URL for this source's configuration
    fn url(&self) -> String;

    /// Map one raw feature to an entry
    fn new_entry(&self, home: Coordinates, feature: Feature) -> Self::Entry;
}

/// Radius and category filters applied after conversion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedFilter {
    /// Maximum distance to home in kilometres
    pub radius: Option<f64>,
    /// Allowed categories; exact, case-sensitive match
    pub categories: Option<Vec<String>>,
}

impl FeedFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    fn validate(&self) -> Result<()> {
        match self.radius {
            Some(radius) if !radius.is_finite() || radius < 0.0 => Err(FeedError::InvalidArgument {
                name: "filter_radius".to_string(),
                reason: format!("{} is not a non-negative number of kilometres", radius),
            }),
            _ => Ok(()),
        }
    }

    pub fn within_radius<E: FeedEntry>(&self, entry: &E) -> bool {
        self.radius.map_or(true, |radius| entry.distance_to_home() <= radius)
    }

    /// An unset or empty category list accepts everything
    pub fn matches_category<E: FeedEntry>(&self, entry: &E) -> bool {
        match &self.categories {
            Some(allowed) if !allowed.is_empty() => entry
                .category()
                .is_some_and(|category| allowed.iter().any(|a| a == category)),
            _ => true,
        }
    }
}

/// A polled GeoJSON feed bound to one home location
///
/// Holds its own `last_timestamp`; `update` needs `&mut self`, so one
/// instance is polled serially while separate instances stay independent.
pub struct GeoJsonFeed<C, S> {
    client: C,
    source: S,
    home: Coordinates,
    filter: FeedFilter,
    timeout: Duration,
    last_timestamp: Option<DateTime<Utc>>,
}

impl<C, S> GeoJsonFeed<C, S>
where
    C: HttpClient,
    S: FeedSource,
{
    /// Create a feed, rejecting invalid home coordinates or radius
    pub fn new(client: C, source: S, home: Coordinates, filter: FeedFilter) -> Result<Self> {
        home.validate()?;
        filter.validate()?;

        Ok(Self {
            client,
            source,
            home,
            filter,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            last_timestamp: None,
        })
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn home(&self) -> Coordinates {
        self.home
    }

    pub fn url(&self) -> String {
        self.source.url()
    }

    pub fn filter(&self) -> &FeedFilter {
        &self.filter
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Latest publication date seen by the last successful update
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_timestamp
    }

    /// Fetch the feed and return its filtered entries
    ///
    /// Network, HTTP and parse failures are logged and reported as
    /// [`UpdateStatus::UpdateError`]; they never escape as errors.
    pub async fn update(&mut self) -> UpdateResult<S::Entry> {
        let collection = match self.fetch().await {
            Ok(Some(collection)) => collection,
            Ok(None) => {
                tracing::debug!(url = %self.url(), "Feed returned no data");
                return (UpdateStatus::UpdateOkNoData, None);
            }
            Err(e) => {
                tracing::warn!(url = %self.url(), error = %e, "Feed update failed");
                self.last_timestamp = None;
                return (UpdateStatus::UpdateError, None);
            }
        };

        let entries: Vec<S::Entry> = collection
            .features
            .into_iter()
            .map(|feature| self.source.new_entry(self.home, feature))
            .collect();

        self.last_timestamp = entries.iter().filter_map(|e| e.publication_date()).max();

        let total = entries.len();
        let filtered = self.filter_entries(entries);
        tracing::debug!(
            url = %self.url(),
            total,
            kept = filtered.len(),
            last_timestamp = ?self.last_timestamp,
            "Feed updated"
        );

        (UpdateStatus::UpdateOk, Some(filtered))
    }

    /// Radius first, then categories
    fn filter_entries(&self, entries: Vec<S::Entry>) -> Vec<S::Entry> {
        entries
            .into_iter()
            .filter(|entry| self.filter.within_radius(entry))
            .filter(|entry| self.filter.matches_category(entry))
            .collect()
    }

    /// Fetch and parse; `Ok(None)` means the server had nothing new
    async fn fetch(&self) -> Result<Option<FeatureCollection>> {
        let url = self.url();
        tracing::debug!(url = %url, timeout = ?self.timeout, "Fetching feed");

        let response = self.client.get(&url, self.timeout).await?;

        if response.is_not_modified() {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(FeedError::HttpStatus { url, status: response.status });
        }
        if response.body.trim().is_empty() {
            return Ok(None);
        }

        parse_feature_collection(&response.body).map(Some)
    }
}

/// Parse a response body, accepting only a `FeatureCollection` at the top level
pub fn parse_feature_collection(body: &str) -> Result<FeatureCollection> {
    let geojson: GeoJson = body.parse().map_err(|e| FeedError::Parse {
        reason: format!("{}", e),
    })?;

    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(FeedError::UnexpectedShape { found: "Feature".to_string() }),
        GeoJson::Geometry(_) => Err(FeedError::UnexpectedShape { found: "Geometry".to_string() }),
    }
}

fn format_radius(radius: Option<f64>) -> String {
    radius.map(format_float).unwrap_or_else(|| "None".to_string())
}

fn format_categories(categories: Option<&[String]>) -> String {
    match categories {
        Some(list) => {
            let quoted: Vec<String> = list.iter().map(|c| format!("'{}'", c)).collect();
            format!("[{}]", quoted.join(", "))
        }
        None => "None".to_string(),
    }
}

/// `<Name(home=(lat, lon), url=..., radius=..., categories=...)>`
impl<C, S> fmt::Display for GeoJsonFeed<C, S>
where
    C: HttpClient,
    S: FeedSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}(home={}, url={}, radius={}, categories={})>",
            self.source.name(),
            self.home,
            self.url(),
            format_radius(self.filter.radius),
            format_categories(self.filter.categories.as_deref()),
        )
    }
}

impl<C, S> fmt::Debug for GeoJsonFeed<C, S>
where
    C: HttpClient,
    S: FeedSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
