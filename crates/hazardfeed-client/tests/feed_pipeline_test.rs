//! Integration tests for the generic feed pipeline
//!
//! A stub HTTP client serves canned responses so every branch of
//! `GeoJsonFeed::update` can be exercised without a network.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geojson::Feature;
use hazardfeed_client::{FeatureEntry, FeedEntry, FeedFilter, FeedSource, GeoJsonFeed};
use hazardfeed_core::ports::{HttpClient, HttpResponse};
use hazardfeed_core::{Coordinates, FeedError, Result, UpdateStatus};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SYDNEY: Coordinates = Coordinates { latitude: -33.8688, longitude: 151.2093 };

const MIXED_FEED: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "id": 1,
            "geometry": {"type": "Point", "coordinates": [151.2, -33.86]},
            "properties": {"title": "Near crash", "category": "Crash", "published": 1700000000000}
        },
        {
            "type": "Feature",
            "id": 2,
            "geometry": {"type": "Point", "coordinates": [153.277012, -28.814576]},
            "properties": {"title": "Far crash", "category": "Crash", "published": 1700000500000}
        },
        {
            "type": "Feature",
            "id": 3,
            "geometry": {"type": "Point", "coordinates": [151.1, -33.9]},
            "properties": {"title": "Near breakdown", "category": "Breakdown", "published": 1700000100000}
        },
        {
            "type": "Feature",
            "id": 4,
            "geometry": {"type": "Point", "coordinates": [151.0, -33.8]},
            "properties": {"title": "Lower case", "category": "crash"}
        }
    ]
}"#;

enum Reply {
    Respond(u16, &'static str),
    Timeout,
    Refused,
}

/// Answers the n-th request with the n-th reply, repeating the last one
struct StubClient {
    replies: Vec<Reply>,
    requests: Mutex<Vec<(String, Duration)>>,
}

impl StubClient {
    fn new(reply: Reply) -> Arc<Self> {
        Self::sequence(vec![reply])
    }

    fn sequence(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self { replies, requests: Mutex::new(Vec::new()) })
    }

    fn requests(&self) -> Vec<(String, Duration)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for StubClient {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((url.to_string(), timeout));
            (requests.len() - 1).min(self.replies.len() - 1)
        };
        match &self.replies[index] {
            Reply::Respond(status, body) => Ok(HttpResponse::new(*status, *body)),
            Reply::Timeout => Err(FeedError::Timeout { url: url.to_string() }),
            Reply::Refused => Err(FeedError::Transport {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

struct TestEntry(FeatureEntry);

impl FeedEntry for TestEntry {
    fn feature_entry(&self) -> &FeatureEntry {
        &self.0
    }

    fn title(&self) -> Option<&str> {
        self.0.string_property("title")
    }

    fn category(&self) -> Option<&str> {
        self.0.string_property("category")
    }

    fn publication_date(&self) -> Option<DateTime<Utc>> {
        self.0.timestamp_property("published")
    }
}

struct TestSource;

impl FeedSource for TestSource {
    type Entry = TestEntry;

    fn name(&self) -> &'static str {
        "TestFeed"
    }

    fn url(&self) -> String {
        "http://feeds.test/hazards.json".to_string()
    }

    fn new_entry(&self, home: Coordinates, feature: Feature) -> TestEntry {
        TestEntry(FeatureEntry::new(home, feature))
    }
}

fn feed(client: Arc<StubClient>, filter: FeedFilter) -> GeoJsonFeed<Arc<StubClient>, TestSource> {
    GeoJsonFeed::new(client, TestSource, SYDNEY, filter).unwrap()
}

fn ids(entries: &[TestEntry]) -> Vec<String> {
    entries.iter().map(|e| e.external_id().unwrap().to_string()).collect()
}

#[tokio::test]
async fn test_update_returns_entries_in_feed_order() {
    let client = StubClient::new(Reply::Respond(200, MIXED_FEED));
    let mut feed = feed(client.clone(), FeedFilter::new());

    let (status, entries) = feed.update().await;
    let entries = entries.expect("entries on success");

    assert_eq!(status, UpdateStatus::UpdateOk);
    assert_eq!(ids(&entries), vec!["1", "2", "3", "4"]);
    assert!(entries.iter().all(|e| e.distance_to_home() >= 0.0));
    assert_eq!(
        client.requests(),
        vec![("http://feeds.test/hazards.json".to_string(), Duration::from_secs(10))]
    );
}

#[tokio::test]
async fn test_last_timestamp_uses_all_entries_before_filtering() {
    let client = StubClient::new(Reply::Respond(200, MIXED_FEED));
    let mut feed = feed(client, FeedFilter::new().radius(50.0));

    let (_, entries) = feed.update().await;

    // Entry 2 is filtered out by radius but carries the newest timestamp
    assert!(!ids(&entries.unwrap()).contains(&"2".to_string()));
    assert_eq!(feed.last_timestamp(), DateTime::<Utc>::from_timestamp_millis(1700000500000));
}

#[tokio::test]
async fn test_radius_filter() {
    let client = StubClient::new(Reply::Respond(200, MIXED_FEED));
    let mut feed = feed(client, FeedFilter::new().radius(50.0));

    let (status, entries) = feed.update().await;
    let entries = entries.unwrap();

    assert_eq!(status, UpdateStatus::UpdateOk);
    assert_eq!(ids(&entries), vec!["1", "3", "4"]);
    assert!(entries.iter().all(|e| e.distance_to_home() <= 50.0));
}

#[tokio::test]
async fn test_category_filter_is_exact_and_case_sensitive() {
    let client = StubClient::new(Reply::Respond(200, MIXED_FEED));
    let mut feed = feed(client, FeedFilter::new().categories(["Crash"]));

    let (_, entries) = feed.update().await;
    let entries = entries.unwrap();

    assert_eq!(ids(&entries), vec!["1", "2"]);
    assert!(entries.iter().all(|e| e.category() == Some("Crash")));
}

#[tokio::test]
async fn test_radius_and_category_filters_combine() {
    let client = StubClient::new(Reply::Respond(200, MIXED_FEED));
    let filter = FeedFilter::new().radius(50.0).categories(["Crash", "Breakdown"]);
    let mut feed = feed(client, filter);

    let (_, entries) = feed.update().await;
    assert_eq!(ids(&entries.unwrap()), vec!["1", "3"]);
}

#[tokio::test]
async fn test_empty_category_list_accepts_everything() {
    let client = StubClient::new(Reply::Respond(200, MIXED_FEED));
    let mut feed = feed(client, FeedFilter::new().categories(Vec::<String>::new()));

    let (_, entries) = feed.update().await;
    assert_eq!(entries.unwrap().len(), 4);
    assert!(feed.to_string().ends_with("radius=None, categories=[])>"));
}

#[tokio::test]
async fn test_repeated_updates_are_identical() {
    let client = StubClient::new(Reply::Respond(200, MIXED_FEED));
    let mut feed = feed(client, FeedFilter::new());

    let (_, first) = feed.update().await;
    let (_, second) = feed.update().await;
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.external_id(), b.external_id());
        assert_eq!(a.title(), b.title());
        assert_eq!(a.category(), b.category());
        assert_eq!(a.coordinates(), b.coordinates());
        assert_eq!(a.distance_to_home(), b.distance_to_home());
    }
}

#[tokio::test]
async fn test_transport_failures_map_to_update_error() {
    for reply in [Reply::Timeout, Reply::Refused] {
        let client = StubClient::new(reply);
        let mut feed = feed(client, FeedFilter::new());

        let (status, entries) = feed.update().await;
        assert_eq!(status, UpdateStatus::UpdateError);
        assert!(entries.is_none());
        assert!(feed.last_timestamp().is_none());
    }
}

#[tokio::test]
async fn test_http_error_status_maps_to_update_error() {
    let client = StubClient::new(Reply::Respond(503, "Service Unavailable"));
    let mut feed = feed(client, FeedFilter::new());

    let (status, entries) = feed.update().await;
    assert_eq!(status, UpdateStatus::UpdateError);
    assert!(entries.is_none());
}

#[tokio::test]
async fn test_malformed_body_maps_to_update_error() {
    for body in ["{not json", r#"{"type": "Point", "coordinates": [151.0, -33.0]}"#] {
        let client = StubClient::new(Reply::Respond(200, body));
        let mut feed = feed(client, FeedFilter::new());

        let (status, entries) = feed.update().await;
        assert_eq!(status, UpdateStatus::UpdateError, "body: {}", body);
        assert!(entries.is_none());
    }
}

#[tokio::test]
async fn test_not_modified_and_empty_body_are_no_data() {
    for (status_code, body) in [(304, ""), (200, "  \n")] {
        let client = StubClient::new(Reply::Respond(status_code, body));
        let mut feed = feed(client, FeedFilter::new());

        let (status, entries) = feed.update().await;
        assert_eq!(status, UpdateStatus::UpdateOkNoData);
        assert!(entries.is_none());
    }
}

#[tokio::test]
async fn test_error_resets_last_timestamp() {
    let client = StubClient::sequence(vec![Reply::Respond(200, MIXED_FEED), Reply::Refused]);
    let mut feed = feed(client.clone(), FeedFilter::new());

    let (status, _) = feed.update().await;
    assert_eq!(status, UpdateStatus::UpdateOk);
    assert_eq!(feed.last_timestamp(), DateTime::<Utc>::from_timestamp_millis(1700000500000));

    let (status, entries) = feed.update().await;
    assert_eq!(status, UpdateStatus::UpdateError);
    assert!(entries.is_none());
    assert!(feed.last_timestamp().is_none());
    assert_eq!(client.requests().len(), 2);
}

#[tokio::test]
async fn test_no_data_keeps_last_timestamp() {
    let client = StubClient::sequence(vec![Reply::Respond(200, MIXED_FEED), Reply::Respond(304, "")]);
    let mut feed = feed(client, FeedFilter::new());

    feed.update().await;
    let (status, entries) = feed.update().await;

    assert_eq!(status, UpdateStatus::UpdateOkNoData);
    assert!(entries.is_none());
    assert_eq!(feed.last_timestamp(), DateTime::<Utc>::from_timestamp_millis(1700000500000));
}

#[tokio::test]
async fn test_feeds_keep_separate_state() {
    let mut ok = feed(StubClient::new(Reply::Respond(200, MIXED_FEED)), FeedFilter::new());
    let mut failing = feed(StubClient::new(Reply::Refused), FeedFilter::new());

    ok.update().await;
    failing.update().await;

    assert!(ok.last_timestamp().is_some());
    assert!(failing.last_timestamp().is_none());
}

#[tokio::test]
async fn test_independent_feeds_update_concurrently() {
    let mut near = feed(StubClient::new(Reply::Respond(200, MIXED_FEED)), FeedFilter::new().radius(50.0));
    let mut all = feed(StubClient::new(Reply::Respond(200, MIXED_FEED)), FeedFilter::new());

    let ((_, near_entries), (_, all_entries)) = tokio::join!(near.update(), all.update());

    assert_eq!(near_entries.unwrap().len(), 3);
    assert_eq!(all_entries.unwrap().len(), 4);
}

#[tokio::test]
async fn test_custom_timeout_is_forwarded() {
    let client = StubClient::new(Reply::Respond(200, MIXED_FEED));
    let mut feed = feed(client.clone(), FeedFilter::new()).with_timeout(Duration::from_secs(3));

    feed.update().await;
    assert_eq!(client.requests()[0].1, Duration::from_secs(3));
}

#[test]
fn test_construction_rejects_bad_arguments() {
    let client = StubClient::new(Reply::Refused);
    let bad_home = GeoJsonFeed::new(
        client.clone(),
        TestSource,
        Coordinates::new(-133.0, 151.0),
        FeedFilter::new(),
    );
    assert!(matches!(bad_home, Err(FeedError::InvalidArgument { .. })));

    let bad_radius = GeoJsonFeed::new(client, TestSource, SYDNEY, FeedFilter::new().radius(-5.0));
    assert!(matches!(bad_radius, Err(FeedError::InvalidArgument { .. })));
}

#[test]
fn test_representation() {
    let client = StubClient::new(Reply::Refused);
    let plain = feed(client.clone(), FeedFilter::new());
    assert_eq!(
        plain.to_string(),
        "<TestFeed(home=(-33.8688, 151.2093), url=http://feeds.test/hazards.json, \
         radius=None, categories=None)>"
    );

    let filtered = feed(client, FeedFilter::new().radius(25.0).categories(["Crash", "Fire"]));
    assert_eq!(
        filtered.to_string(),
        "<TestFeed(home=(-33.8688, 151.2093), url=http://feeds.test/hazards.json, \
         radius=25.0, categories=['Crash', 'Fire'])>"
    );
}
