// tests/osc_loader.rs

//! Integration tests for the OSC contents loader, driven through the
//! public `Repository` contract with a scripted in-memory transport.

use quarry::{
    CallbackReporter, Error, OscRepo, Phase, ProgressEvent, Repository, SilentReporter, Transport,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Transport returning scripted bodies keyed by exact URL.
///
/// Unknown URLs fail like a 404 would; every request is recorded so tests
/// can assert on attempt order.
struct MockTransport {
    responses: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn with_response(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), body.as_bytes().to_vec());
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn fetch(&self, url: &str) -> quarry::Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Download(format!("HTTP 404 from {url}")))
    }
}

fn epoch_rendered() -> String {
    use chrono::{Local, TimeZone};
    Local
        .timestamp_opt(0, 0)
        .earliest()
        .unwrap()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

const INDEX_URL: &str = "https://repo.example/api/v3/contents";

#[test]
fn full_entry_maps_every_field() {
    let body = r#"[{
        "slug": "space-game",
        "name": "Space Game",
        "author": "someone",
        "description": {"short": "a game", "long": "line one\\nline two"},
        "version": "1.2.3",
        "release_date": 0,
        "file_size": {"zip_compressed": 1024, "zip_uncompressed": 4096},
        "category": "games",
        "url": {"zip": "https://cdn.example/space-game.zip", "icon": "https://cdn.example/icon.png"}
    }]"#;
    let transport = MockTransport::new().with_response(INDEX_URL, body);
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);

    assert!(repo.is_loaded());
    assert_eq!(packages.len(), 1);
    let pkg = &packages[0];
    assert_eq!(pkg.pkg_name, "space-game");
    assert_eq!(pkg.title, "Space Game");
    assert_eq!(pkg.author.as_deref(), Some("someone"));
    assert_eq!(pkg.short_desc.as_deref(), Some("a game"));
    assert_eq!(pkg.long_desc.as_deref(), Some("line one\nline two"));
    assert_eq!(pkg.version.as_deref(), Some("1.2.3"));
    assert_eq!(pkg.updated_timestamp, Some(0));
    assert_eq!(pkg.updated.as_deref(), Some(epoch_rendered().as_str()));
    assert_eq!(pkg.download_size, 1024);
    assert_eq!(pkg.extracted_size, 4096);
    assert_eq!(pkg.category.as_deref(), Some("games"));
    assert_eq!(repo.zip_url(pkg), "https://cdn.example/space-game.zip");
    assert_eq!(repo.icon_url(pkg), "https://cdn.example/icon.png");
}

#[test]
fn missing_slug_skips_only_that_record() {
    let body = r#"[
        {"slug": "first"},
        {"name": "no slug here"},
        {"slug": "third"}
    ]"#;
    let transport = MockTransport::new().with_response(INDEX_URL, body);
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);

    assert!(repo.is_loaded());
    assert_eq!(packages.len(), 2);
    assert!(packages.iter().all(|p| !p.pkg_name.is_empty()));
    assert_eq!(packages[0].pkg_name, "first");
    assert_eq!(packages[1].pkg_name, "third");
}

#[test]
fn title_defaults_to_slug() {
    let body = r#"[{"slug": "bare"}]"#;
    let transport = MockTransport::new().with_response(INDEX_URL, body);
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);

    assert_eq!(packages[0].title, "bare");
    assert_eq!(packages[0].download_size, 0);
    assert_eq!(packages[0].extracted_size, 0);
    assert!(packages[0].updated.is_none());
    assert!(packages[0].updated_timestamp.is_none());
}

#[test]
fn wrong_field_types_read_as_absent() {
    let body = r#"[{
        "slug": "odd",
        "name": 7,
        "description": {"short": "ok", "long": 12},
        "file_size": "huge",
        "release_date": "yesterday",
        "url": {"zip": true}
    }]"#;
    let transport = MockTransport::new().with_response(INDEX_URL, body);
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);

    assert!(repo.is_loaded());
    let pkg = &packages[0];
    assert_eq!(pkg.title, "odd");
    assert_eq!(pkg.short_desc.as_deref(), Some("ok"));
    assert!(pkg.long_desc.is_none());
    assert_eq!(pkg.download_size, 0);
    assert!(pkg.updated_timestamp.is_none());
    assert_eq!(repo.zip_url(pkg), "");
    assert_eq!(repo.icon_url(pkg), "");
}

#[test]
fn non_string_slug_skips_record() {
    let body = r#"[{"slug": 99}, {"slug": "good"}]"#;
    let transport = MockTransport::new().with_response(INDEX_URL, body);
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].pkg_name, "good");
}

#[test]
fn https_failure_falls_back_to_http_and_persists() {
    let transport = MockTransport::new()
        .with_response("http://repo.example/api/v3/contents", r#"[{"slug": "a"}]"#);
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);

    assert!(repo.is_loaded());
    assert_eq!(packages.len(), 1);
    assert_eq!(repo.url(), "http://repo.example");
    assert_eq!(
        transport.requests(),
        vec![
            "https://repo.example/api/v3/contents".to_string(),
            "http://repo.example/api/v3/contents".to_string(),
        ]
    );
}

#[test]
fn successful_https_fetch_leaves_url_alone() {
    let transport = MockTransport::new().with_response(INDEX_URL, "[]");
    let mut repo = OscRepo::new("main", "https://repo.example");

    repo.load_packages(&transport, &SilentReporter);

    assert_eq!(repo.url(), "https://repo.example");
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn both_attempts_failing_marks_not_loaded() {
    let transport = MockTransport::new();
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);

    assert!(packages.is_empty());
    assert!(!repo.is_loaded());
    // the downgrade happened before the retry, so it sticks
    assert_eq!(repo.url(), "http://repo.example");
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn http_url_gets_no_retry() {
    let transport = MockTransport::new();
    let mut repo = OscRepo::new("main", "http://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);

    assert!(packages.is_empty());
    assert!(!repo.is_loaded());
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn top_level_object_is_a_format_failure() {
    let transport = MockTransport::new().with_response(INDEX_URL, r#"{"slug": "a"}"#);
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);

    assert!(packages.is_empty());
    assert!(!repo.is_loaded());
}

#[test]
fn unparseable_body_is_a_format_failure() {
    let transport = MockTransport::new().with_response(INDEX_URL, "not json at all");
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);

    assert!(packages.is_empty());
    assert!(!repo.is_loaded());
}

#[test]
fn empty_array_is_a_successful_load() {
    let transport = MockTransport::new().with_response(INDEX_URL, "[]");
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);

    assert!(packages.is_empty());
    assert!(repo.is_loaded());
}

#[test]
fn reload_refetches_and_rebuilds() {
    let transport = MockTransport::new().with_response(INDEX_URL, r#"[{"slug": "a"}]"#);
    let mut repo = OscRepo::new("main", "https://repo.example");

    let first = repo.load_packages(&transport, &SilentReporter);
    let second = repo.load_packages(&transport, &SilentReporter);

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert!(repo.is_loaded());
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn progress_phase_precedes_ordered_item_ticks() {
    let body = r#"[
        {"slug": "a"},
        {"name": "skipped"},
        {"slug": "c"}
    ]"#;
    let transport = MockTransport::new().with_response(INDEX_URL, body);
    let mut repo = OscRepo::new("main", "https://repo.example");

    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    let progress = CallbackReporter::new(move |event| {
        events_clone.lock().unwrap().push(event);
    });

    repo.load_packages(&transport, &progress);

    let captured = events.lock().unwrap();
    // one phase tick, then one item tick per source element, skipped or not
    assert_eq!(
        *captured,
        vec![
            ProgressEvent::Phase { phase: Phase::Updating, step: 1, total: 1 },
            ProgressEvent::Item { total: 3, index: 1 },
            ProgressEvent::Item { total: 3, index: 2 },
            ProgressEvent::Item { total: 3, index: 3 },
        ]
    );
}

#[test]
fn fetch_failure_emits_no_progress() {
    let transport = MockTransport::new();
    let mut repo = OscRepo::new("main", "https://repo.example");

    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    let progress = CallbackReporter::new(move |event| {
        events_clone.lock().unwrap().push(event);
    });

    repo.load_packages(&transport, &progress);

    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn operation_tag_marks_catalog_records() {
    let transport = MockTransport::new().with_response(INDEX_URL, r#"[{"slug": "a"}]"#);
    let mut repo = OscRepo::new("main", "https://repo.example");

    let packages = repo.load_packages(&transport, &SilentReporter);
    assert_eq!(packages[0].operation, quarry::Operation::Get);
}
