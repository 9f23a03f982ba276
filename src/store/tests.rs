use std::{
    collections::HashSet,
    sync::atomic::{
        AtomicU8,
        AtomicUsize,
        Ordering,
    },
    time::Duration,
};

use super::*;
use crate::{
    core::{
        constants::storage_keys,
        http::TextFetcher,
        ProfileError,
    },
    persistence::{
        get_storage_json,
        MemoryStore,
    },
};

const CSV: &str = "name,source,notes\n\"Coffee 1\",Ethiopia,\"Floral, Citrus\"\n\"Coffee 2\",Colombia,\"Chocolate, Caramel\"\n";

const CACHED: &str = r#"[{"id":"cached-1","name":"Cached Coffee","source":"Kenya"}]"#;

enum Behavior {
    Text(&'static str),
    Fail(&'static str),
    Slow,
}

struct FakeFetcher {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeFetcher {
    fn new(behavior: Behavior) -> Self {
        Self { behavior, calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextFetcher for FakeFetcher {
    async fn fetch_text(&self, _url: &str) -> Result<String, ProfileError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Text(text) => Ok(text.to_string()),
            Behavior::Fail(message) => Err(ProfileError::Custom(message.to_string())),
            Behavior::Slow => {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(CSV.to_string())
            }
        }
    }
}

fn store_with(storage: MemoryStore) -> ProfileStore<MemoryStore> {
    ProfileStore::new(storage, &AppConfig::default())
}

fn cached(store: &ProfileStore<MemoryStore>) -> Option<Vec<CoffeeProfile>> {
    get_storage_json(store.storage(), storage_keys::LOCAL_PROFILES)
}

fn ignore_progress(_: u8) {}

#[test]
fn initial_state_defaults() {
    let store = store_with(MemoryStore::new());
    let state = store.state();

    assert_eq!(state.theme, Theme::Dark);
    assert_eq!(state.last_updated, None);
    assert!(!state.use_local_data);
    assert!(!state.loading);
    assert!(!state.has_profiles());
    assert_eq!(state.selected_source, "All");
    assert_eq!(state.spreadsheet_url, "data/coffee-profiles.csv");
}

#[test]
fn initial_state_reads_saved_preferences() {
    let store = store_with(MemoryStore::with_entries([
        ("theme", "light"),
        ("last_updated", "2024-01-01T00:00:00.000Z"),
        ("use_local_data", "true"),
    ]));
    let state = store.state();

    assert_eq!(state.theme, Theme::Light);
    assert_eq!(state.last_updated.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    assert!(state.use_local_data);
}

#[test]
fn only_the_exact_string_true_enables_local_data() {
    let store = store_with(MemoryStore::with_entries([("use_local_data", "TRUE")]));
    assert!(!store.state().use_local_data);
}

#[tokio::test]
async fn fresh_load_adopts_and_persists() {
    let mut store = store_with(MemoryStore::new());
    let fetcher = FakeFetcher::new(Behavior::Text(CSV));
    store.load(&fetcher).await;

    let state = store.state();
    assert_eq!(state.profiles.len(), 2);
    assert_eq!(state.profiles[0].name(), "Coffee 1");
    assert_eq!(state.profiles[0].value("notes"), "Floral, Citrus");
    assert_eq!(state.sources, vec!["All", "Ethiopia", "Colombia"]);
    assert_eq!(state.error, None);
    assert!(!state.loading);
    assert!(state.online_data_available);

    assert_eq!(cached(&store).map(|p| p.len()), Some(2));
    let updated = state.last_updated.clone().unwrap();
    assert!(updated.ends_with('Z'));
    assert_eq!(store.storage().get_item("last_updated").unwrap(), Some(updated));
}

#[tokio::test]
async fn fetch_failure_falls_back_to_cache() {
    let mut store = store_with(MemoryStore::with_entries([("local_profiles", CACHED)]));
    store.load(&FakeFetcher::new(Behavior::Fail("Network error"))).await;

    let state = store.state();
    assert_eq!(state.profiles.len(), 1);
    assert_eq!(state.profiles[0].name(), "Cached Coffee");
    assert_eq!(state.sources, vec!["All", "Kenya"]);
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to fetch data. Using locally stored data. (Network error)")
    );
    assert!(!state.online_data_available);
    assert!(!state.loading);
}

#[tokio::test]
async fn fetch_failure_without_cache_uses_samples() {
    let mut store = store_with(MemoryStore::new());
    store.load(&FakeFetcher::new(Behavior::Fail("Network error"))).await;

    let state = store.state();
    assert_eq!(state.profiles.len(), 8);
    assert_eq!(state.sources[0], "All");
    assert!(state.sources.len() > 1);
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to fetch data. Using sample data. (Network error)")
    );
    assert_eq!(state.last_updated, None);
}

#[tokio::test]
async fn empty_cache_counts_as_no_cache() {
    let mut store = store_with(MemoryStore::with_entries([("local_profiles", "[]")]));
    store.load(&FakeFetcher::new(Behavior::Fail("Network error"))).await;
    assert_eq!(store.state().profiles.len(), 8);
}

#[tokio::test]
async fn rejected_text_falls_back() {
    let cases = [
        ("", "Invalid CSV data received: empty response"),
        ("name,source\n", "Invalid CSV data: Not enough rows"),
        ("name,source\nbad\"", "No profiles found in the data"),
    ];

    for (text, cause) in cases {
        let mut store = store_with(MemoryStore::new());
        store.load(&FakeFetcher::new(Behavior::Text(text))).await;

        let state = store.state();
        assert_eq!(state.profiles.len(), 8, "input {text:?}");
        assert_eq!(
            state.error.as_deref(),
            Some(format!("Failed to fetch data. Using sample data. ({cause})").as_str())
        );
        assert_eq!(cached(&store), None);
    }
}

#[tokio::test]
async fn local_mode_uses_cache_without_fetching() {
    let mut store = store_with(MemoryStore::with_entries([
        ("use_local_data", "true"),
        ("local_profiles", CACHED),
    ]));
    let fetcher = FakeFetcher::new(Behavior::Text(CSV));
    store.load(&fetcher).await;

    assert_eq!(fetcher.calls(), 0);
    let state = store.state();
    assert_eq!(state.profiles.len(), 1);
    assert_eq!(state.error, None);
    assert!(!state.loading);
    assert_eq!(state.last_updated, None);
}

#[tokio::test]
async fn local_mode_without_cache_fetches_but_does_not_persist() {
    let mut store = store_with(MemoryStore::with_entries([("use_local_data", "true")]));
    let fetcher = FakeFetcher::new(Behavior::Text(CSV));
    store.load(&fetcher).await;

    assert_eq!(fetcher.calls(), 1);
    let state = store.state();
    assert_eq!(state.profiles.len(), 2);
    assert!(!state.online_data_available);
    assert_eq!(state.last_updated, None);
    assert_eq!(cached(&store), None);
}

#[tokio::test]
async fn slow_source_times_out_into_fallback() {
    let config = AppConfig { fetch_timeout_ms: 20, ..AppConfig::default() };
    let mut store = ProfileStore::new(MemoryStore::new(), &config);
    store.load(&FakeFetcher::new(Behavior::Slow)).await;

    let state = store.state();
    assert_eq!(state.profiles.len(), 8);
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to fetch data. Using sample data. (Request timed out after 20ms)")
    );
    assert!(!state.loading);
}

#[test]
fn superseded_load_is_dropped() {
    let mut store = store_with(MemoryStore::new());
    let first = store.begin_load().unwrap();
    let second = store.begin_load().unwrap();

    assert!(!store.finish_load(first, Ok(CSV.to_string())));
    assert!(store.state().loading);
    assert!(!store.state().has_profiles());

    assert!(store.finish_load(second, Ok(CSV.to_string())));
    assert!(!store.state().loading);
    assert_eq!(store.state().profiles.len(), 2);
}

#[test]
fn begin_load_clears_previous_error() {
    let mut store = store_with(MemoryStore::new());
    let ticket = store.begin_load().unwrap();
    store.finish_load(ticket, Err(ProfileError::Custom("down".into())));
    assert!(store.state().error.is_some());

    let ticket = store.begin_load().unwrap();
    assert!(ticket.is_fresh());
    assert_eq!(ticket.url(), "data/coffee-profiles.csv");
    assert!(store.state().loading);
    assert_eq!(store.state().error, None);
}

#[test]
fn aborted_load_shows_samples_and_cause() {
    let mut store = store_with(MemoryStore::new());
    let ticket = store.begin_load().unwrap();
    assert!(store.abort_load(ticket, ProfileError::TaskFailed("worker panicked".into())));

    let state = store.state();
    assert_eq!(state.profiles.len(), 8);
    assert_eq!(state.error.as_deref(), Some("Background task failed: worker panicked"));
    assert!(!state.loading);
}

#[tokio::test]
async fn storage_quota_does_not_abort_load() {
    let mut store = store_with(MemoryStore::with_quota(64));
    store.load(&FakeFetcher::new(Behavior::Text(CSV))).await;

    let state = store.state();
    assert_eq!(state.profiles.len(), 2);
    assert_eq!(state.error, None);
    assert_eq!(cached(&store), None);
}

#[tokio::test]
async fn cached_ids_are_made_unique() {
    let cache = r#"[{"id":"x","name":"A"},{"id":"x","name":"B"},{"name":"C"}]"#;
    let mut store = store_with(MemoryStore::with_entries([
        ("use_local_data", "true"),
        ("local_profiles", cache),
    ]));
    store.load(&FakeFetcher::new(Behavior::Fail("unused"))).await;

    let ids: HashSet<&str> = store.state().profiles.iter().map(|p| p.id()).collect();
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(""));
}

#[test]
fn theme_toggle_persists() {
    let mut store = store_with(MemoryStore::new());

    assert_eq!(store.toggle_theme(), Theme::Light);
    assert_eq!(store.storage().get_item("theme").unwrap().as_deref(), Some("light"));

    assert_eq!(store.toggle_theme(), Theme::Dark);
    assert_eq!(store.state().theme, Theme::Dark);
    assert_eq!(store.storage().get_item("theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn data_source_toggle_persists() {
    let mut store = store_with(MemoryStore::new());

    assert!(store.toggle_data_source());
    assert_eq!(store.storage().get_item("use_local_data").unwrap().as_deref(), Some("true"));

    assert!(!store.toggle_data_source());
    assert_eq!(store.storage().get_item("use_local_data").unwrap().as_deref(), Some("false"));
}

#[tokio::test]
async fn source_selection_filters_profiles() {
    let mut store = store_with(MemoryStore::new());
    store.load(&FakeFetcher::new(Behavior::Text(CSV))).await;

    store.set_source("Ethiopia");
    let filtered = store.filtered_profiles();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name(), "Coffee 1");

    store.set_source("NonExistentSource");
    assert!(store.filtered_profiles().is_empty());

    store.set_source("All");
    assert_eq!(store.filtered_profiles().len(), 2);
}

#[test]
fn sample_data_can_be_loaded_directly() {
    let mut store = store_with(MemoryStore::new());
    store.load_sample_data();
    assert_eq!(store.state().profiles.len(), 8);
    assert_eq!(store.state().sources[0], "All");
}

#[tokio::test]
async fn download_stores_offline_copy() {
    let mut store = store_with(MemoryStore::new());
    let progress = AtomicU8::new(0);
    let report = |p: u8| progress.store(p, Ordering::SeqCst);

    assert!(store.download_spreadsheet(&FakeFetcher::new(Behavior::Text(CSV)), &report).await);

    let state = store.state();
    assert!(!state.downloading);
    assert_eq!(state.download_progress, 100);
    assert_eq!(state.download_error, None);
    assert!(state.online_data_available);
    assert!(state.last_updated.is_some());
    // Not in local mode, so what is shown stays as it was.
    assert!(!state.has_profiles());
    assert_eq!(cached(&store).map(|p| p.len()), Some(2));
    assert_eq!(progress.load(Ordering::SeqCst), 100);

    store.reset_download_progress();
    assert_eq!(store.state().download_progress, 0);
}

#[tokio::test]
async fn download_in_local_mode_replaces_shown_profiles() {
    let mut store = store_with(MemoryStore::with_entries([("use_local_data", "true")]));
    assert!(store.download_spreadsheet(&FakeFetcher::new(Behavior::Text(CSV)), &ignore_progress).await);

    let state = store.state();
    assert_eq!(state.profiles.len(), 2);
    assert_eq!(state.sources, vec!["All", "Ethiopia", "Colombia"]);
}

#[tokio::test]
async fn download_failures_are_recorded() {
    let cases = [
        (Behavior::Text("name,source\n"), "Not enough rows in CSV data"),
        (Behavior::Text("name,source\nbad\""), "No profiles parsed from CSV data"),
        (Behavior::Fail("offline"), "offline"),
    ];

    for (behavior, message) in cases {
        let mut store = store_with(MemoryStore::new());
        assert!(!store.download_spreadsheet(&FakeFetcher::new(behavior), &ignore_progress).await);

        let state = store.state();
        assert!(!state.downloading);
        assert_eq!(state.download_error.as_deref(), Some(message));
        assert_eq!(state.last_updated, None);
        assert_eq!(cached(&store), None);
    }
}

#[test]
fn only_one_download_at_a_time() {
    let mut store = store_with(MemoryStore::new());
    let ticket = store.begin_download().unwrap();
    assert!(store.state().downloading);
    assert!(store.begin_download().is_none());

    assert!(!store.finish_download(ticket, Err(ProfileError::Custom("offline".into()))));
    assert!(store.begin_download().is_some());
}

#[test]
fn download_progress_is_clamped() {
    let mut store = store_with(MemoryStore::new());

    store.set_download_progress(40);
    assert_eq!(store.state().download_progress, 0);

    let _ticket = store.begin_download().unwrap();
    store.set_download_progress(40);
    assert_eq!(store.state().download_progress, 40);
    store.set_download_progress(250);
    assert_eq!(store.state().download_progress, 100);
}
