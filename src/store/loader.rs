use super::ProfileStore;
use crate::{
    core::{
        constants::storage_keys,
        csv::parse_csv,
        http::{
            fetch_with_timeout,
            TextFetcher,
        },
        profiles::map_rows,
        sample_data::sample_profiles,
        CoffeeProfile,
        ProfileError,
    },
    persistence::{
        get_storage_json,
        set_storage_json,
        KeyValueStore,
    },
};

/// A fetch the store asked for. Hand it back to
/// [`ProfileStore::finish_load`] or [`ProfileStore::abort_load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    url: String,
    fresh: bool,
}

impl LoadTicket {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// True when the result replaces the offline copy.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }
}

/// Messages used when fetched text is rejected.
pub(super) struct Rejections {
    pub not_enough_rows: &'static str,
    pub no_profiles: &'static str,
}

pub(super) const LOAD_REJECTIONS: Rejections = Rejections {
    not_enough_rows: "Invalid CSV data: Not enough rows",
    no_profiles: "No profiles found in the data",
};

pub(super) fn profiles_from_text(
    text: &str,
    rejections: &Rejections,
) -> Result<Vec<CoffeeProfile>, ProfileError> {
    if text.is_empty() {
        return Err(ProfileError::EmptyResponse);
    }

    let rows = parse_csv(text);
    if rows.len() < 2 {
        return Err(ProfileError::NotEnoughRows(rejections.not_enough_rows));
    }

    let profiles = map_rows(&rows);
    if profiles.is_empty() {
        return Err(ProfileError::NoProfiles(rejections.no_profiles));
    }

    Ok(profiles)
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Starts a load. Returns `None` when the offline copy was used directly
    /// and there is nothing to fetch.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        self.load_generation += 1;
        self.state.loading = true;
        self.state.error = None;

        if self.state.use_local_data {
            if let Some(cached) = self.cached_profiles() {
                tracing::info!("Using {} locally stored profiles", cached.len());
                self.adopt(cached);
                self.state.loading = false;
                return None;
            }
            tracing::info!("No locally stored profiles, fetching instead");
        }

        tracing::info!("Loading profiles from {}", self.state.spreadsheet_url);
        Some(LoadTicket {
            generation: self.load_generation,
            url: self.state.spreadsheet_url.clone(),
            fresh: !self.state.use_local_data,
        })
    }

    /// Applies a fetch result. Returns false if a newer load superseded this
    /// one and the result was dropped.
    pub fn finish_load(&mut self, ticket: LoadTicket, fetched: Result<String, ProfileError>) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!("Dropping result of superseded load {}", ticket.generation);
            return false;
        }

        match fetched.and_then(|text| profiles_from_text(&text, &LOAD_REJECTIONS)) {
            Ok(profiles) => {
                tracing::info!("Loaded {} profiles", profiles.len());
                self.adopt(profiles);
                if ticket.fresh {
                    self.state.online_data_available = true;
                    set_storage_json(
                        &mut self.storage,
                        storage_keys::LOCAL_PROFILES,
                        &self.state.profiles,
                    );
                    self.touch_last_updated();
                }
            }
            Err(e) => self.fall_back(&e),
        }

        self.state.loading = false;
        true
    }

    /// For loads that never produced a result at all.
    pub fn abort_load(&mut self, ticket: LoadTicket, error: ProfileError) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }

        tracing::error!("Profile load failed to run: {error}");
        self.load_sample_data();
        self.state.error = Some(error.to_string());
        self.state.loading = false;
        true
    }

    /// Fetches and applies in one go. Never fails; afterwards there is
    /// always something to show.
    pub async fn load<F: TextFetcher>(&mut self, fetcher: &F) {
        let Some(ticket) = self.begin_load() else {
            return;
        };
        let fetched = fetch_with_timeout(fetcher.fetch_text(ticket.url()), self.fetch_timeout).await;
        self.finish_load(ticket, fetched);
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.load_generation
    }

    fn cached_profiles(&self) -> Option<Vec<CoffeeProfile>> {
        get_storage_json::<Vec<CoffeeProfile>, _>(&self.storage, storage_keys::LOCAL_PROFILES)
            .filter(|profiles| !profiles.is_empty())
    }

    fn fall_back(&mut self, cause: &ProfileError) {
        tracing::warn!("Error loading profiles: {cause}");

        if let Some(cached) = self.cached_profiles() {
            self.adopt(cached);
            self.state.error =
                Some(format!("Failed to fetch data. Using locally stored data. ({cause})"));
        } else {
            self.adopt(sample_profiles());
            self.state.error = Some(format!("Failed to fetch data. Using sample data. ({cause})"));
        }
    }
}
