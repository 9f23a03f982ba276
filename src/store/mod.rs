//! Application state container.
//!
//! [`ProfileStore`] owns the observable [`ProfileState`] together with the
//! key-value storage it mirrors into. The front end reads through
//! [`ProfileStore::state`] and changes things only through the operations
//! defined here and in the `loader` and `download` modules.

mod download;
mod loader;
mod state;

#[cfg(test)]
mod tests;

use std::time::Duration;

use chrono::{
    SecondsFormat,
    Utc,
};
pub use download::DownloadTicket;
pub use loader::LoadTicket;
pub use state::ProfileState;

use crate::{
    core::{
        constants::{
            defaults,
            storage_keys,
        },
        profiles::{
            distinct_sources,
            ensure_unique_ids,
        },
        sample_data::sample_profiles,
        AppConfig,
        CoffeeProfile,
        Theme,
    },
    persistence::{
        get_storage_item,
        set_storage_item,
        KeyValueStore,
    },
};

pub struct ProfileStore<S: KeyValueStore> {
    state: ProfileState,
    storage: S,
    fetch_timeout: Duration,
    load_generation: u64,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Builds the initial state, restoring saved preferences from `storage`.
    pub fn new(storage: S, config: &AppConfig) -> Self {
        let theme = get_storage_item(&storage, storage_keys::THEME)
            .map(|value| Theme::from_stored(&value))
            .unwrap_or_else(|| Theme::from_stored(defaults::THEME));
        let last_updated = get_storage_item(&storage, storage_keys::LAST_UPDATED);
        let use_local_data = get_storage_item(&storage, storage_keys::USE_LOCAL_DATA)
            .unwrap_or_else(|| defaults::USE_LOCAL_DATA.to_string())
            == "true";

        let state = ProfileState {
            theme,
            last_updated,
            use_local_data,
            spreadsheet_url: config.spreadsheet_url.clone(),
            ..ProfileState::default()
        };

        Self { state, storage, fetch_timeout: config.fetch_timeout(), load_generation: 0 }
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn filtered_profiles(&self) -> Vec<&CoffeeProfile> {
        self.state.filtered_profiles()
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.state.selected_source = source.into();
    }

    /// Switches between light and dark and remembers the choice.
    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        set_storage_item(&mut self.storage, storage_keys::THEME, self.state.theme.as_str());
        tracing::debug!("Theme set to {}", self.state.theme);
        self.state.theme
    }

    /// Flips between the cached copy and a fresh read of the sheet. Callers
    /// reload afterwards.
    pub fn toggle_data_source(&mut self) -> bool {
        self.state.use_local_data = !self.state.use_local_data;
        let value = if self.state.use_local_data { "true" } else { "false" };
        set_storage_item(&mut self.storage, storage_keys::USE_LOCAL_DATA, value);

        if self.state.use_local_data {
            tracing::info!("Switched to locally stored profiles");
        } else {
            tracing::info!("Switched to fresh reads from {}", self.state.spreadsheet_url);
        }
        self.state.use_local_data
    }

    pub fn load_sample_data(&mut self) {
        self.adopt(sample_profiles());
    }

    fn adopt(&mut self, mut profiles: Vec<CoffeeProfile>) {
        ensure_unique_ids(&mut profiles);
        self.state.sources = distinct_sources(&profiles);
        self.state.profiles = profiles;
    }

    fn touch_last_updated(&mut self) {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        set_storage_item(&mut self.storage, storage_keys::LAST_UPDATED, &now);
        self.state.last_updated = Some(now);
    }
}
