use std::{
    path::Path,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::constants::{
    DEFAULT_SPREADSHEET_URL,
    DOWNLOAD_PROGRESS_RESET_DELAY,
    FETCH_TIMEOUT,
    RETRY_COUNT,
};
use crate::persistence::{
    data_file_path,
    read_json_file,
    write_json_file,
};

pub const SETTINGS_FILE: &str = "settings.json";

/// User-editable settings, read from `settings.json` in the app data
/// directory. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the profiles CSV is read from: an `http(s)://` URL, a `file://`
    /// URL or a relative path, looked up in the working directory and then
    /// next to the executable.
    pub spreadsheet_url: String,
    pub fetch_timeout_ms: u64,
    pub retry_count: u32,
    pub download_reset_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            spreadsheet_url: DEFAULT_SPREADSHEET_URL.to_string(),
            fetch_timeout_ms: FETCH_TIMEOUT.as_millis() as u64,
            retry_count: RETRY_COUNT,
            download_reset_delay_ms: DOWNLOAD_PROGRESS_RESET_DELAY.as_millis() as u64,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::load_from(&data_file_path(SETTINGS_FILE))
    }

    /// Reads settings from `path`, writing the defaults there on first run so
    /// there is a file to edit. An unreadable file means defaults.
    pub fn load_from(path: &Path) -> Self {
        match read_json_file::<AppConfig>(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                let defaults = Self::default();
                if let Err(e) = write_json_file(path, &defaults) {
                    tracing::warn!("Failed to write default settings: {e}");
                }
                defaults
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {e}. Using defaults.", path.display());
                Self::default()
            }
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn download_reset_delay(&self) -> Duration {
        Duration::from_millis(self.download_reset_delay_ms)
    }
}
