use crate::core::{
    constants::{
        ALL_SOURCES,
        DEFAULT_SPREADSHEET_URL,
    },
    profiles::filter_by_source,
    CoffeeProfile,
    Theme,
};

/// Everything the front end renders. Only [`super::ProfileStore`] writes to
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub profiles: Vec<CoffeeProfile>,
    pub loading: bool,
    /// Advisory message after a degraded load.
    pub error: Option<String>,
    pub sources: Vec<String>,
    pub selected_source: String,
    pub theme: Theme,
    /// ISO-8601 time of the last successful fetch or download.
    pub last_updated: Option<String>,
    pub use_local_data: bool,
    pub online_data_available: bool,
    pub spreadsheet_url: String,

    pub downloading: bool,
    pub download_progress: u8,
    pub download_error: Option<String>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
            loading: false,
            error: None,
            sources: Vec::new(),
            selected_source: ALL_SOURCES.to_string(),
            theme: Theme::default(),
            last_updated: None,
            use_local_data: false,
            online_data_available: false,
            spreadsheet_url: DEFAULT_SPREADSHEET_URL.to_string(),
            downloading: false,
            download_progress: 0,
            download_error: None,
        }
    }
}

impl ProfileState {
    pub fn filtered_profiles(&self) -> Vec<&CoffeeProfile> {
        filter_by_source(&self.profiles, &self.selected_source)
    }

    pub fn has_profiles(&self) -> bool {
        !self.profiles.is_empty()
    }
}
