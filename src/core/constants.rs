use std::time::Duration;

/// Public CSV export of the shared coffee profiles sheet. Usable wherever the
/// request does not go through a browser sandbox.
pub const REMOTE_SPREADSHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1mi-YS6JYfbX3wN1kZd6iu_q6mFlWM4Ah6N3Ox8eqRCA/export?format=csv&gid=0";

/// CSV bundled with the application.
pub const LOCAL_CSV_PATH: &str = "data/coffee-profiles.csv";

pub const DEFAULT_SPREADSHEET_URL: &str = LOCAL_CSV_PATH;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
pub const RETRY_COUNT: u32 = 2;
pub const DOWNLOAD_PROGRESS_RESET_DELAY: Duration = Duration::from_secs(2);

pub const ALL_SOURCES: &str = "All";

pub mod storage_keys {
    pub const THEME: &str = "theme";
    pub const LAST_UPDATED: &str = "last_updated";
    pub const LOCAL_PROFILES: &str = "local_profiles";
    pub const USE_LOCAL_DATA: &str = "use_local_data";
}

pub mod defaults {
    pub const THEME: &str = "dark";
    pub const USE_LOCAL_DATA: &str = "false";
}
