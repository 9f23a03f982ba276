use std::sync::atomic::{
    AtomicU8,
    Ordering,
};

use super::{
    loader::{
        profiles_from_text,
        Rejections,
    },
    ProfileStore,
};
use crate::{
    core::{
        constants::storage_keys,
        http::{
            fetch_with_timeout,
            TextFetcher,
        },
        profiles::ensure_unique_ids,
        ProfileError,
    },
    persistence::{
        set_storage_json,
        KeyValueStore,
    },
};

const DOWNLOAD_REJECTIONS: Rejections = Rejections {
    not_enough_rows: "Not enough rows in CSV data",
    no_profiles: "No profiles parsed from CSV data",
};

/// An in-flight download of the sheet into the offline copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTicket {
    url: String,
}

impl DownloadTicket {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Returns `None` while another download is still running.
    pub fn begin_download(&mut self) -> Option<DownloadTicket> {
        if self.state.downloading {
            tracing::debug!("Download already in progress");
            return None;
        }

        self.state.downloading = true;
        self.state.download_error = None;
        self.state.download_progress = 0;
        tracing::info!("Downloading profiles from {}", self.state.spreadsheet_url);

        Some(DownloadTicket { url: self.state.spreadsheet_url.clone() })
    }

    pub fn set_download_progress(&mut self, percent: u8) {
        if self.state.downloading {
            self.state.download_progress = percent.min(100);
        }
    }

    /// Stores the downloaded profiles as the offline copy. Returns whether
    /// the download succeeded.
    pub fn finish_download(
        &mut self,
        _ticket: DownloadTicket,
        fetched: Result<String, ProfileError>,
    ) -> bool {
        let succeeded = match fetched.and_then(|text| profiles_from_text(&text, &DOWNLOAD_REJECTIONS))
        {
            Ok(mut profiles) => {
                ensure_unique_ids(&mut profiles);
                set_storage_json(&mut self.storage, storage_keys::LOCAL_PROFILES, &profiles);
                self.touch_last_updated();
                self.state.online_data_available = true;
                tracing::info!("Downloaded {} profiles for offline use", profiles.len());

                if self.state.use_local_data {
                    self.adopt(profiles);
                }
                self.state.download_progress = 100;
                true
            }
            Err(e) => {
                tracing::warn!("Error downloading spreadsheet: {e}");
                self.state.download_error = Some(e.to_string());
                false
            }
        };

        self.state.downloading = false;
        succeeded
    }

    pub fn reset_download_progress(&mut self) {
        self.state.download_progress = 0;
    }

    /// Downloads the sheet and stores it locally, forwarding progress to
    /// `on_progress` as it arrives.
    pub async fn download_spreadsheet<F: TextFetcher>(
        &mut self,
        fetcher: &F,
        on_progress: &(dyn Fn(u8) + Send + Sync),
    ) -> bool {
        let Some(ticket) = self.begin_download() else {
            return false;
        };

        let highest = AtomicU8::new(0);
        let report = |percent: u8| {
            highest.fetch_max(percent, Ordering::Relaxed);
            on_progress(percent);
        };
        let fetched =
            fetch_with_timeout(fetcher.fetch_text_with_progress(ticket.url(), &report), self.fetch_timeout)
                .await;

        self.set_download_progress(highest.load(Ordering::Relaxed));
        self.finish_download(ticket, fetched)
    }
}
