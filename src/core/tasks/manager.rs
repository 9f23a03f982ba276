use std::{
    panic::{
        self,
        AssertUnwindSafe,
    },
    sync::{
        mpsc,
        Arc,
    },
    thread,
    time::Duration,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    core::{
        http::{
            fetch_with_timeout,
            http_client,
            FileFetcher,
            HttpFetcher,
            SourceFetcher,
            TextFetcher,
        },
        AppConfig,
        ProfileError,
    },
    store::{
        DownloadTicket,
        LoadTicket,
    },
};

/// Runs fetches off the GUI thread. Results come back through
/// [`TaskManager::poll_results`].
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    fetcher: Arc<SourceFetcher>,
    fetch_timeout: Duration,
}

impl TaskManager {
    pub fn new(config: &AppConfig) -> Result<Self, ProfileError> {
        let client = http_client(config.fetch_timeout())?;
        let fetcher = SourceFetcher::new(
            HttpFetcher::new(client).with_retry_count(config.retry_count),
            FileFetcher::installed(),
        );
        Self::with_fetcher(fetcher, config.fetch_timeout())
    }

    pub fn with_fetcher(fetcher: SourceFetcher, fetch_timeout: Duration) -> Result<Self, ProfileError> {
        let runtime = Arc::new(Runtime::new()?);
        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, fetcher: Arc::new(fetcher), fetch_timeout })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>, Arc<SourceFetcher>) {
        (self.sender.clone(), self.runtime.clone(), self.fetcher.clone())
    }

    /// Fetches the text for `ticket`. An error means no worker was started
    /// and nothing will be reported for this ticket.
    pub fn fetch_profiles(&self, ticket: &LoadTicket) -> Result<(), ProfileError> {
        let (sender, runtime, fetcher) = self.task_context();
        let timeout = self.fetch_timeout;
        let ticket = ticket.clone();

        thread::Builder::new().name("profile-fetch".into()).spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                runtime.block_on(fetch_with_timeout(fetcher.fetch_text(ticket.url()), timeout))
            }));

            let result = match outcome {
                Ok(fetched) => TaskResult::ProfilesFetched { ticket, fetched },
                Err(_) => TaskResult::LoadAborted {
                    ticket,
                    error: ProfileError::TaskFailed("profile fetch panicked".to_string()),
                },
            };
            let _ = sender.send(result);
        })?;

        Ok(())
    }

    /// Downloads the sheet for `ticket`, sending
    /// [`TaskResult::DownloadProgress`] updates along the way.
    pub fn download_profiles(&self, ticket: &DownloadTicket) -> Result<(), ProfileError> {
        let (sender, runtime, fetcher) = self.task_context();
        let timeout = self.fetch_timeout;
        let ticket = ticket.clone();

        thread::Builder::new().name("profile-download".into()).spawn(move || {
            let progress_sender = sender.clone();
            let report = move |percent: u8| {
                let _ = progress_sender.send(TaskResult::DownloadProgress(percent));
            };

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                runtime.block_on(fetch_with_timeout(
                    fetcher.fetch_text_with_progress(ticket.url(), &report),
                    timeout,
                ))
            }));

            let fetched = outcome.unwrap_or_else(|_| {
                Err(ProfileError::TaskFailed("profile download panicked".to_string()))
            });
            let _ = sender.send(TaskResult::Downloaded { ticket, fetched });
        })?;

        Ok(())
    }
}
