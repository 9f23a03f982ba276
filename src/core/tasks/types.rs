use crate::{
    core::ProfileError,
    store::{
        DownloadTicket,
        LoadTicket,
    },
};

pub type FetchResult = Result<String, ProfileError>;

#[derive(Debug)]
pub enum TaskResult {
    ProfilesFetched { ticket: LoadTicket, fetched: FetchResult },
    /// The fetch never produced a result, e.g. its worker panicked.
    LoadAborted { ticket: LoadTicket, error: ProfileError },

    DownloadProgress(u8),
    Downloaded { ticket: DownloadTicket, fetched: FetchResult },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::ProfilesFetched { .. } => "profiles_fetched",
            TaskResult::LoadAborted { .. } => "load_aborted",
            TaskResult::DownloadProgress(_) => "download_progress",
            TaskResult::Downloaded { .. } => "downloaded",
        }
    }
}
