pub mod storage;

use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};

pub use storage::{
    get_storage_item,
    get_storage_json,
    set_storage_item,
    set_storage_json,
    FileStore,
    KeyValueStore,
    MemoryStore,
};

use crate::core::ProfileError;

const APP_NAME: &str = "coffee-profiles";

/// Per-user directory holding the settings and storage files. Falls back to
/// the working directory when the platform has no data dir.
pub fn app_data_dir() -> PathBuf {
    dirs::data_local_dir().map(|dir| dir.join(APP_NAME)).unwrap_or_else(|| PathBuf::from("."))
}

pub fn data_file_path(filename: &str) -> PathBuf {
    app_data_dir().join(filename)
}

/// `Ok(None)` when the file does not exist.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ProfileError> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&json)?))
}

/// Writes `value` as pretty JSON, creating parent directories as needed.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ProfileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
