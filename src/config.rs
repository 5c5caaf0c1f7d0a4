//! Engine configuration.

use crate::logging::Profile;
use crate::storage::FileStorage;
use std::path::PathBuf;

/// Default data file name.
pub const DEFAULT_DATA_FILE: &str = "dataStore.txt";

/// Environment variable overriding the data file path.
pub const DATA_PATH_ENV: &str = "RECORDBOOK_DATA";

/// Engine configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Path of the record file.
    pub data_path: PathBuf,

    /// Whether to create the record file if it doesn't exist.
    pub create_if_missing: bool,

    /// Log output format.
    pub log_profile: Profile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            create_if_missing: true,
            log_profile: Profile::default(),
        }
    }
}

impl EngineConfig {
    /// File storage described by this configuration.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_path).with_create_if_missing(self.create_if_missing)
    }
}
