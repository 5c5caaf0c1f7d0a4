//! Load, run, save.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::history::History;
use crate::operations::Operation;
use crate::runner::{RunReport, Runner};
use crate::storage::{FileStorage, Storage};
use crate::store::RecordStore;
use tracing::info;

/// An editing session over a storage backend.
///
/// The store is loaded once when the session opens and written back once by
/// [`Session::save`] or [`Session::close`]; nothing is persisted in between.
pub struct Session<S: Storage> {
    storage: S,
    runner: Runner,
}

impl Session<FileStorage> {
    /// Open a file-backed session described by `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::open(config.storage())
    }
}

impl<S: Storage> Session<S> {
    /// Load all records from `storage`.
    pub fn open(mut storage: S) -> Result<Self> {
        let store = RecordStore::from_lines(storage.load()?)?;
        info!(records = store.len(), "session opened");
        Ok(Self {
            storage,
            runner: Runner::new(store),
        })
    }

    /// Run a batch against the loaded records.
    pub fn run<I>(&mut self, operations: I) -> RunReport
    where
        I: IntoIterator<Item = Operation>,
    {
        self.runner.run(operations)
    }

    pub fn store(&self) -> &RecordStore {
        self.runner.store()
    }

    pub fn history(&self) -> &History {
        self.runner.history()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist the current snapshot.
    pub fn save(&mut self) -> Result<()> {
        let lines = self.runner.store().to_lines();
        self.storage.save(&lines)
    }

    /// Persist and hand back the final store and storage.
    pub fn close(mut self) -> Result<(RecordStore, S)> {
        self.save()?;
        Ok((self.runner.into_store(), self.storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_open_run_close() {
        let storage = MemoryStorage::with_lines(["Ann Lee ann@lee.com"]);
        let mut session = Session::open(storage).unwrap();

        let report = session.run(vec![
            Operation::add("bob ray bob@ray.com"),
            Operation::delete("1"),
        ]);
        assert_eq!(report.applied_count(), 2);
        assert_eq!(session.storage().save_count(), 0);

        let (store, storage) = session.close().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(storage.lines(), ["Bob Ray bob@ray.com".to_string()]);
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn test_open_rejects_malformed_lines() {
        let storage = MemoryStorage::with_lines(["Ann Lee ann@lee.com", "garbage"]);
        let err = Session::open(storage).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }
}
