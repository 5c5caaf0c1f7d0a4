//! Persistent storage for the record collection.
//!
//! The engine touches storage twice per session: one bulk load before a
//! batch and one full overwrite after it.

use crate::error::{Result, StoreError};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Line-oriented storage backend.
pub trait Storage {
    /// Read every stored line, trailing whitespace trimmed.
    fn load(&mut self) -> Result<Vec<String>>;

    /// Replace the stored content with `lines`.
    fn save(&mut self, lines: &[String]) -> Result<()>;
}

/// Plain text file, one record per line.
///
/// The first load takes an exclusive lock on a sibling `.lock` file, held
/// until the storage is dropped. The lock file itself is left on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    create_if_missing: bool,
    lock: Option<File>,
}

impl FileStorage {
    /// Open storage at `path`, creating the file on first load if absent.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            create_if_missing: true,
            lock: None,
        }
    }

    /// Whether a missing file is created (true) or reported as an error.
    pub fn with_create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this storage holds the data file lock.
    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    fn acquire_lock(&mut self) -> Result<()> {
        if self.lock.is_some() {
            return Ok(());
        }
        let lock_file = File::create(self.sibling(".lock"))?;
        lock_file
            .try_lock_exclusive()
            .map_err(|_| StoreError::Locked(self.path.display().to_string()))?;
        self.lock = Some(lock_file);
        Ok(())
    }

    fn create_empty(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        File::create(&self.path)?;
        info!(path = %self.path.display(), "data file not found, created empty file");
        Ok(())
    }
}

impl Storage for FileStorage {
    fn load(&mut self) -> Result<Vec<String>> {
        if !self.path.exists() {
            if !self.create_if_missing {
                return Err(StoreError::NotFound(self.path.display().to_string()));
            }
            self.create_empty()?;
            self.acquire_lock()?;
            return Ok(Vec::new());
        }

        self.acquire_lock()?;
        let content = fs::read_to_string(&self.path)?;
        let lines: Vec<String> = content.lines().map(|l| l.trim_end().to_string()).collect();
        info!(path = %self.path.display(), lines = lines.len(), "loaded data file");
        Ok(lines)
    }

    /// Write to a sibling temporary file and rename it over the target, so
    /// the file holds either the old or the new snapshot. A failed save
    /// removes the temporary file.
    fn save(&mut self, lines: &[String]) -> Result<()> {
        let temp = self.temp_path();
        if let Err(e) = write_snapshot(&temp, lines).and_then(|()| fs::rename(&temp, &self.path)) {
            if temp.exists() {
                let _ = fs::remove_file(&temp);
            }
            return Err(e.into());
        }
        info!(path = %self.path.display(), lines = lines.len(), "saved data file");
        Ok(())
    }
}

fn write_snapshot(path: &Path, lines: &[String]) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    writer.get_ref().sync_all()
}

/// In-memory storage, mainly for tests and dry runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    lines: Vec<String>,
    saves: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            saves: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Storage for MemoryStorage {
    fn load(&mut self) -> Result<Vec<String>> {
        Ok(self.lines.iter().map(|l| l.trim_end().to_string()).collect())
    }

    fn save(&mut self, lines: &[String]) -> Result<()> {
        self.lines = lines.to_vec();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dataStore.txt");
        let mut storage = FileStorage::new(&path);

        assert!(storage.load().unwrap().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file_not_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataStore.txt");
        let mut storage = FileStorage::new(&path).with_create_if_missing(false);

        assert_eq!(storage.load().unwrap_err().kind(), ErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataStore.txt");
        let mut storage = FileStorage::new(&path);

        let lines = vec!["Ann Lee ann@lee.com".to_string(), "Bob Ray bob@ray.com".to_string()];
        storage.save(&lines).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Ann Lee ann@lee.com\nBob Ray bob@ray.com\n");
        assert_eq!(FileStorage::new(&path).load().unwrap(), lines);
        assert!(!storage.temp_path().exists());
    }

    #[test]
    fn test_second_loader_is_locked_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataStore.txt");
        let mut first = FileStorage::new(&path);
        first.load().unwrap();
        assert!(first.is_locked());

        let err = FileStorage::new(&path).load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Locked);

        drop(first);
        assert!(FileStorage::new(&path).load().is_ok());
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        // A directory at the target path makes the final rename fail.
        let path = dir.path().join("dataStore.txt");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut storage = FileStorage::new(&path);
        let err = storage.save(&["a b c@d.com".to_string()]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!storage.temp_path().exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_lock_file_outlives_storage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataStore.txt");
        let mut storage = FileStorage::new(&path);
        storage.load().unwrap();
        drop(storage);

        assert!(dir.path().join("dataStore.txt.lock").exists());
        assert!(FileStorage::new(&path).load().is_ok());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataStore.txt");
        let mut storage = FileStorage::new(&path);

        storage.save(&["a b c@d.com".to_string(), "e f g@h.com".to_string()]).unwrap();
        storage.save(&["x y z@w.com".to_string()]).unwrap();
        assert_eq!(storage.load().unwrap(), vec!["x y z@w.com"]);
    }

    #[test]
    fn test_load_trims_trailing_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataStore.txt");
        fs::write(&path, "Ann Lee ann@lee.com  \r\nBob Ray bob@ray.com\t\n").unwrap();

        let lines = FileStorage::new(&path).load().unwrap();
        assert_eq!(lines, vec!["Ann Lee ann@lee.com", "Bob Ray bob@ray.com"]);
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::with_lines(["a b c@d.com "]);
        assert_eq!(storage.load().unwrap(), vec!["a b c@d.com"]);
        storage.save(&[]).unwrap();
        assert!(storage.lines().is_empty());
        assert_eq!(storage.save_count(), 1);
    }
}
