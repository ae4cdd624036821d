//! Atomic TOML file operations.
//!
//! Readers never observe a half-written file: every save goes through a
//! temporary sibling, fsync and rename. Read-modify-write cycles are
//! serialized with an exclusive lock on a `.lock` sibling.

use contractor_core::error::ContractorError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during atomic TOML operations.
#[derive(Debug, Error)]
pub enum AtomicTomlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Lock error: {0}")]
    Lock(String),

    /// The update closure refused the change.
    #[error("{0}")]
    Rejected(ContractorError),
}

impl From<AtomicTomlError> for ContractorError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Serialize(e) => e.into(),
            AtomicTomlError::Lock(message) => ContractorError::data_access(message),
            AtomicTomlError::Rejected(inner) => inner,
        }
    }
}

/// A handle to a TOML file updated atomically.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Writes `data` via a temporary file and an atomic rename.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Runs a locked read-modify-write cycle.
    ///
    /// `f` receives the current data (or `default_value` when the file is
    /// missing). The file is only rewritten when `f` succeeds; its return
    /// value is passed through.
    pub fn update<R, F>(&self, default_value: T, f: F) -> Result<R, AtomicTomlError>
    where
        F: FnOnce(&mut T) -> Result<R, AtomicTomlError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let result = f(&mut data)?;
        self.save(&data)?;

        Ok(result)
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicTomlError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// Exclusive lock held for the guard's lifetime.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        fs2::FileExt::lock_exclusive(&file)
            .map_err(|e| AtomicTomlError::Lock(format!("Failed to acquire lock: {}", e)))?;

        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
        label: String,
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("missing.toml"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/counter.toml");
        let file = AtomicTomlFile::new(path.clone());

        let data = Counter {
            value: 3,
            label: "три".to_string(),
        };
        file.save(&data).unwrap();

        assert_eq!(file.load().unwrap(), Some(data));
        assert!(!path.with_file_name(".counter.toml.tmp").exists());
    }

    #[test]
    fn test_update_returns_closure_value() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        for _ in 0..3 {
            file.update(Counter::default(), |c| {
                c.value += 1;
                Ok(c.value)
            })
            .unwrap();
        }
        let last = file
            .update(Counter::default(), |c| {
                c.value += 1;
                Ok(c.value)
            })
            .unwrap();
        assert_eq!(last, 4);
    }

    #[test]
    fn test_rejected_update_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));
        file.save(&Counter {
            value: 1,
            label: String::new(),
        })
        .unwrap();

        let err = file
            .update(Counter::default(), |c| -> Result<(), AtomicTomlError> {
                c.value = 100;
                Err(AtomicTomlError::Rejected(ContractorError::internal("no")))
            })
            .unwrap_err();

        assert!(matches!(ContractorError::from(err), ContractorError::Internal(_)));
        assert_eq!(file.load().unwrap().unwrap().value, 1);
    }
}
