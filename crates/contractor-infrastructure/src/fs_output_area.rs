//! Directory-backed output area.

use async_trait::async_trait;
use contractor_core::document::OutputArea;
use contractor_core::error::{ContractorError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Upper bound on `_N` suffixes tried for one file name.
const MAX_COLLISION_SUFFIX: u32 = 1000;

/// Writes generated documents into one directory.
///
/// Locations are absolute-or-relative file paths as strings, exactly as
/// handed back by `write`.
pub struct FsOutputArea {
    dir: PathBuf,
}

impl FsOutputArea {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// `name.ext`, then `name_1.ext`, `name_2.ext`, ...
    fn candidate(&self, file_name: &str, attempt: u32) -> PathBuf {
        if attempt == 0 {
            return self.dir.join(file_name);
        }
        let path = Path::new(file_name);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match path.extension() {
            Some(ext) => self
                .dir
                .join(format!("{}_{}.{}", stem, attempt, ext.to_string_lossy())),
            None => self.dir.join(format!("{}_{}", stem, attempt)),
        }
    }
}

#[async_trait]
impl OutputArea for FsOutputArea {
    async fn write(&self, file_name: &str, content: &str) -> Result<String> {
        fs::create_dir_all(&self.dir).await?;

        for attempt in 0..=MAX_COLLISION_SUFFIX {
            let path = self.candidate(file_name, attempt);
            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = write_all(&mut file, content).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(e);
            }

            tracing::debug!(path = %path.display(), "Document written");
            return Ok(path.to_string_lossy().into_owned());
        }

        Err(ContractorError::io(format!(
            "No free file name for {} in {}",
            file_name,
            self.dir.display()
        )))
    }

    async fn discard(&self, location: &str) -> Result<()> {
        match fs::remove_file(location).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&self) -> Result<usize> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }
        tracing::info!(removed, dir = %self.dir.display(), "Output area cleared");
        Ok(removed)
    }
}

async fn write_all(file: &mut fs::File, content: &str) -> Result<()> {
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}
