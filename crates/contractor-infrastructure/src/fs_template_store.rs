//! Directory-backed template store.

use async_trait::async_trait;
use contractor_core::error::Result;
use contractor_core::template::TemplateStore;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

/// Reads templates from `{dir}/{template_id}.{extension}`.
pub struct FsTemplateStore {
    dir: PathBuf,
    extension: String,
}

impl FsTemplateStore {
    pub fn new(dir: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            dir,
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn template_path(&self, template_id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", template_id, self.extension))
    }
}

#[async_trait]
impl TemplateStore for FsTemplateStore {
    async fn load(&self, template_id: &str) -> Result<Option<String>> {
        // Ids are file stems; anything that could escape the directory is
        // simply not a template.
        if template_id.is_empty()
            || template_id.contains(['/', '\\'])
            || template_id.contains("..")
        {
            return Ok(None);
        }

        match fs::read_to_string(self.template_path(template_id)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_reads_by_id_and_extension() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("agent_template.txt"), "Договор {{CONTRACT_NAME}}")
            .unwrap();
        let store = FsTemplateStore::new(temp_dir.path().to_path_buf(), "txt");

        assert_eq!(
            store.load("agent_template").await.unwrap().as_deref(),
            Some("Договор {{CONTRACT_NAME}}")
        );
        assert!(store.exists("agent_template").await.unwrap());
        assert!(store.load("delivery_template").await.unwrap().is_none());
        assert!(store.load("../agent_template").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_tolerates_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["subagent_template.txt", "agent_template.txt"] {
            std::fs::write(temp_dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(temp_dir.path().join("archive")).unwrap();

        let store = FsTemplateStore::new(temp_dir.path().to_path_buf(), "txt");
        assert_eq!(
            store.list().await.unwrap(),
            vec!["agent_template.txt", "subagent_template.txt"]
        );

        let missing = FsTemplateStore::new(temp_dir.path().join("nope"), "txt");
        assert!(missing.list().await.unwrap().is_empty());
    }
}
