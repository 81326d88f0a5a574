//! JSON file storage.
//!
//! Layout under the data directory:
//!
//! ```text
//! data/
//! ├── scripts.json                   {"scripts": [...]}
//! ├── versions_20240501140322.json   [...]
//! └── versions_20240502091500.json   [...]
//! ```

use crate::VersionStore;
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use storyscribe_core::{Script, ScriptId, ScriptIndex, Version, assign_legacy_numbers};
use storyscribe_error::{JsonError, StorageError, StorageErrorKind, StoryscribeResult};

const SCRIPTS_FILE: &str = "scripts.json";

/// Filesystem storage backend.
///
/// Documents are pretty-printed UTF-8 JSON with non-ASCII text kept as is.
/// Writes go to `{file}.tmp` and are renamed over the target.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    base_path: PathBuf,
}

impl FileSystemStore {
    /// Create a new filesystem store.
    ///
    /// Creates the data directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StoryscribeResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened filesystem store");
        Ok(Self { base_path })
    }

    /// Root data directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the script collection file.
    pub fn scripts_path(&self) -> PathBuf {
        self.base_path.join(SCRIPTS_FILE)
    }

    /// Path of a script's version file.
    ///
    /// # Errors
    ///
    /// Returns error if the id is empty or could name a file outside the data directory.
    pub fn versions_path(&self, script_id: &ScriptId) -> StoryscribeResult<PathBuf> {
        let id = script_id.as_str();
        if id.is_empty()
            || id.contains("..")
            || id.contains('/')
            || id.contains('\\')
            || id.contains('\0')
        {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "script id '{}' cannot be used as a file name",
                id
            )))
            .into());
        }
        Ok(self.base_path.join(format!("versions_{}.json", id)))
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> StoryscribeResult<Option<T>> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No existing file, treating as empty");
                return Ok(None);
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        let value = serde_json::from_str(&contents)
            .map_err(|e| JsonError::new(format!("Failed to parse {}: {}", path.display(), e)))?;
        Ok(Some(value))
    }

    async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoryscribeResult<()> {
        let contents = serde_json::to_string_pretty(value).map_err(|e| {
            JsonError::new(format!("Failed to serialize {}: {}", path.display(), e))
        })?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, contents).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl VersionStore for FileSystemStore {
    #[tracing::instrument(skip(self), fields(path = %self.base_path.display()))]
    async fn load_scripts(&self) -> StoryscribeResult<Vec<Script>> {
        let index: ScriptIndex = Self::read_json(&self.scripts_path())
            .await?
            .unwrap_or_default();
        tracing::debug!(count = index.scripts.len(), "Loaded scripts");
        Ok(index.scripts)
    }

    #[tracing::instrument(skip(self, scripts), fields(count = scripts.len()))]
    async fn save_scripts(&self, scripts: &[Script]) -> StoryscribeResult<()> {
        let index = ScriptIndex::from(scripts.to_vec());
        Self::write_json(&self.scripts_path(), &index).await?;
        tracing::info!(count = scripts.len(), "Saved scripts");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(script_id = %script_id))]
    async fn load_versions(&self, script_id: &ScriptId) -> StoryscribeResult<Vec<Version>> {
        let path = self.versions_path(script_id)?;
        let mut versions: Vec<Version> = Self::read_json(&path).await?.unwrap_or_default();

        let migrated = assign_legacy_numbers(&mut versions);
        if migrated > 0 {
            tracing::info!(migrated, "Numbered legacy versions");
        }
        tracing::debug!(count = versions.len(), "Loaded versions");
        Ok(versions)
    }

    #[tracing::instrument(skip(self, versions), fields(script_id = %script_id, count = versions.len()))]
    async fn save_versions(
        &self,
        script_id: &ScriptId,
        versions: &[Version],
    ) -> StoryscribeResult<()> {
        let path = self.versions_path(script_id)?;
        Self::write_json(&path, versions).await?;
        tracing::info!(path = %path.display(), "Saved versions");
        Ok(())
    }
}
