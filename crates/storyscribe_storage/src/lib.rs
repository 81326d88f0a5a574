//! Persistence for scripts and their versions.
//!
//! This crate provides pluggable storage backends behind the [`VersionStore`] trait.
//!
//! # Features
//!
//! - **Plain JSON files**: `scripts.json` plus one `versions_{id}.json` per script
//! - **Atomic writes**: every save goes to a temporary sibling and is renamed into place
//! - **Legacy migration**: version records without a number are numbered on load
//!
//! # Example
//!
//! ```rust
//! use storyscribe_core::{Script, ScriptId, timestamp};
//! use storyscribe_storage::{FileSystemStore, VersionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemStore::new("/tmp/storyscribe")?;
//!
//! let script = Script::new(ScriptId::new("20240501140322"), "Night Train", "", timestamp::now());
//! store.save_scripts(&[script]).await?;
//!
//! let scripts = store.load_scripts().await?;
//! assert_eq!(scripts.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;

pub use filesystem::FileSystemStore;
pub use memory::InMemoryStore;
pub use storyscribe_error::{StorageError, StorageErrorKind};

use storyscribe_core::{Script, ScriptId, Version};
use storyscribe_error::StoryscribeResult;

/// Trait for pluggable script and version storage backends.
///
/// Saves replace the whole collection. Loading something that was never saved
/// yields an empty collection, not an error.
#[async_trait::async_trait]
pub trait VersionStore: Send + Sync {
    /// Load every script in insertion order.
    async fn load_scripts(&self) -> StoryscribeResult<Vec<Script>>;

    /// Replace the stored script collection.
    async fn save_scripts(&self, scripts: &[Script]) -> StoryscribeResult<()>;

    /// Load the versions of one script in creation order.
    ///
    /// Legacy records without a version number receive `position + 1`.
    async fn load_versions(&self, script_id: &ScriptId) -> StoryscribeResult<Vec<Version>>;

    /// Replace the stored versions of one script.
    async fn save_versions(
        &self,
        script_id: &ScriptId,
        versions: &[Version],
    ) -> StoryscribeResult<()>;
}

#[async_trait::async_trait]
impl<T: VersionStore + ?Sized> VersionStore for std::sync::Arc<T> {
    async fn load_scripts(&self) -> StoryscribeResult<Vec<Script>> {
        (**self).load_scripts().await
    }

    async fn save_scripts(&self, scripts: &[Script]) -> StoryscribeResult<()> {
        (**self).save_scripts(scripts).await
    }

    async fn load_versions(&self, script_id: &ScriptId) -> StoryscribeResult<Vec<Version>> {
        (**self).load_versions(script_id).await
    }

    async fn save_versions(
        &self,
        script_id: &ScriptId,
        versions: &[Version],
    ) -> StoryscribeResult<()> {
        (**self).save_versions(script_id, versions).await
    }
}
