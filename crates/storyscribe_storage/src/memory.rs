//! In-memory storage for tests and throwaway sessions.

use crate::VersionStore;
use std::collections::HashMap;
use storyscribe_core::{Script, ScriptId, Version, assign_legacy_numbers};
use storyscribe_error::StoryscribeResult;
use tokio::sync::RwLock;

/// Store that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    scripts: RwLock<Vec<Script>>,
    versions: RwLock<HashMap<ScriptId, Vec<Version>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl VersionStore for InMemoryStore {
    async fn load_scripts(&self) -> StoryscribeResult<Vec<Script>> {
        Ok(self.scripts.read().await.clone())
    }

    async fn save_scripts(&self, scripts: &[Script]) -> StoryscribeResult<()> {
        *self.scripts.write().await = scripts.to_vec();
        Ok(())
    }

    async fn load_versions(&self, script_id: &ScriptId) -> StoryscribeResult<Vec<Version>> {
        let mut versions = self
            .versions
            .read()
            .await
            .get(script_id)
            .cloned()
            .unwrap_or_default();
        assign_legacy_numbers(&mut versions);
        Ok(versions)
    }

    async fn save_versions(
        &self,
        script_id: &ScriptId,
        versions: &[Version],
    ) -> StoryscribeResult<()> {
        self.versions
            .write()
            .await
            .insert(script_id.clone(), versions.to_vec());
        Ok(())
    }
}
