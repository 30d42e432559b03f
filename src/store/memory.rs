//! In-memory store backed by `tokio::sync::RwLock` maps.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::traits::{ClassificationStore, LifecycleStore};
use crate::error::StoreError;
use crate::lifecycle::LifecycleState;
use crate::model::ClassificationResult;

/// Process-local store. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    classifications: RwLock<HashMap<String, ClassificationResult>>,
    lifecycles: RwLock<HashMap<String, LifecycleState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored classification results.
    pub async fn classification_count(&self) -> usize {
        self.classifications.read().await.len()
    }

    /// Number of threads with a stored lifecycle state.
    pub async fn lifecycle_count(&self) -> usize {
        self.lifecycles.read().await.len()
    }
}

#[async_trait]
impl ClassificationStore for MemoryStore {
    async fn save_classification(
        &self,
        email_id: &str,
        result: &ClassificationResult,
    ) -> Result<(), StoreError> {
        self.classifications
            .write()
            .await
            .insert(email_id.to_string(), result.clone());
        Ok(())
    }

    async fn load_classification(
        &self,
        email_id: &str,
    ) -> Result<Option<ClassificationResult>, StoreError> {
        Ok(self.classifications.read().await.get(email_id).cloned())
    }
}

#[async_trait]
impl LifecycleStore for MemoryStore {
    async fn save_lifecycle(
        &self,
        thread_id: &str,
        state: LifecycleState,
    ) -> Result<(), StoreError> {
        self.lifecycles
            .write()
            .await
            .insert(thread_id.to_string(), state);
        Ok(())
    }

    async fn load_lifecycle(&self, thread_id: &str) -> Result<Option<LifecycleState>, StoreError> {
        Ok(self.lifecycles.read().await.get(thread_id).copied())
    }
}
