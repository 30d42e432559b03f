//! Backend-agnostic persistence traits.
//!
//! The engine itself never touches storage; these traits sit between the
//! replay driver (or any caller) and whatever backend keeps results around.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::lifecycle::LifecycleState;
use crate::model::ClassificationResult;

/// Stores one classification result per email id.
#[async_trait]
pub trait ClassificationStore: Send + Sync {
    /// Insert or replace the result for `email_id`.
    async fn save_classification(
        &self,
        email_id: &str,
        result: &ClassificationResult,
    ) -> Result<(), StoreError>;

    /// Get the result for `email_id`, if any.
    async fn load_classification(
        &self,
        email_id: &str,
    ) -> Result<Option<ClassificationResult>, StoreError>;

    /// Like [`load_classification`](Self::load_classification), but a missing
    /// entry is an error.
    async fn require_classification(
        &self,
        email_id: &str,
    ) -> Result<ClassificationResult, StoreError> {
        self.load_classification(email_id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                entity: "classification".to_string(),
                id: email_id.to_string(),
            })
    }
}

/// Stores the lifecycle state of each thread. Thread ids are opaque.
#[async_trait]
pub trait LifecycleStore: Send + Sync {
    /// Insert or replace the state for `thread_id`.
    async fn save_lifecycle(&self, thread_id: &str, state: LifecycleState)
    -> Result<(), StoreError>;

    /// Get the state for `thread_id`, if any.
    async fn load_lifecycle(&self, thread_id: &str) -> Result<Option<LifecycleState>, StoreError>;
}
