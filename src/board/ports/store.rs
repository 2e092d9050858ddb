//! Storage port for task and column persistence.

use crate::board::domain::{Column, ColumnId, Task, TaskDraft, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task and column persistence contract.
///
/// Every operation is asynchronous and may fail; failures propagate to the
/// caller without retry. Implementations scope all data to one principal
/// (the local device or an authenticated account) and never merge across
/// principals.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns all tasks owned by the current principal.
    ///
    /// No ordering guarantee; callers sort as needed. Each task carries a
    /// display-opacity hint computed at read time.
    async fn get_tasks(&self) -> TaskStoreResult<Vec<Task>>;

    /// Persists a new task, assigning its identifier and timestamps, and
    /// returns the stored representation.
    async fn create_task(&self, draft: TaskDraft) -> TaskStoreResult<Task>;

    /// Merges a partial update into an existing task and refreshes its
    /// update timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the id does not exist for
    /// the current principal.
    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<Task>;

    /// Removes a task. Idempotent: absence of the id is not an error.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Returns the principal's columns.
    ///
    /// The local backend seeds the four default lanes when none exist; the
    /// remote backend assumes columns are pre-seeded per account.
    async fn get_columns(&self) -> TaskStoreResult<Vec<Column>>;

    /// Bulk-updates title, color, and order of existing columns.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::UnknownColumn`] when any referenced column
    /// id does not belong to the current principal.
    async fn update_columns(&self, columns: Vec<Column>) -> TaskStoreResult<Vec<Column>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found for the current principal.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A referenced column does not belong to the current principal.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// A remote operation was attempted without an authenticated principal.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
