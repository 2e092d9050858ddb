//! Per-call storage backend selection from authentication state.

use crate::board::{
    domain::{Column, Task, TaskDraft, TaskId, TaskPatch},
    ports::{AuthProvider, TaskStore, TaskStoreResult},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Task store dispatching each call to the remote backend when a principal
/// is authenticated and to the local backend otherwise.
///
/// Selection is re-evaluated on every operation; nothing is cached, so a
/// sign-in or sign-out takes effect on the next call. Data is never
/// migrated between backends: a task created signed-out is invisible while
/// signed in, and vice versa.
pub struct SelectingStore<L, R, A> {
    local: Arc<L>,
    remote: Arc<R>,
    auth: Arc<A>,
}

impl<L, R, A> SelectingStore<L, R, A>
where
    L: TaskStore,
    R: TaskStore,
    A: AuthProvider,
{
    /// Creates a selecting store over the two backends.
    #[must_use]
    pub const fn new(local: Arc<L>, remote: Arc<R>, auth: Arc<A>) -> Self {
        Self {
            local,
            remote,
            auth,
        }
    }

    fn backend(&self) -> &dyn TaskStore {
        if self.auth.current_principal().is_some() {
            tracing::debug!(backend = "remote", "dispatching board storage call");
            self.remote.as_ref()
        } else {
            tracing::debug!(backend = "local", "dispatching board storage call");
            self.local.as_ref()
        }
    }
}

#[async_trait]
impl<L, R, A> TaskStore for SelectingStore<L, R, A>
where
    L: TaskStore,
    R: TaskStore,
    A: AuthProvider,
{
    async fn get_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        self.backend().get_tasks().await
    }

    async fn create_task(&self, draft: TaskDraft) -> TaskStoreResult<Task> {
        self.backend().create_task(draft).await
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<Task> {
        self.backend().update_task(id, patch).await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        self.backend().delete_task(id).await
    }

    async fn get_columns(&self) -> TaskStoreResult<Vec<Column>> {
        self.backend().get_columns().await
    }

    async fn update_columns(&self, columns: Vec<Column>) -> TaskStoreResult<Vec<Column>> {
        self.backend().update_columns(columns).await
    }
}
