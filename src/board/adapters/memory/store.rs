//! Thread-safe in-memory implementation of the task store.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Column, Task, TaskDraft, TaskId, TaskPatch, default_columns},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Starts with the four default columns and no tasks. Used as the storage
/// seam in service tests and wherever persistence across processes is not
/// needed.
#[derive(Debug, Clone)]
pub struct InMemoryStore<C> {
    state: Arc<RwLock<StoreState>>,
    clock: Arc<C>,
}

#[derive(Debug)]
struct StoreState {
    tasks: HashMap<TaskId, Task>,
    columns: Vec<Column>,
}

impl<C> InMemoryStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store with the default columns and the given clock.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                tasks: HashMap::new(),
                columns: default_columns(),
            })),
            clock,
        }
    }

    fn read_state(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

impl Default for InMemoryStore<DefaultClock> {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

#[async_trait]
impl<C> TaskStore for InMemoryStore<C>
where
    C: Clock + Send + Sync,
{
    async fn get_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let now = self.clock.utc();
        let state = self.read_state()?;
        Ok(state
            .tasks
            .values()
            .cloned()
            .map(|task| task.with_display_opacity(now))
            .collect())
    }

    async fn create_task(&self, draft: TaskDraft) -> TaskStoreResult<Task> {
        let task = Task::new(draft, &*self.clock);
        let mut state = self.write_state()?;
        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskStoreError::NotFound(id))?;
        task.apply(&patch, &*self.clock);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        state.tasks.remove(&id);
        Ok(())
    }

    async fn get_columns(&self) -> TaskStoreResult<Vec<Column>> {
        let state = self.read_state()?;
        Ok(state.columns.clone())
    }

    async fn update_columns(&self, columns: Vec<Column>) -> TaskStoreResult<Vec<Column>> {
        let mut state = self.write_state()?;
        for incoming in &columns {
            if !state.columns.iter().any(|column| column.id == incoming.id) {
                return Err(TaskStoreError::UnknownColumn(incoming.id.clone()));
            }
        }
        for incoming in columns {
            if let Some(column) = state
                .columns
                .iter_mut()
                .find(|column| column.id == incoming.id)
            {
                column.title = incoming.title;
                column.color = incoming.color;
                column.order = incoming.order;
            }
        }
        Ok(state.columns.clone())
    }
}
