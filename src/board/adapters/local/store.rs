//! Device-scoped snapshot store backed by a capability-scoped directory.

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::board::{
    domain::{Column, Task, TaskDraft, TaskId, TaskPatch, default_columns},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// File name of the board snapshot inside the store directory.
const SNAPSHOT_FILE: &str = "board.json";

/// Serialized shape of the device-local board: every task and column owned
/// by this device, dates as ISO-8601 strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoardSnapshot {
    tasks: Vec<Task>,
    columns: Vec<Column>,
}

impl BoardSnapshot {
    fn initial() -> Self {
        Self {
            tasks: Vec::new(),
            columns: default_columns(),
        }
    }
}

/// Task store persisting to one JSON snapshot per device.
///
/// Survives restarts but not device changes. Single-writer: operations are
/// serialized internally, so concurrent callers cannot interleave
/// read-modify-write cycles on the snapshot file.
#[derive(Debug)]
pub struct LocalStore<C> {
    dir: Dir,
    clock: Arc<C>,
    guard: Mutex<()>,
}

impl<C> LocalStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store over an already-opened snapshot directory.
    #[must_use]
    pub fn new(dir: Dir, clock: Arc<C>) -> Self {
        Self {
            dir,
            clock,
            guard: Mutex::new(()),
        }
    }

    /// Opens the given directory with ambient authority and stores the
    /// snapshot inside it.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the directory cannot be opened.
    pub fn open_ambient(path: &str, clock: Arc<C>) -> TaskStoreResult<Self> {
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(TaskStoreError::persistence)?;
        Ok(Self::new(dir, clock))
    }

    fn lock(&self) -> TaskStoreResult<std::sync::MutexGuard<'_, ()>> {
        self.guard
            .lock()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    /// Reads the snapshot, seeding an initial one when the file does not
    /// exist yet. An unparsable snapshot falls back to the initial state
    /// rather than failing the operation.
    fn load_snapshot(&self) -> TaskStoreResult<BoardSnapshot> {
        match self.dir.read_to_string(SNAPSHOT_FILE) {
            Ok(raw) => match serde_json::from_str::<BoardSnapshot>(&raw) {
                Ok(mut snapshot) => {
                    if snapshot.columns.is_empty() {
                        snapshot.columns = default_columns();
                    }
                    Ok(snapshot)
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "board snapshot unreadable, falling back to empty board"
                    );
                    Ok(BoardSnapshot::initial())
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let snapshot = BoardSnapshot::initial();
                self.save_snapshot(&snapshot)?;
                Ok(snapshot)
            }
            Err(err) => Err(TaskStoreError::persistence(err)),
        }
    }

    fn save_snapshot(&self, snapshot: &BoardSnapshot) -> TaskStoreResult<()> {
        let payload = serde_json::to_string(snapshot).map_err(TaskStoreError::persistence)?;
        self.dir
            .write(SNAPSHOT_FILE, payload)
            .map_err(TaskStoreError::persistence)
    }
}

#[async_trait]
impl<C> TaskStore for LocalStore<C>
where
    C: Clock + Send + Sync,
{
    async fn get_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let now = self.clock.utc();
        let _held = self.lock()?;
        let snapshot = self.load_snapshot()?;
        Ok(snapshot
            .tasks
            .into_iter()
            .map(|task| task.with_display_opacity(now))
            .collect())
    }

    async fn create_task(&self, draft: TaskDraft) -> TaskStoreResult<Task> {
        let task = Task::new(draft, &*self.clock);
        let _held = self.lock()?;
        let mut snapshot = self.load_snapshot()?;
        snapshot.tasks.push(task.clone());
        self.save_snapshot(&snapshot)?;
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<Task> {
        let _held = self.lock()?;
        let mut snapshot = self.load_snapshot()?;
        let task = snapshot
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskStoreError::NotFound(id))?;
        task.apply(&patch, &*self.clock);
        let updated = task.clone();
        self.save_snapshot(&snapshot)?;
        Ok(updated)
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let _held = self.lock()?;
        let mut snapshot = self.load_snapshot()?;
        snapshot.tasks.retain(|task| task.id() != id);
        self.save_snapshot(&snapshot)
    }

    async fn get_columns(&self) -> TaskStoreResult<Vec<Column>> {
        let _held = self.lock()?;
        Ok(self.load_snapshot()?.columns)
    }

    async fn update_columns(&self, columns: Vec<Column>) -> TaskStoreResult<Vec<Column>> {
        let _held = self.lock()?;
        let mut snapshot = self.load_snapshot()?;
        for incoming in &columns {
            if !snapshot
                .columns
                .iter()
                .any(|column| column.id == incoming.id)
            {
                return Err(TaskStoreError::UnknownColumn(incoming.id.clone()));
            }
        }
        for incoming in columns {
            if let Some(column) = snapshot
                .columns
                .iter_mut()
                .find(|column| column.id == incoming.id)
            {
                column.title = incoming.title;
                column.color = incoming.color;
                column.order = incoming.order;
            }
        }
        let updated = snapshot.columns.clone();
        self.save_snapshot(&snapshot)?;
        Ok(updated)
    }
}
