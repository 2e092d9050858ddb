//! Board state and the drag-driven status transition machine.

use crate::board::{
    domain::{Column, ColumnId, Task, TaskDraft, TaskId, TaskPatch, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use std::sync::Arc;

/// Hover target of an in-flight drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    /// Hovering a column; proposes that column's status.
    Column(ColumnId),
    /// Hovering another task's card; proposes that task's current status.
    Card(TaskId),
}

/// How a drop resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was active.
    NoActiveDrag,
    /// The drop landed on no resolvable target; nothing was persisted.
    NoTarget,
    /// The target status equals the pre-drag status; nothing was persisted.
    Unchanged,
    /// The dragged task vanished from board state; nothing was persisted
    /// and there is nothing to revert.
    Aborted,
    /// The status change persisted; the optimistic preview stands.
    Committed,
    /// Persistence failed; the task snapped back to its pre-drag status.
    Reverted,
}

/// Revert record for the active drag: the task and the status it held
/// before the gesture began.
#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    task: TaskId,
    origin: TaskStatus,
}

/// Interactive board over a task store.
///
/// Owns the in-memory task and column lists for a session. Status moves,
/// whether drag-driven or from the list view's selector, mutate board
/// state immediately and persist asynchronously; a failed persistence call
/// restores the recorded pre-transition status. The in-memory copy is a
/// cache over the store and reconciles to it on every load.
pub struct BoardController<S> {
    store: Arc<S>,
    tasks: Vec<Task>,
    columns: Vec<Column>,
    drag: Option<ActiveDrag>,
}

impl<S> BoardController<S>
where
    S: TaskStore,
{
    /// Pointer travel, in display units, below which a grab is treated as
    /// a click rather than a drag.
    pub const ACTIVATION_DISTANCE: u32 = 8;

    /// Creates a controller over the given store with an empty board.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            columns: Vec::new(),
            drag: None,
        }
    }

    /// Loads tasks and columns from the store, replacing board state.
    ///
    /// Columns are re-sorted ascending by their `order` field so layout is
    /// stable regardless of backend return order.
    ///
    /// # Errors
    ///
    /// Returns the store error when either read fails; board state is left
    /// untouched in that case.
    pub async fn load(&mut self) -> TaskStoreResult<()> {
        let tasks = self.store.get_tasks().await?;
        let mut columns = self.store.get_columns().await?;
        columns.sort_by_key(|column| column.order);
        self.tasks = tasks;
        self.columns = columns;
        Ok(())
    }

    /// Returns the board's tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the board's columns, sorted by order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the tasks currently sitting in the given lane.
    #[must_use]
    pub fn tasks_for_column(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.status() == status)
            .collect()
    }

    /// Returns the id of the task being dragged, if any.
    #[must_use]
    pub fn active_drag(&self) -> Option<TaskId> {
        self.drag.map(|drag| drag.task)
    }

    /// Creates a task and appends it to board state.
    ///
    /// # Errors
    ///
    /// Returns the store error when persistence fails; board state is left
    /// untouched.
    pub async fn create_task(&mut self, draft: TaskDraft) -> TaskStoreResult<Task> {
        let task = self.store.create_task(draft).await?;
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Applies a partial edit to a task and reconciles board state with
    /// the stored result.
    ///
    /// # Errors
    ///
    /// Returns the store error when the task is unknown or persistence
    /// fails; board state is left untouched.
    pub async fn edit_task(&mut self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<Task> {
        let updated = self.store.update_task(id, patch).await?;
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) {
            *task = updated.clone();
        }
        Ok(updated)
    }

    /// Deletes a task and removes it from board state.
    ///
    /// Idempotent at the store layer; deleting an id that is already gone
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns the store error when persistence fails; board state is left
    /// untouched.
    pub async fn delete_task(&mut self, id: TaskId) -> TaskStoreResult<()> {
        self.store.delete_task(id).await?;
        self.tasks.retain(|task| task.id() != id);
        Ok(())
    }

    /// Starts a drag on a task once the pointer has travelled past the
    /// activation distance.
    ///
    /// Returns `true` when the drag activated. A grab below the threshold,
    /// or of an id not on the board, activates nothing.
    pub fn begin_drag(&mut self, id: TaskId, pointer_travel: u32) -> bool {
        if pointer_travel < Self::ACTIVATION_DISTANCE {
            return false;
        }
        let Some(origin) = self.status_of(id) else {
            return false;
        };
        self.drag = Some(ActiveDrag { task: id, origin });
        true
    }

    /// Handles the drag hovering a new target.
    ///
    /// When the proposed status differs from the dragged task's current
    /// in-memory status, board state mutates immediately as a pre-drop
    /// preview. Nothing is persisted here. Hovering the dragged card
    /// itself, or an unresolvable target, is a no-op.
    pub fn drag_over(&mut self, target: &DragTarget) {
        let Some(drag) = self.drag else {
            return;
        };
        if let DragTarget::Card(id) = target {
            if *id == drag.task {
                return;
            }
        }
        let Some(proposed) = self.target_status(target) else {
            return;
        };
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == drag.task) {
            if task.status() != proposed {
                task.set_status(proposed);
            }
        }
    }

    /// Completes the drag, persisting the status change when one resulted.
    ///
    /// The active payload is cleared whatever the outcome. No persistence
    /// call is made when there is no resolvable target or the target
    /// status equals the pre-drag status. A failed persistence call snaps
    /// the task back to its pre-drag status; the revert is the only signal
    /// surfaced for drag failures.
    pub async fn drag_end(&mut self, target: Option<&DragTarget>) -> DropOutcome {
        let Some(drag) = self.drag.take() else {
            return DropOutcome::NoActiveDrag;
        };
        let Some(target) = target else {
            return DropOutcome::NoTarget;
        };
        if let DragTarget::Card(id) = target {
            if *id == drag.task {
                return DropOutcome::Unchanged;
            }
        }
        let Some(proposed) = self.target_status(target) else {
            return DropOutcome::NoTarget;
        };
        if self.status_of(drag.task).is_none() {
            // Stale payload: the task left the board mid-drag.
            return DropOutcome::Aborted;
        }
        if proposed == drag.origin {
            return DropOutcome::Unchanged;
        }

        match self.persist_status(drag.task, drag.origin, proposed).await {
            Ok(()) => DropOutcome::Committed,
            Err(_) => DropOutcome::Reverted,
        }
    }

    /// Changes a task's status from the list view's explicit selector.
    ///
    /// Same optimistic path as a drop: board state mutates first, then the
    /// change persists; a failure reverts the status and is returned to
    /// the caller for user-visible reporting.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the id is not on the
    /// board, or the store error when persistence fails (after the
    /// revert).
    pub async fn set_status(&mut self, id: TaskId, status: TaskStatus) -> TaskStoreResult<()> {
        let Some(current) = self.status_of(id) else {
            return Err(TaskStoreError::NotFound(id));
        };
        if current == status {
            return Ok(());
        }
        self.persist_status(id, current, status).await
    }

    /// Optimistically applies a status and persists it, restoring the
    /// recorded prior status when persistence fails.
    async fn persist_status(
        &mut self,
        id: TaskId,
        origin: TaskStatus,
        target: TaskStatus,
    ) -> TaskStoreResult<()> {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) {
            task.set_status(target);
        }

        match self
            .store
            .update_task(id, TaskPatch::new().with_status(target))
            .await
        {
            Ok(stored) => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) {
                    *task = stored;
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    task = %id,
                    from = origin.as_str(),
                    to = target.as_str(),
                    error = %err,
                    "status change failed to persist, reverting"
                );
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) {
                    task.set_status(origin);
                }
                Err(err)
            }
        }
    }

    fn status_of(&self, id: TaskId) -> Option<TaskStatus> {
        self.tasks
            .iter()
            .find(|task| task.id() == id)
            .map(Task::status)
    }

    fn target_status(&self, target: &DragTarget) -> Option<TaskStatus> {
        match target {
            DragTarget::Column(id) => self
                .columns
                .iter()
                .find(|column| &column.id == id)
                .map(|column| column.status),
            DragTarget::Card(id) => self.status_of(*id),
        }
    }
}
