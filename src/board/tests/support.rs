//! Shared doubles and builders for board unit tests.

use crate::board::{
    domain::{Column, PrincipalId, Task, TaskDraft, TaskId, TaskPatch, TaskTitle},
    ports::{AuthProvider, TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

/// Builds a draft with a known-good title.
pub(crate) fn draft(title: &str) -> TaskDraft {
    TaskDraft::new(TaskTitle::new(title).expect("valid title"))
}

/// A fixed instant for deterministic timestamps.
pub(crate) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Clock advancing one second on every reading.
pub(crate) struct StepClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl StepClock {
    pub(crate) fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + TimeDelta::seconds(tick)
    }
}

/// Store wrapper failing every `update_task` call, for revert scenarios.
pub(crate) struct RejectingStore<S> {
    inner: S,
}

impl<S> RejectingStore<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S> TaskStore for RejectingStore<S>
where
    S: TaskStore,
{
    async fn get_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        self.inner.get_tasks().await
    }

    async fn create_task(&self, draft: TaskDraft) -> TaskStoreResult<Task> {
        self.inner.create_task(draft).await
    }

    async fn update_task(&self, _id: TaskId, _patch: TaskPatch) -> TaskStoreResult<Task> {
        Err(TaskStoreError::persistence(std::io::Error::other(
            "injected update failure",
        )))
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        self.inner.delete_task(id).await
    }

    async fn get_columns(&self) -> TaskStoreResult<Vec<Column>> {
        self.inner.get_columns().await
    }

    async fn update_columns(&self, columns: Vec<Column>) -> TaskStoreResult<Vec<Column>> {
        self.inner.update_columns(columns).await
    }
}

/// Auth double whose principal can be flipped mid-test.
pub(crate) struct FlipAuth {
    principal: Mutex<Option<PrincipalId>>,
}

impl FlipAuth {
    pub(crate) fn signed_out() -> Self {
        Self {
            principal: Mutex::new(None),
        }
    }

    pub(crate) fn sign_in(&self, principal: PrincipalId) {
        *self.principal.lock().expect("auth lock") = Some(principal);
    }

    pub(crate) fn sign_out(&self) {
        *self.principal.lock().expect("auth lock") = None;
    }
}

impl AuthProvider for FlipAuth {
    fn current_principal(&self) -> Option<PrincipalId> {
        *self.principal.lock().expect("auth lock")
    }
}
