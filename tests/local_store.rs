//! Durability and fallback tests for the device-local snapshot store.

use std::path::PathBuf;
use std::sync::Arc;

use eyre::{OptionExt, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use trestle::board::{
    adapters::local::LocalStore,
    domain::{ColumnId, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle},
    ports::{TaskStore, TaskStoreError},
};
use uuid::Uuid;

/// Scratch directory removed when the test finishes.
struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn create() -> eyre::Result<Self> {
        let path = std::env::temp_dir().join(format!("trestle-local-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    fn path_str(&self) -> eyre::Result<&str> {
        self.path.to_str().ok_or_eyre("non-UTF-8 temp path")
    }

    fn snapshot_path(&self) -> PathBuf {
        self.path.join("board.json")
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft::new(TaskTitle::new(title).expect("valid title"))
}

fn open_store(dir: &ScratchDir) -> eyre::Result<LocalStore<DefaultClock>> {
    Ok(LocalStore::open_ambient(
        dir.path_str()?,
        Arc::new(DefaultClock),
    )?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_read_seeds_the_default_columns() -> eyre::Result<()> {
    let dir = ScratchDir::create()?;
    let store = open_store(&dir)?;

    let columns = store.get_columns().await?;

    ensure!(columns.len() == 4);
    let orders: Vec<i32> = columns.iter().map(|column| column.order).collect();
    ensure!(orders == vec![0, 1, 2, 3]);
    ensure!(
        dir.snapshot_path().exists(),
        "initial snapshot must be written to disk"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_survive_reopening_the_store() -> eyre::Result<()> {
    let dir = ScratchDir::create()?;
    let created = {
        let store = open_store(&dir)?;
        store
            .create_task(
                draft("Persisted task")
                    .with_priority(TaskPriority::High)
                    .with_tags(vec!["backend".to_owned()]),
            )
            .await?
    };

    let reopened = open_store(&dir)?;
    let tasks = reopened.get_tasks().await?;
    let stored = tasks
        .iter()
        .find(|task| task.id() == created.id())
        .ok_or_eyre("task missing after reopen")?;

    ensure!(stored.title().as_str() == "Persisted task");
    ensure!(stored.priority() == TaskPriority::High);
    ensure!(stored.tags().contains("backend"));
    ensure!(stored.created_at() == created.created_at());
    ensure!(stored.updated_at() == created.updated_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_snapshot_falls_back_to_an_empty_board() -> eyre::Result<()> {
    let dir = ScratchDir::create()?;
    std::fs::write(dir.snapshot_path(), "definitely-not-json{")?;
    let store = open_store(&dir)?;

    let tasks = store.get_tasks().await?;
    let columns = store.get_columns().await?;

    ensure!(tasks.is_empty());
    ensure!(columns.len() == 4, "defaults replace the corrupt snapshot");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_refreshes_the_snapshot_on_disk() -> eyre::Result<()> {
    let dir = ScratchDir::create()?;
    let store = open_store(&dir)?;
    let created = store.create_task(draft("Moves around")).await?;

    store
        .update_task(
            created.id(),
            TaskPatch::new().with_status(TaskStatus::Done),
        )
        .await?;
    store.delete_task(TaskId::new()).await?;

    let reopened = open_store(&dir)?;
    let tasks = reopened.get_tasks().await?;
    let stored = tasks
        .iter()
        .find(|task| task.id() == created.id())
        .ok_or_eyre("task missing after update")?;
    ensure!(stored.status() == TaskStatus::Done);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updating_an_unknown_task_reports_not_found() -> eyre::Result<()> {
    let dir = ScratchDir::create()?;
    let store = open_store(&dir)?;

    let result = store
        .update_task(
            TaskId::new(),
            TaskPatch::new().with_status(TaskStatus::Done),
        )
        .await;

    ensure!(matches!(result, Err(TaskStoreError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updating_a_foreign_column_id_is_rejected() -> eyre::Result<()> {
    let dir = ScratchDir::create()?;
    let store = open_store(&dir)?;

    let mut columns = store.get_columns().await?;
    for column in &mut columns {
        column.title = format!("Renamed {}", column.title);
    }
    let renamed = store.update_columns(columns).await?;
    ensure!(renamed.iter().all(|column| column.title.starts_with("Renamed")));

    let mut foreign = store.get_columns().await?;
    if let Some(column) = foreign.first_mut() {
        column.id = ColumnId::new("someone-elses-lane");
    }
    let result = store.update_columns(foreign).await;
    ensure!(matches!(result, Err(TaskStoreError::UnknownColumn(_))));
    Ok(())
}
