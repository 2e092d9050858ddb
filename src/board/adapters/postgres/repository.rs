//! `PostgreSQL` implementation of the task store.

use super::{
    models::{ColumnRow, NewTagRow, NewTaskRow, TaskChangeset, TaskRow, TaskTagRow},
    schema::{columns, tags, task_tags, tasks},
};
use crate::board::{
    domain::{
        Column, ColumnId, PersistedTaskData, PrincipalId, Task, TaskDraft, TaskId, TaskPatch,
        TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{AuthProvider, TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::Clock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store scoped by authenticated principal.
///
/// Every operation resolves the principal from the [`AuthProvider`] at
/// dispatch time and fails with [`TaskStoreError::NotAuthenticated`] when
/// nobody is signed in. Tag labels are stored as tag rows plus join rows
/// and flattened back into a label set on read.
#[derive(Clone)]
pub struct PostgresStore<A, C> {
    pool: BoardPgPool,
    auth: Arc<A>,
    clock: Arc<C>,
}

impl<A, C> PostgresStore<A, C>
where
    A: AuthProvider,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a store from a connection pool, an authentication provider,
    /// and a clock.
    #[must_use]
    pub const fn new(pool: BoardPgPool, auth: Arc<A>, clock: Arc<C>) -> Self {
        Self { pool, auth, clock }
    }

    fn principal(&self) -> TaskStoreResult<Uuid> {
        self.auth
            .current_principal()
            .map(PrincipalId::into_inner)
            .ok_or(TaskStoreError::NotAuthenticated)
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl<A, C> TaskStore for PostgresStore<A, C>
where
    A: AuthProvider,
    C: Clock + Send + Sync + 'static,
{
    async fn get_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let principal = self.principal()?;
        let now = self.clock.utc();

        self.run_blocking(move |connection| {
            let rows: Vec<TaskRow> = tasks::table
                .filter(tasks::principal.eq(principal))
                .select(TaskRow::as_select())
                .load(connection)
                .map_err(TaskStoreError::persistence)?;

            let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
            let mut labels_by_task: HashMap<Uuid, BTreeSet<String>> = HashMap::new();
            if !ids.is_empty() {
                let pairs: Vec<(Uuid, String)> = task_tags::table
                    .inner_join(tags::table)
                    .filter(task_tags::task_id.eq_any(ids))
                    .select((task_tags::task_id, tags::name))
                    .load(connection)
                    .map_err(TaskStoreError::persistence)?;
                for (task_id, name) in pairs {
                    labels_by_task.entry(task_id).or_default().insert(name);
                }
            }

            rows.into_iter()
                .map(|row| {
                    let labels = labels_by_task.remove(&row.id).unwrap_or_default();
                    row_to_task(row, labels).map(|task| task.with_display_opacity(now))
                })
                .collect()
        })
        .await
    }

    async fn create_task(&self, draft: TaskDraft) -> TaskStoreResult<Task> {
        let principal = self.principal()?;
        let task = Task::new(draft, &*self.clock);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(to_new_row(principal, &task))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            replace_task_tags(connection, principal, task.id().into_inner(), task.tags())?;
            Ok(task)
        })
        .await
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<Task> {
        let principal = self.principal()?;
        let clock = Arc::clone(&self.clock);

        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::principal.eq(principal))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?
                .ok_or(TaskStoreError::NotFound(id))?;

            let labels = task_labels(connection, row.id)?;
            let mut task = row_to_task(row, labels)?;
            task.apply(&patch, &*clock);

            diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(to_changeset(&task))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;

            if patch.tags().is_some() {
                replace_task_tags(connection, principal, id.into_inner(), task.tags())?;
            }
            Ok(task)
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let principal = self.principal()?;

        self.run_blocking(move |connection| {
            let owned: Option<Uuid> = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::principal.eq(principal))
                .select(tasks::id)
                .first(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            // Absence is not an error, and a foreign principal's task (and
            // its tag joins) must stay untouched.
            let Some(task_id) = owned else {
                return Ok(());
            };

            diesel::delete(task_tags::table.filter(task_tags::task_id.eq(task_id)))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            diesel::delete(tasks::table.filter(tasks::id.eq(task_id)))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn get_columns(&self) -> TaskStoreResult<Vec<Column>> {
        let principal = self.principal()?;

        self.run_blocking(move |connection| {
            let rows: Vec<ColumnRow> = columns::table
                .filter(columns::principal.eq(principal))
                .order(columns::position.asc())
                .select(ColumnRow::as_select())
                .load(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_column).collect()
        })
        .await
    }

    async fn update_columns(&self, columns_in: Vec<Column>) -> TaskStoreResult<Vec<Column>> {
        let principal = self.principal()?;

        self.run_blocking(move |connection| {
            for column in &columns_in {
                let affected = diesel::update(
                    columns::table
                        .filter(columns::id.eq(column.id.as_str().to_owned()))
                        .filter(columns::principal.eq(principal)),
                )
                .set((
                    columns::title.eq(column.title.clone()),
                    columns::color.eq(column.color.clone()),
                    columns::position.eq(column.order),
                ))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;

                if affected == 0 {
                    return Err(TaskStoreError::UnknownColumn(column.id.clone()));
                }
            }
            Ok(columns_in)
        })
        .await
    }
}

fn to_new_row(principal: Uuid, task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        principal,
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow, labels: BTreeSet<String>) -> TaskStoreResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskStoreError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskStoreError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskStoreError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title,
        description: row.description,
        status,
        priority,
        due_date: row.due_date,
        tags: labels,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn row_to_column(row: ColumnRow) -> TaskStoreResult<Column> {
    let status = TaskStatus::try_from(row.status.as_str()).map_err(TaskStoreError::persistence)?;
    Ok(Column {
        id: ColumnId::new(row.id),
        title: row.title,
        status,
        color: row.color,
        order: row.position,
    })
}

/// Looks up the flat label set applied to a task.
fn task_labels(connection: &mut PgConnection, task_id: Uuid) -> TaskStoreResult<BTreeSet<String>> {
    let labels: Vec<String> = task_tags::table
        .inner_join(tags::table)
        .filter(task_tags::task_id.eq(task_id))
        .select(tags::name)
        .load(connection)
        .map_err(TaskStoreError::persistence)?;
    Ok(labels.into_iter().collect())
}

/// Returns the tag id for a label, creating the tag row when it is new to
/// this principal.
fn ensure_tag(connection: &mut PgConnection, principal: Uuid, name: &str) -> TaskStoreResult<Uuid> {
    let existing = tags::table
        .filter(tags::principal.eq(principal))
        .filter(tags::name.eq(name))
        .select(tags::id)
        .first::<Uuid>(connection)
        .optional()
        .map_err(TaskStoreError::persistence)?;
    if let Some(id) = existing {
        return Ok(id);
    }

    diesel::insert_into(tags::table)
        .values(NewTagRow {
            id: Uuid::new_v4(),
            principal,
            name: name.to_owned(),
        })
        .returning(tags::id)
        .get_result(connection)
        .map_err(TaskStoreError::persistence)
}

/// Replaces the join rows for a task with the given label set.
fn replace_task_tags(
    connection: &mut PgConnection,
    principal: Uuid,
    task_id: Uuid,
    labels: &BTreeSet<String>,
) -> TaskStoreResult<()> {
    diesel::delete(task_tags::table.filter(task_tags::task_id.eq(task_id)))
        .execute(connection)
        .map_err(TaskStoreError::persistence)?;

    if labels.is_empty() {
        return Ok(());
    }

    let rows = labels
        .iter()
        .map(|label| {
            ensure_tag(connection, principal, label).map(|tag_id| TaskTagRow { task_id, tag_id })
        })
        .collect::<TaskStoreResult<Vec<_>>>()?;

    diesel::insert_into(task_tags::table)
        .values(&rows)
        .execute(connection)
        .map_err(TaskStoreError::persistence)?;
    Ok(())
}
