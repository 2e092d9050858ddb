//! Diesel row models for board persistence.

use super::schema::{columns, tags, task_tags, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning principal.
    pub principal: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Board status slug.
    pub status: String,
    /// Priority slug.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning principal.
    pub principal: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Board status slug.
    pub status: String,
    /// Priority slug.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model writing the full merged task back to its row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Description after the merge, `NULL` when absent.
    pub description: Option<String>,
    /// Board status slug.
    pub status: String,
    /// Priority slug.
    pub priority: String,
    /// Due date after the merge, `NULL` when absent.
    pub due_date: Option<DateTime<Utc>>,
    /// Refreshed update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for column records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: String,
    /// Owning principal.
    pub principal: uuid::Uuid,
    /// Display title.
    pub title: String,
    /// Status slug this lane holds.
    pub status: String,
    /// Optional display color.
    pub color: Option<String>,
    /// Left-to-right sort order.
    pub position: i32,
}

/// Insert model for tag records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
pub struct NewTagRow {
    /// Tag identifier.
    pub id: uuid::Uuid,
    /// Owning principal.
    pub principal: uuid::Uuid,
    /// Tag label.
    pub name: String,
}

/// Insert model for task/tag join rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_tags)]
pub struct TaskTagRow {
    /// Tagged task.
    pub task_id: uuid::Uuid,
    /// Applied tag.
    pub tag_id: uuid::Uuid,
}
