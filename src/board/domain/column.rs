//! Board columns: named lanes mapped 1:1 onto task statuses.

use super::{ColumnId, TaskStatus};
use serde::{Deserialize, Serialize};

/// A board lane. Each column corresponds to exactly one [`TaskStatus`];
/// `order` values are distinct and define left-to-right layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column identifier.
    pub id: ColumnId,
    /// Display title.
    pub title: String,
    /// Status this lane holds.
    pub status: TaskStatus,
    /// Optional display color (CSS hex).
    pub color: Option<String>,
    /// Left-to-right sort order, ascending.
    pub order: i32,
}

impl Column {
    /// Creates a column without a display color.
    #[must_use]
    pub fn new(
        id: ColumnId,
        title: impl Into<String>,
        status: TaskStatus,
        order: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            status,
            color: None,
            order,
        }
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// The four default lanes seeded on first use of the local backend.
#[must_use]
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new(ColumnId::new("backlog"), "Backlog", TaskStatus::Backlog, 0)
            .with_color("#6b7280"),
        Column::new(ColumnId::new("ready"), "Ready", TaskStatus::Ready, 1).with_color("#3b82f6"),
        Column::new(
            ColumnId::new("in-progress"),
            "In Progress",
            TaskStatus::InProgress,
            2,
        )
        .with_color("#f59e0b"),
        Column::new(ColumnId::new("done"), "Done", TaskStatus::Done, 3).with_color("#10b981"),
    ]
}
