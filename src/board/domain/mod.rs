//! Domain model for the kanban board.
//!
//! The board domain models tasks, the columns they move between, and the
//! validation rules applied before anything reaches a storage backend,
//! while keeping all infrastructure concerns outside of the domain
//! boundary.

mod column;
mod error;
mod ids;
mod opacity;
mod tags;
mod task;

pub use column::{Column, default_columns};
pub use error::{BoardDomainError, ParseTaskPriorityError, ParseTaskStatusError};
pub use ids::{ColumnId, PrincipalId, TaskId, TaskTitle};
pub use opacity::DisplayOpacity;
pub use tags::PREDEFINED_TAGS;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
