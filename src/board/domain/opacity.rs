//! Transient display-opacity hint for task cards.

use super::TaskStatus;
use chrono::{DateTime, TimeDelta, Utc};

/// Rendering hint signalling that a card should be dimmed.
///
/// Derived at read time from the task's state; never persisted, so the two
/// storage backends cannot diverge on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DisplayOpacity {
    /// Fully opaque.
    #[default]
    Full,
    /// Dimmed, signalling a done task due for cleanup.
    Dimmed,
}

impl DisplayOpacity {
    /// Hours a task must sit in the done lane before its card dims.
    const DIMMED_AFTER_HOURS: i64 = 24;

    /// Computes the hint for a task from its status and last update.
    #[must_use]
    pub fn for_task(status: TaskStatus, updated_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let stale = now.signed_duration_since(updated_at)
            >= TimeDelta::hours(Self::DIMMED_AFTER_HOURS);
        if status == TaskStatus::Done && stale {
            Self::Dimmed
        } else {
            Self::Full
        }
    }

    /// Returns the CSS opacity value for this hint.
    #[must_use]
    pub const fn as_f32(self) -> f32 {
        match self {
            Self::Full => 1.0,
            Self::Dimmed => 0.8,
        }
    }
}
