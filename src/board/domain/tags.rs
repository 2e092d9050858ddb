//! Tag vocabulary offered for quick selection.

/// Labels surfaced as quick-select suggestions when tagging a task.
///
/// Not a closed set; arbitrary labels are always accepted.
pub const PREDEFINED_TAGS: [&str; 12] = [
    "bug",
    "feature",
    "enhancement",
    "documentation",
    "urgent",
    "design",
    "frontend",
    "backend",
    "testing",
    "research",
    "meeting",
    "review",
];
