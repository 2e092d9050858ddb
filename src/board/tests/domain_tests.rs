//! Domain-focused tests for task validation and board rules.

use super::support::{StepClock, draft, epoch};
use crate::board::domain::{
    BoardDomainError, DisplayOpacity, PREDEFINED_TAGS, PersistedTaskData, Task, TaskId,
    TaskPatch, TaskPriority, TaskStatus, TaskTitle, default_columns,
};
use chrono::TimeDelta;
use mockable::DefaultClock;
use rstest::rstest;
use std::collections::BTreeSet;

#[rstest]
fn title_accepts_boundary_lengths() {
    let single = TaskTitle::new("a").expect("one character is valid");
    assert_eq!(single.as_str(), "a");

    let hundred = "a".repeat(100);
    let at_limit = TaskTitle::new(hundred.clone()).expect("100 characters is valid");
    assert_eq!(at_limit.as_str(), hundred);
}

#[rstest]
fn title_rejects_overlong_values() {
    let result = TaskTitle::new("a".repeat(101));
    assert_eq!(
        result,
        Err(BoardDomainError::TitleTooLong {
            limit: 100,
            length: 101,
        })
    );
}

#[rstest]
#[case("")]
#[case("   ")]
fn title_rejects_empty_values(#[case] value: &str) {
    assert_eq!(TaskTitle::new(value), Err(BoardDomainError::EmptyTitle));
}

#[rstest]
#[case(TaskStatus::Backlog, "backlog")]
#[case(TaskStatus::Ready, "ready")]
#[case(TaskStatus::InProgress, "in-progress")]
#[case(TaskStatus::Done, "done")]
fn status_round_trips_storage_representation(#[case] status: TaskStatus, #[case] slug: &str) {
    assert_eq!(status.as_str(), slug);
    assert_eq!(TaskStatus::try_from(slug), Ok(status));
}

#[rstest]
fn status_parsing_normalizes_case_and_whitespace() {
    assert_eq!(TaskStatus::try_from(" Done "), Ok(TaskStatus::Done));
    assert!(TaskStatus::try_from("doing").is_err());
}

#[rstest]
#[case(TaskPriority::Low, "low")]
#[case(TaskPriority::Medium, "medium")]
#[case(TaskPriority::High, "high")]
#[case(TaskPriority::Urgent, "urgent")]
fn priority_round_trips_storage_representation(
    #[case] priority: TaskPriority,
    #[case] slug: &str,
) {
    assert_eq!(priority.as_str(), slug);
    assert_eq!(TaskPriority::try_from(slug), Ok(priority));
}

#[rstest]
fn new_task_defaults_to_backlog_with_equal_timestamps() {
    let task = Task::new(
        draft("Write spec")
            .with_priority(TaskPriority::High)
            .with_tags(vec!["research".to_owned()]),
        &DefaultClock,
    );

    assert_eq!(task.title().as_str(), "Write spec");
    assert_eq!(task.status(), TaskStatus::Backlog);
    assert_eq!(task.priority(), TaskPriority::High);
    assert!(task.tags().contains("research"));
    assert_eq!(task.created_at(), task.updated_at());
    assert_eq!(task.opacity(), DisplayOpacity::Full);
}

#[rstest]
fn apply_merges_fields_and_advances_update_timestamp() {
    let clock = StepClock::new(epoch());
    let mut task = Task::new(draft("Refine backlog"), &clock);
    let before = task.updated_at();

    task.apply(
        &TaskPatch::new()
            .with_description("groom the backlog column")
            .with_priority(TaskPriority::Urgent),
        &clock,
    );

    assert!(task.updated_at() > before);
    assert_eq!(task.title().as_str(), "Refine backlog");
    assert_eq!(task.status(), TaskStatus::Backlog);
    assert_eq!(task.description(), Some("groom the backlog column"));
    assert_eq!(task.priority(), TaskPriority::Urgent);
}

#[rstest]
fn apply_replaces_tags_when_patch_carries_them() {
    let clock = StepClock::new(epoch());
    let mut task = Task::new(
        draft("Tag housekeeping").with_tags(vec!["bug".to_owned()]),
        &clock,
    );

    task.apply(
        &TaskPatch::new().with_tags(vec!["review".to_owned(), "review".to_owned()]),
        &clock,
    );

    let expected: BTreeSet<String> = ["review".to_owned()].into();
    assert_eq!(task.tags(), &expected);
}

#[rstest]
fn set_status_preview_keeps_update_timestamp() {
    let clock = StepClock::new(epoch());
    let mut task = Task::new(draft("Preview move"), &clock);
    let before = task.updated_at();

    task.set_status(TaskStatus::InProgress);

    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.updated_at(), before);
}

#[rstest]
#[case(TaskStatus::Done, 25, DisplayOpacity::Dimmed)]
#[case(TaskStatus::Done, 1, DisplayOpacity::Full)]
#[case(TaskStatus::Backlog, 25, DisplayOpacity::Full)]
#[case(TaskStatus::InProgress, 48, DisplayOpacity::Full)]
fn opacity_dims_only_stale_done_tasks(
    #[case] status: TaskStatus,
    #[case] age_hours: i64,
    #[case] expected: DisplayOpacity,
) {
    let updated_at = epoch();
    let now = updated_at + TimeDelta::hours(age_hours);
    assert_eq!(DisplayOpacity::for_task(status, updated_at, now), expected);
}

#[rstest]
fn opacity_maps_to_css_values() {
    assert!((DisplayOpacity::Full.as_f32() - 1.0).abs() < f32::EPSILON);
    assert!((DisplayOpacity::Dimmed.as_f32() - 0.8).abs() < f32::EPSILON);
}

#[rstest]
fn stale_done_task_reads_back_dimmed() {
    let updated_at = epoch();
    let task = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: TaskTitle::new("Ship release notes").expect("valid title"),
        description: None,
        status: TaskStatus::Done,
        priority: TaskPriority::Low,
        due_date: None,
        tags: BTreeSet::new(),
        created_at: updated_at,
        updated_at,
    });

    let read_back = task.with_display_opacity(updated_at + TimeDelta::hours(30));
    assert_eq!(read_back.opacity(), DisplayOpacity::Dimmed);
}

#[rstest]
fn default_columns_cover_every_status_in_order() {
    let columns = default_columns();

    assert_eq!(columns.len(), 4);
    let orders: Vec<i32> = columns.iter().map(|column| column.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);

    let statuses: Vec<TaskStatus> = columns.iter().map(|column| column.status).collect();
    assert_eq!(statuses, TaskStatus::ALL.to_vec());

    let colors: BTreeSet<Option<String>> =
        columns.iter().map(|column| column.color.clone()).collect();
    assert_eq!(colors.len(), 4, "seed colors are distinct");
}

#[rstest]
fn predefined_tag_vocabulary_is_stable() {
    assert_eq!(PREDEFINED_TAGS.len(), 12);
    assert!(PREDEFINED_TAGS.contains(&"bug"));
    assert!(PREDEFINED_TAGS.contains(&"review"));
}
