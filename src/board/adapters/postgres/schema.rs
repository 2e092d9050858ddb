//! Diesel schema for account-scoped board persistence.

diesel::table! {
    /// Task records, one row per task per principal.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning principal.
        principal -> Uuid,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Board status slug.
        #[max_length = 20]
        status -> Varchar,
        /// Priority slug.
        #[max_length = 10]
        priority -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Board columns, pre-seeded per principal.
    columns (id) {
        /// Column identifier.
        #[max_length = 64]
        id -> Varchar,
        /// Owning principal.
        principal -> Uuid,
        /// Display title.
        #[max_length = 100]
        title -> Varchar,
        /// Status slug this lane holds.
        #[max_length = 20]
        status -> Varchar,
        /// Optional display color.
        #[max_length = 16]
        color -> Nullable<Varchar>,
        /// Left-to-right sort order.
        position -> Int4,
    }
}

diesel::table! {
    /// Tag labels, unique per principal by name.
    tags (id) {
        /// Tag identifier.
        id -> Uuid,
        /// Owning principal.
        principal -> Uuid,
        /// Tag label.
        #[max_length = 100]
        name -> Varchar,
    }
}

diesel::table! {
    /// Many-to-many join between tasks and tags.
    task_tags (task_id, tag_id) {
        /// Tagged task.
        task_id -> Uuid,
        /// Applied tag.
        tag_id -> Uuid,
    }
}

diesel::joinable!(task_tags -> tasks (task_id));
diesel::joinable!(task_tags -> tags (tag_id));

diesel::allow_tables_to_appear_in_same_query!(tasks, columns, tags, task_tags);
