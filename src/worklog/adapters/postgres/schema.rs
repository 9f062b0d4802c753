//! Diesel schema for work log persistence.
//!
//! The generated `ts` tsvector column is omitted; it is only referenced
//! from hand-written search SQL.

diesel::table! {
    /// Work log records.
    logs (log_id) {
        /// Work log identifier.
        log_id -> Uuid,
        /// Unique task name.
        #[max_length = 255]
        task_name -> Varchar,
        /// Task type: task, bug or story.
        #[max_length = 20]
        task_type -> Varchar,
        /// Task status: backlog, pending, progress, pr or staging.
        #[max_length = 20]
        task_status -> Varchar,
        /// Priority: 1, 5, 7 or 10.
        priority -> Int2,
        /// Optional notes.
        notes -> Nullable<Text>,
        /// When work started.
        started_at -> Nullable<Timestamptz>,
        /// When work completed.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
