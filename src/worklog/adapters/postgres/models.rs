//! Diesel row models for work log persistence.

use super::schema::logs;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for work log records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkLogRow {
    /// Work log identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub log_id: uuid::Uuid,
    /// Task name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub task_name: String,
    /// Task type storage value.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub task_type: String,
    /// Task status storage value.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub task_status: String,
    /// Priority value.
    #[diesel(sql_type = diesel::sql_types::Int2)]
    pub priority: i16,
    /// Notes, `NULL` when never written.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub notes: Option<String>,
    /// Start timestamp.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub started_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Listing row: a work log plus the window count of matching rows.
#[derive(Debug, Clone, QueryableByName)]
pub struct ListedWorkLogRow {
    /// The work log columns.
    #[diesel(embed)]
    pub log: WorkLogRow,
    /// `count(*) OVER ()` across the filtered set.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total_count: i64,
}

/// Insert model for work log records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = logs)]
pub struct NewWorkLogRow {
    /// Work log identifier.
    pub log_id: uuid::Uuid,
    /// Task name.
    pub task_name: String,
    /// Task type storage value.
    pub task_type: String,
    /// Task status storage value.
    pub task_status: String,
    /// Priority value.
    pub priority: i16,
    /// Notes.
    pub notes: Option<String>,
    /// Start timestamp.
    pub started_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Sparse update model. `None` fields are left out of the `SET` clause.
#[derive(Debug, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = logs)]
pub struct WorkLogChangeset {
    /// New task name.
    pub task_name: Option<String>,
    /// New task type storage value.
    pub task_type: Option<String>,
    /// New task status storage value.
    pub task_status: Option<String>,
    /// New priority value.
    pub priority: Option<i16>,
    /// New notes.
    pub notes: Option<String>,
    /// New start timestamp.
    pub started_at: Option<DateTime<Utc>>,
    /// New completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Always written.
    pub updated_at: DateTime<Utc>,
}

/// Row carrying a single count.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct CountRow {
    /// Count value.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total_count: i64,
}

/// Grouped count keyed by a text label.
#[derive(Debug, Clone, QueryableByName)]
pub struct LabelCountRow {
    /// Group label.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub label: String,
    /// Rows in the group.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total: i64,
}

/// Logs created on one UTC day.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct DailyCountRow {
    /// UTC calendar day.
    #[diesel(sql_type = diesel::sql_types::Date)]
    pub created_date: NaiveDate,
    /// Logs created that day.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total: i64,
}

/// Completed logs in one bucket of a gap-filled series.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct BucketCountRow {
    /// Bucket start.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub bucket_start: DateTime<Utc>,
    /// Logs completed within the bucket.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub task_count: i64,
}

/// Headline counters row.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct SummaryRow {
    /// Every log.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total_tasks: i64,
    /// Bug logs.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total_bugs: i64,
    /// Logs in progress.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total_progress_tasks: i64,
    /// Logs at the highest priority.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub highest_priority_tasks: i64,
}
