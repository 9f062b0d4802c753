//! Fixed-shape aggregation statements.

use super::listing_sql::BoxedStatement;
use crate::worklog::domain::{CompletedCountWindow, Priority, TaskStatus, TaskType};
use chrono::{DateTime, Utc};
use diesel::sql_types::{Int2, Text, Timestamptz};

/// Logs per status.
pub const STATUS_COUNTS_SQL: &str =
    "SELECT task_status AS label, count(*) AS total FROM logs GROUP BY task_status";

/// Logs per type.
pub const TYPE_COUNTS_SQL: &str =
    "SELECT task_type AS label, count(*) AS total FROM logs GROUP BY task_type";

/// Logs created per UTC day, ascending.
pub const DAILY_COUNTS_SQL: &str = "SELECT (created_at AT TIME ZONE 'UTC')::date AS created_date, \
                                    count(*) AS total \
                                    FROM logs \
                                    GROUP BY created_date \
                                    ORDER BY created_date";

/// Gap-filled completed counts.
///
/// Binds: `$1` bucket field, `$2` lookback interval, `$3` now, `$4` step
/// interval. Bucketing is done on UTC wall-clock time.
pub const COMPLETED_COUNTS_SQL: &str = "WITH bucket_series AS ( \
         SELECT generate_series( \
             date_trunc($1, ($3 AT TIME ZONE 'UTC') - $2::interval), \
             date_trunc($1, $3 AT TIME ZONE 'UTC'), \
             $4::interval \
         ) AS bucket_start \
     ), \
     completed_by_bucket AS ( \
         SELECT date_trunc($1, completed_at AT TIME ZONE 'UTC') AS bucket_start, \
                count(*) AS task_count \
         FROM logs \
         WHERE completed_at IS NOT NULL \
         GROUP BY 1 \
     ) \
     SELECT (s.bucket_start AT TIME ZONE 'UTC') AS bucket_start, \
            COALESCE(c.task_count, 0) AS task_count \
     FROM bucket_series s \
     LEFT JOIN completed_by_bucket c ON c.bucket_start = s.bucket_start \
     ORDER BY s.bucket_start";

/// Headline counters.
///
/// Binds: `$1` bug type, `$2` in-progress status, `$3` highest priority.
pub const TASK_SUMMARY_SQL: &str = "SELECT count(*) AS total_tasks, \
         count(*) FILTER (WHERE task_type = $1) AS total_bugs, \
         count(*) FILTER (WHERE task_status = $2) AS total_progress_tasks, \
         count(*) FILTER (WHERE priority = $3) AS highest_priority_tasks \
     FROM logs";

/// Builds the completed-count statement for a window ending at `now`.
#[must_use]
pub fn completed_counts_statement(
    window: CompletedCountWindow,
    now: DateTime<Utc>,
) -> BoxedStatement {
    diesel::sql_query(COMPLETED_COUNTS_SQL)
        .into_boxed()
        .bind::<Text, _>(window.granularity.as_str())
        .bind::<Text, _>(window.lookback.as_interval())
        .bind::<Timestamptz, _>(now)
        .bind::<Text, _>(window.granularity.step_interval())
}

/// Builds the headline counter statement.
#[must_use]
pub fn task_summary_statement() -> BoxedStatement {
    diesel::sql_query(TASK_SUMMARY_SQL)
        .into_boxed()
        .bind::<Text, _>(TaskType::Bug.as_str())
        .bind::<Text, _>(TaskStatus::Progress.as_str())
        .bind::<Int2, _>(Priority::Highest.value())
}
