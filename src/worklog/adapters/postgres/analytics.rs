//! `PostgreSQL` implementation of the analytics port.

use super::{
    analytics_sql::{
        DAILY_COUNTS_SQL, STATUS_COUNTS_SQL, TYPE_COUNTS_SQL, completed_counts_statement,
        task_summary_statement,
    },
    models::{BucketCountRow, DailyCountRow, LabelCountRow, SummaryRow},
    repository::{PersistenceFailure, PostgresWorkLogRepository},
};
use crate::worklog::{
    domain::{
        CompletedBucketCount, CompletedCountWindow, TaskStatus, TaskSummary, TaskType,
        WorkLogDomainError,
    },
    ports::{AnalyticsError, AnalyticsResult, WorkLogAnalytics},
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

impl PersistenceFailure for AnalyticsError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

fn to_count(value: i64) -> AnalyticsResult<u64> {
    u64::try_from(value).map_err(AnalyticsError::persistence)
}

fn grouped_counts<K>(
    connection: &mut PgConnection,
    sql: &'static str,
    parse: impl Fn(&str) -> Result<K, WorkLogDomainError>,
) -> AnalyticsResult<Vec<(K, u64)>> {
    diesel::sql_query(sql)
        .load::<LabelCountRow>(connection)
        .map_err(AnalyticsError::persistence)?
        .into_iter()
        .map(|row| {
            let key = parse(row.label.as_str()).map_err(AnalyticsError::persistence)?;
            Ok((key, to_count(row.total)?))
        })
        .collect()
}

#[async_trait]
impl WorkLogAnalytics for PostgresWorkLogRepository {
    async fn status_counts(&self) -> AnalyticsResult<Vec<(TaskStatus, u64)>> {
        self.run_blocking(|connection| {
            grouped_counts(connection, STATUS_COUNTS_SQL, |label| {
                TaskStatus::try_from(label)
            })
        })
        .await
    }

    async fn type_counts(&self) -> AnalyticsResult<Vec<(TaskType, u64)>> {
        self.run_blocking(|connection| {
            grouped_counts(connection, TYPE_COUNTS_SQL, |label| TaskType::try_from(label))
        })
        .await
    }

    async fn daily_counts(&self) -> AnalyticsResult<Vec<(NaiveDate, u64)>> {
        self.run_blocking(|connection| {
            diesel::sql_query(DAILY_COUNTS_SQL)
                .load::<DailyCountRow>(connection)
                .map_err(AnalyticsError::persistence)?
                .into_iter()
                .map(|row| Ok((row.created_date, to_count(row.total)?)))
                .collect()
        })
        .await
    }

    async fn completed_counts(
        &self,
        window: CompletedCountWindow,
        now: DateTime<Utc>,
    ) -> AnalyticsResult<Vec<CompletedBucketCount>> {
        self.run_blocking(move |connection| {
            completed_counts_statement(window, now)
                .load::<BucketCountRow>(connection)
                .map_err(AnalyticsError::persistence)?
                .into_iter()
                .map(|row| {
                    Ok(CompletedBucketCount {
                        completed_at: row.bucket_start,
                        task_count: to_count(row.task_count)?,
                    })
                })
                .collect()
        })
        .await
    }

    async fn task_summary(&self) -> AnalyticsResult<TaskSummary> {
        self.run_blocking(|connection| {
            let row = task_summary_statement()
                .get_result::<SummaryRow>(connection)
                .map_err(AnalyticsError::persistence)?;
            Ok(TaskSummary {
                total_tasks: to_count(row.total_tasks)?,
                total_bugs: to_count(row.total_bugs)?,
                total_progress_tasks: to_count(row.total_progress_tasks)?,
                highest_priority_tasks: to_count(row.highest_priority_tasks)?,
            })
        })
        .await
    }
}
