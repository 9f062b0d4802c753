//! Port for fixed-shape, read-only aggregation queries.

use crate::worklog::domain::{
    CompletedBucketCount, CompletedCountWindow, TaskStatus, TaskSummary, TaskType,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for analytics queries.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Aggregation contract. Every query is idempotent and side-effect free.
#[async_trait]
pub trait WorkLogAnalytics: Send + Sync {
    /// Returns the number of logs in each status present in the store.
    async fn status_counts(&self) -> AnalyticsResult<Vec<(TaskStatus, u64)>>;

    /// Returns the number of logs of each type present in the store.
    async fn type_counts(&self) -> AnalyticsResult<Vec<(TaskType, u64)>>;

    /// Returns logs created per UTC calendar day, ascending.
    async fn daily_counts(&self) -> AnalyticsResult<Vec<(NaiveDate, u64)>>;

    /// Returns completed-log counts for every bucket in the window ending
    /// at `now`, ascending, with empty buckets reported as zero.
    async fn completed_counts(
        &self,
        window: CompletedCountWindow,
        now: DateTime<Utc>,
    ) -> AnalyticsResult<Vec<CompletedBucketCount>>;

    /// Returns the headline counters.
    async fn task_summary(&self) -> AnalyticsResult<TaskSummary>;
}

/// Errors returned by analytics implementations.
#[derive(Debug, Clone, Error)]
pub enum AnalyticsError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AnalyticsError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
