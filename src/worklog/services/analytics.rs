//! Service layer for dashboard aggregations.

use crate::worklog::{
    domain::{
        CompletedBucketCount, CompletedCountWindow, DailyTaskCount, StatusShare, TaskSummary,
        TypeShare, status_shares, type_shares,
    },
    ports::{AnalyticsResult, WorkLogAnalytics},
};
use mockable::Clock;
use std::sync::Arc;

/// Aggregation service over stored work logs.
#[derive(Clone)]
pub struct AnalyticsService<A, C>
where
    A: WorkLogAnalytics,
    C: Clock + Send + Sync,
{
    analytics: Arc<A>,
    clock: Arc<C>,
}

impl<A, C> AnalyticsService<A, C>
where
    A: WorkLogAnalytics,
    C: Clock + Send + Sync,
{
    /// Creates a new analytics service.
    #[must_use]
    pub const fn new(analytics: Arc<A>, clock: Arc<C>) -> Self {
        Self { analytics, clock }
    }

    /// Counts and percentage share per task status.
    ///
    /// # Errors
    ///
    /// Returns [`crate::worklog::ports::AnalyticsError`] when the query fails.
    pub async fn status_summary(&self) -> AnalyticsResult<Vec<StatusShare>> {
        let counts = self.analytics.status_counts().await?;
        Ok(status_shares(&counts))
    }

    /// Counts and percentage share per task type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::worklog::ports::AnalyticsError`] when the query fails.
    pub async fn type_summary(&self) -> AnalyticsResult<Vec<TypeShare>> {
        let counts = self.analytics.type_counts().await?;
        Ok(type_shares(&counts))
    }

    /// Logs created per UTC day, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::worklog::ports::AnalyticsError`] when the query fails.
    pub async fn daily_task_counts(&self) -> AnalyticsResult<Vec<DailyTaskCount>> {
        let counts = self.analytics.daily_counts().await?;
        Ok(counts
            .into_iter()
            .map(|(date, count)| DailyTaskCount::new(date, count))
            .collect())
    }

    /// Completed logs per bucket over the lookback window ending now.
    ///
    /// # Errors
    ///
    /// Returns [`crate::worklog::ports::AnalyticsError`] when the query fails.
    pub async fn completed_task_counts(
        &self,
        window: CompletedCountWindow,
    ) -> AnalyticsResult<Vec<CompletedBucketCount>> {
        self.analytics
            .completed_counts(window, self.clock.utc())
            .await
    }

    /// Headline counters for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`crate::worklog::ports::AnalyticsError`] when the query fails.
    pub async fn task_summary(&self) -> AnalyticsResult<TaskSummary> {
        self.analytics.task_summary().await
    }
}
