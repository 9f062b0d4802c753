//! Transport-neutral handlers for every work log endpoint.
//!
//! Each method takes the raw path segment, body text or decoded query
//! parameters a router would extract, and returns either the success body
//! or an [`ApiError`] carrying its status.

use super::{
    error::ApiError,
    requests::{
        BulkDeleteParams, CompletedCountParams, CreateLogBody, ListLogsParams, UpdateLogBody,
    },
    responses::{
        BulkDeleteResponse, CompletedCountResponse, DailyTasksResponse, LogResponse,
        MessageResponse, StatusSummaryResponse, TaskSummaryResponse, TypeSummaryResponse,
    },
};
use crate::worklog::{
    domain::{LogPage, WorkLogId},
    ports::{WorkLogAnalytics, WorkLogRepository},
    services::{AnalyticsService, WorkLogService},
};
use mockable::Clock;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Result type for handler operations.
pub type ApiResult<T> = Result<T, ApiError>;

fn parse_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|err| ApiError::malformed_json(&err))
}

fn parse_id(raw: &str) -> ApiResult<WorkLogId> {
    Ok(raw.trim().parse::<WorkLogId>()?)
}

/// Endpoint handlers over one store.
#[derive(Clone)]
pub struct WorkLogApi<S, C>
where
    S: WorkLogRepository + WorkLogAnalytics,
    C: Clock + Send + Sync,
{
    logs: WorkLogService<S, C>,
    analytics: AnalyticsService<S, C>,
}

impl<S, C> WorkLogApi<S, C>
where
    S: WorkLogRepository + WorkLogAnalytics,
    C: Clock + Send + Sync,
{
    /// Creates handlers sharing one store and clock.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            logs: WorkLogService::new(Arc::clone(&store), Arc::clone(&clock)),
            analytics: AnalyticsService::new(store, clock),
        }
    }

    /// `GET /ping`: plain-text liveness body.
    #[must_use]
    #[expect(
        clippy::unused_self,
        reason = "kept as a method so every endpoint hangs off the handler set"
    )]
    pub const fn ping(&self) -> &'static str {
        "pong"
    }

    /// `GET /logs`
    ///
    /// # Errors
    ///
    /// Returns 422 for malformed parameters and 500 for store failures.
    pub async fn list_logs(&self, params: &ListLogsParams) -> ApiResult<LogPage> {
        let query = params.to_query()?;
        debug!(?query, "listing work logs");
        Ok(self.logs.list(&query).await?)
    }

    /// `GET /log/{id}`
    ///
    /// # Errors
    ///
    /// Returns 422 for a malformed id and 404 when the log is missing.
    pub async fn get_log(&self, log_id: &str) -> ApiResult<LogResponse> {
        let log = self.logs.get(parse_id(log_id)?).await?;
        Ok(LogResponse { message: "Ok", log })
    }

    /// `POST /log`
    ///
    /// # Errors
    ///
    /// Returns 400 for malformed JSON, 422 for invalid fields and 409 for
    /// a duplicate task name.
    pub async fn create_log(&self, raw_body: &str) -> ApiResult<LogResponse> {
        let body: CreateLogBody = parse_body(raw_body)?;
        let log = self.logs.create(body.into()).await?;
        Ok(LogResponse {
            message: "Log created successfully",
            log,
        })
    }

    /// `PUT /log`
    ///
    /// # Errors
    ///
    /// Returns 400 for malformed JSON or a body with nothing to change, 422
    /// for invalid fields, 404 for an unknown id and 409 when renaming onto
    /// a taken name.
    pub async fn update_log(&self, raw_body: &str) -> ApiResult<LogResponse> {
        let body: UpdateLogBody = parse_body(raw_body)?;
        let (id, request) = body.into_parts()?;
        let log = self.logs.update(id, request).await?;
        Ok(LogResponse {
            message: "Log updated successfully",
            log,
        })
    }

    /// `DELETE /log/{id}`
    ///
    /// # Errors
    ///
    /// Returns 422 for a malformed id and 404 when the log is missing.
    pub async fn delete_log(&self, log_id: &str) -> ApiResult<MessageResponse> {
        self.logs.delete(parse_id(log_id)?).await?;
        Ok(MessageResponse {
            message: "Log deleted successfully",
        })
    }

    /// `DELETE /logs`
    ///
    /// # Errors
    ///
    /// Returns 422 for a missing list or malformed id and 400 for a list
    /// that is not a JSON array.
    pub async fn delete_logs(&self, params: &BulkDeleteParams) -> ApiResult<BulkDeleteResponse> {
        let ids = params.ids()?;
        let row_count = self.logs.delete_many(&ids).await?;
        Ok(BulkDeleteResponse {
            message: "Logs deleted successfully",
            row_count,
        })
    }

    /// `GET /status-summary`
    ///
    /// # Errors
    ///
    /// Returns 500 for store failures.
    pub async fn status_summary(&self) -> ApiResult<StatusSummaryResponse> {
        Ok(StatusSummaryResponse {
            status_summary: self.analytics.status_summary().await?,
        })
    }

    /// `GET /type-summary`
    ///
    /// # Errors
    ///
    /// Returns 500 for store failures.
    pub async fn type_summary(&self) -> ApiResult<TypeSummaryResponse> {
        Ok(TypeSummaryResponse {
            type_summary: self.analytics.type_summary().await?,
        })
    }

    /// `GET /daily-task-count`
    ///
    /// # Errors
    ///
    /// Returns 500 for store failures.
    pub async fn daily_task_count(&self) -> ApiResult<DailyTasksResponse> {
        Ok(DailyTasksResponse {
            daily_tasks: self.analytics.daily_task_counts().await?,
        })
    }

    /// `GET /completed-task-count`
    ///
    /// # Errors
    ///
    /// Returns 422 for an unknown granularity or lookback and 500 for store
    /// failures.
    pub async fn completed_task_count(
        &self,
        params: &CompletedCountParams,
    ) -> ApiResult<CompletedCountResponse> {
        let window = params.window()?;
        Ok(CompletedCountResponse {
            message: "ok",
            completed_count: self.analytics.completed_task_counts(window).await?,
        })
    }

    /// `GET /task-summary`
    ///
    /// # Errors
    ///
    /// Returns 500 for store failures.
    pub async fn task_summary(&self) -> ApiResult<TaskSummaryResponse> {
        Ok(TaskSummaryResponse {
            task_summary: self.analytics.task_summary().await?,
        })
    }
}
