//! JSON request bodies and query parameters.
//!
//! Field names follow the dashboard client's camelCase wire format. Query
//! parameters arrive as raw strings so that malformed values surface as
//! validation failures rather than transport errors.

use super::error::ApiError;
use crate::worklog::{
    domain::{
        BucketGranularity, CompletedCountWindow, ListQuery, Lookback, PageIndex, PageSize,
        SortField, SortOrder, WorkLogDomainError, WorkLogId,
    },
    services::{CreateWorkLogRequest, UpdateWorkLogRequest, WorkLogServiceError},
};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Treats absent and blank parameters alike.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// Body of `POST /log`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogBody {
    /// Task name; required.
    #[serde(default)]
    pub task_name: String,
    /// Task type; required.
    #[serde(default)]
    pub task_type: String,
    /// Task status; required.
    #[serde(default)]
    pub task_status: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Work start, RFC 3339 with any offset.
    pub started_at: Option<DateTime<FixedOffset>>,
    /// Work completion, RFC 3339 with any offset.
    pub completed_at: Option<DateTime<FixedOffset>>,
    /// Priority, one of 1, 5, 7 or 10.
    pub priority: Option<i64>,
}

impl From<CreateLogBody> for CreateWorkLogRequest {
    fn from(body: CreateLogBody) -> Self {
        let mut request = Self::new(body.task_name, body.task_type, body.task_status);
        if let Some(notes) = body.notes {
            request = request.with_notes(notes);
        }
        if let Some(started_at) = body.started_at {
            request = request.with_started_at(started_at);
        }
        if let Some(completed_at) = body.completed_at {
            request = request.with_completed_at(completed_at);
        }
        if let Some(priority) = body.priority {
            request = request.with_priority(priority);
        }
        request
    }
}

/// Body of `PUT /log`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogBody {
    /// Target log; required.
    pub log_id: Option<String>,
    /// Replacement task name.
    pub task_name: Option<String>,
    /// Replacement task type.
    pub task_type: Option<String>,
    /// Replacement task status.
    pub task_status: Option<String>,
    /// Replacement notes.
    pub notes: Option<String>,
    /// Replacement start timestamp.
    pub started_at: Option<DateTime<FixedOffset>>,
    /// Replacement completion timestamp.
    pub completed_at: Option<DateTime<FixedOffset>>,
    /// Replacement priority.
    pub priority: Option<i64>,
}

impl UpdateLogBody {
    /// Splits the body into the target id and the sparse update request.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::MissingLogId`] when no id was sent and
    /// [`WorkLogDomainError::InvalidLogId`] when it is not a UUID.
    pub fn into_parts(self) -> Result<(WorkLogId, UpdateWorkLogRequest), WorkLogDomainError> {
        let id = present(self.log_id.as_deref())
            .ok_or(WorkLogDomainError::MissingLogId)?
            .parse::<WorkLogId>()?;

        let mut request = UpdateWorkLogRequest::new();
        if let Some(task_name) = self.task_name {
            request = request.with_task_name(task_name);
        }
        if let Some(task_type) = self.task_type {
            request = request.with_task_type(task_type);
        }
        if let Some(task_status) = self.task_status {
            request = request.with_task_status(task_status);
        }
        if let Some(notes) = self.notes {
            request = request.with_notes(notes);
        }
        if let Some(started_at) = self.started_at {
            request = request.with_started_at(started_at);
        }
        if let Some(completed_at) = self.completed_at {
            request = request.with_completed_at(completed_at);
        }
        if let Some(priority) = self.priority {
            request = request.with_priority(priority);
        }
        Ok((id, request))
    }
}

/// Query parameters of `GET /logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLogsParams {
    /// Free-text search.
    pub s: Option<String>,
    /// Sort key.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Zero-based page index.
    pub page: Option<String>,
}

impl ListLogsParams {
    /// Decodes the parameters into a listing query, defaulting any that
    /// are absent or blank.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError`] for an unknown sort key or order and
    /// for a limit or page that is non-numeric or out of range.
    pub fn to_query(&self) -> Result<ListQuery, WorkLogDomainError> {
        let mut query = ListQuery::new();
        if let Some(text) = self.s.as_deref() {
            query = query.with_search(text);
        }
        if let Some(sort_by) = present(self.sort_by.as_deref()) {
            query = query.with_sort_field(SortField::try_from(sort_by)?);
        }
        if let Some(sort_order) = present(self.sort_order.as_deref()) {
            query = query.with_sort_order(SortOrder::try_from(sort_order)?);
        }
        if let Some(limit) = present(self.limit.as_deref()) {
            let value = limit
                .parse::<i64>()
                .map_err(|_| WorkLogDomainError::InvalidPageSize(limit.to_owned()))?;
            query = query.with_page_size(PageSize::new(value)?);
        }
        if let Some(page) = present(self.page.as_deref()) {
            let value = page
                .parse::<i64>()
                .map_err(|_| WorkLogDomainError::InvalidPage(page.to_owned()))?;
            query = query.with_page(PageIndex::new(value)?);
        }
        Ok(query)
    }
}

/// Query parameters of `DELETE /logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteParams {
    /// JSON array of log ids, for example `["…","…"]`.
    pub log_ids: Option<String>,
}

impl BulkDeleteParams {
    /// Decodes the id list.
    ///
    /// # Errors
    ///
    /// Returns a 422 [`ApiError`] for a missing or empty list or a malformed
    /// id, and a 400 [`ApiError`] when the parameter is not a JSON array of
    /// strings.
    pub fn ids(&self) -> Result<Vec<WorkLogId>, ApiError> {
        let raw = present(self.log_ids.as_deref()).ok_or(WorkLogServiceError::NoIdsToDelete)?;
        let values: Vec<String> =
            serde_json::from_str(raw).map_err(|err| ApiError::malformed_json(&err))?;
        if values.is_empty() {
            return Err(WorkLogServiceError::NoIdsToDelete.into());
        }
        values
            .iter()
            .map(|value| value.parse::<WorkLogId>().map_err(ApiError::from))
            .collect()
    }
}

/// Query parameters of `GET /completed-task-count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompletedCountParams {
    /// Bucket granularity, `week` or `month`.
    pub v: Option<String>,
    /// Lookback such as `3 months`.
    pub d: Option<String>,
}

impl CompletedCountParams {
    /// Decodes the bucket window, defaulting to weekly buckets over one
    /// month.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError`] for an unknown granularity or an
    /// unparseable lookback.
    pub fn window(&self) -> Result<CompletedCountWindow, WorkLogDomainError> {
        let granularity = present(self.v.as_deref())
            .map(BucketGranularity::try_from)
            .transpose()?
            .unwrap_or_default();
        let lookback = present(self.d.as_deref())
            .map(str::parse::<Lookback>)
            .transpose()?
            .unwrap_or_default();
        Ok(CompletedCountWindow::new(granularity, lookback))
    }
}
