//! JSON response bodies.

use crate::worklog::domain::{
    CompletedBucketCount, DailyTaskCount, StatusShare, TaskSummary, TypeShare, WorkLog,
};
use serde::Serialize;

/// A single log with a status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogResponse {
    /// Outcome description.
    pub message: &'static str,
    /// The log.
    pub log: WorkLog,
}

/// A bare status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    /// Outcome description.
    pub message: &'static str,
}

/// Outcome of a bulk delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    /// Outcome description.
    pub message: &'static str,
    /// Rows actually removed.
    pub row_count: u64,
}

/// Per-status breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummaryResponse {
    /// One entry per status that has logs.
    pub status_summary: Vec<StatusShare>,
}

/// Per-type breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSummaryResponse {
    /// One entry per type that has logs.
    pub type_summary: Vec<TypeShare>,
}

/// Logs created per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTasksResponse {
    /// One entry per day with at least one log.
    pub daily_tasks: Vec<DailyTaskCount>,
}

/// Gap-filled completion series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedCountResponse {
    /// Outcome description.
    pub message: &'static str,
    /// One entry per bucket, ascending.
    pub completed_count: Vec<CompletedBucketCount>,
}

/// Headline counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummaryResponse {
    /// The counters.
    pub task_summary: TaskSummary,
}
