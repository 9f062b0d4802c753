//! Error types for work log validation and parsing.

use thiserror::Error;

/// Errors returned while constructing validated work log values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkLogDomainError {
    /// The task name is empty after trimming.
    #[error("Task name is required")]
    EmptyTaskName,

    /// The task name exceeds the persisted column width.
    #[error("Task name is {length} characters, exceeds limit of {max}")]
    TaskNameTooLong {
        /// Length of the supplied name in characters.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// The task type is not one of `task`, `bug` or `story`.
    #[error("Invalid task type: {0}")]
    InvalidTaskType(String),

    /// The task status is not one of the supported lifecycle values.
    #[error("Invalid task status: {0}")]
    InvalidTaskStatus(String),

    /// The priority is not one of 1, 5, 7 or 10.
    #[error("Invalid priority value: {0}")]
    InvalidPriority(i64),

    /// No log identifier was supplied.
    #[error("Log id is required")]
    MissingLogId,

    /// The log identifier is not a valid UUID.
    #[error("Invalid log id: {0}")]
    InvalidLogId(String),

    /// The sort key does not name a sortable column.
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    /// The sort direction is neither `asc` nor `desc`.
    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),

    /// The page size is outside the accepted range.
    #[error("Invalid limit value: {0}")]
    InvalidPageSize(String),

    /// The page index is negative or not a number.
    #[error("Invalid page value: {0}")]
    InvalidPage(String),

    /// The bucket granularity is neither `week` nor `month`.
    #[error("Invalid view value: {0}, expected week or month")]
    InvalidGranularity(String),

    /// The lookback window could not be parsed.
    #[error("Invalid duration value: {0}")]
    InvalidLookback(String),
}
