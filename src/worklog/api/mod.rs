//! JSON surface for work logs, independent of any HTTP framework.
//!
//! A router maps each endpoint onto a [`WorkLogApi`] method, serialises
//! the returned body, and on failure sends [`ApiError::status`] with
//! [`ApiError::body`].

mod error;
mod handlers;
mod requests;
mod responses;

pub use error::{ApiError, DUPLICATE_NAME_MESSAGE, ErrorBody, NOT_FOUND_MESSAGE};
pub use handlers::{ApiResult, WorkLogApi};
pub use requests::{
    BulkDeleteParams, CompletedCountParams, CreateLogBody, ListLogsParams, UpdateLogBody,
};
pub use responses::{
    BulkDeleteResponse, CompletedCountResponse, DailyTasksResponse, LogResponse, MessageResponse,
    StatusSummaryResponse, TaskSummaryResponse, TypeSummaryResponse,
};
