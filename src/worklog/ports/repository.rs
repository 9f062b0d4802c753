//! Repository port for work log persistence, lookup and listing.

use crate::worklog::domain::{ListQuery, LogPage, TaskName, WorkLog, WorkLogId, WorkLogPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for work log repository operations.
pub type WorkLogRepositoryResult<T> = Result<T, WorkLogRepositoryError>;

/// Work log persistence contract.
///
/// Implementations hold no cross-request state beyond the store itself;
/// every call reads through to storage.
#[async_trait]
pub trait WorkLogRepository: Send + Sync {
    /// Stores a new work log.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogRepositoryError::DuplicateTaskName`] when another
    /// log already uses the task name or
    /// [`WorkLogRepositoryError::DuplicateLog`] when the identifier exists.
    async fn store(&self, log: &WorkLog) -> WorkLogRepositoryResult<()>;

    /// Finds a work log by identifier.
    ///
    /// Returns `None` when the log does not exist.
    async fn find_by_id(&self, id: WorkLogId) -> WorkLogRepositoryResult<Option<WorkLog>>;

    /// Reports whether a work log with the identifier exists.
    async fn exists(&self, id: WorkLogId) -> WorkLogRepositoryResult<bool>;

    /// Reports whether any work log uses the task name.
    async fn exists_by_name(&self, task_name: &TaskName) -> WorkLogRepositoryResult<bool>;

    /// Applies a sparse patch and sets `updated_at`, returning the
    /// refreshed log.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogRepositoryError::NotFound`] when the log does not
    /// exist and [`WorkLogRepositoryError::DuplicateTaskName`] when the
    /// patch renames the log onto a name already in use.
    async fn update(
        &self,
        id: WorkLogId,
        patch: &WorkLogPatch,
        updated_at: DateTime<Utc>,
    ) -> WorkLogRepositoryResult<WorkLog>;

    /// Physically deletes one work log.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogRepositoryError::NotFound`] when no row was removed.
    async fn delete(&self, id: WorkLogId) -> WorkLogRepositoryResult<()>;

    /// Deletes every listed work log in one statement and returns the
    /// number of rows removed. Unknown identifiers are ignored.
    async fn delete_many(&self, ids: &[WorkLogId]) -> WorkLogRepositoryResult<u64>;

    /// Returns one page of logs, sorted or search-ranked per the query.
    async fn list(&self, query: &ListQuery) -> WorkLogRepositoryResult<LogPage>;
}

/// Errors returned by work log repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkLogRepositoryError {
    /// A log with the same identifier already exists.
    #[error("duplicate log identifier: {0}")]
    DuplicateLog(WorkLogId),

    /// A log with the same task name already exists.
    #[error("Task name already exists: {0}")]
    DuplicateTaskName(TaskName),

    /// The log was not found.
    #[error("No records found with this log id: {0}")]
    NotFound(WorkLogId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkLogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
