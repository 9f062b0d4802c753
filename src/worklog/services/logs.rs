//! Service layer for work log creation, retrieval, update and deletion.

use super::requests::{CreateWorkLogRequest, UpdateWorkLogRequest};
use crate::worklog::{
    domain::{ListQuery, LogPage, WorkLog, WorkLogDomainError, WorkLogId, stored_precision},
    ports::{WorkLogRepository, WorkLogRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for work log operations.
#[derive(Debug, Error)]
pub enum WorkLogServiceError {
    /// Request validation failed.
    #[error(transparent)]
    Domain(#[from] WorkLogDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkLogRepositoryError),
    /// An update request supplied no usable fields.
    #[error("No valid fields to update")]
    NoFieldsToUpdate,
    /// A bulk delete request supplied no ids.
    #[error("At least 1 log id is required.")]
    NoIdsToDelete,
}

/// Result type for work log service operations.
pub type WorkLogServiceResult<T> = Result<T, WorkLogServiceError>;

/// Work log orchestration service.
#[derive(Clone)]
pub struct WorkLogService<R, C>
where
    R: WorkLogRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> WorkLogService<R, C>
where
    R: WorkLogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new work log service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates and stores a new work log, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogServiceError::Domain`] for invalid input and
    /// [`WorkLogServiceError::Repository`] when the name is taken or
    /// persistence fails.
    pub async fn create(&self, request: CreateWorkLogRequest) -> WorkLogServiceResult<WorkLog> {
        let draft = request.into_draft()?;
        if self.repository.exists_by_name(&draft.task_name).await? {
            warn!(task_name = %draft.task_name, "rejected duplicate task name");
            return Err(WorkLogRepositoryError::DuplicateTaskName(draft.task_name).into());
        }

        let log = WorkLog::create(draft, &*self.clock);
        self.repository.store(&log).await?;
        info!(log_id = %log.id(), task_name = %log.task_name(), "work log created");
        Ok(log)
    }

    /// Retrieves a work log by id.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogRepositoryError::NotFound`] when no such log exists.
    pub async fn get(&self, id: WorkLogId) -> WorkLogServiceResult<WorkLog> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| WorkLogRepositoryError::NotFound(id).into())
    }

    /// Returns one page of work logs.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogServiceError::Repository`] when the query fails.
    pub async fn list(&self, query: &ListQuery) -> WorkLogServiceResult<LogPage> {
        let page = self.repository.list(query).await?;
        debug!(
            total_count = page.total_count(),
            returned = page.logs().len(),
            "listed work logs"
        );
        Ok(page)
    }

    /// Applies a sparse update to an existing work log.
    ///
    /// Input is validated before the store is consulted. The refreshed
    /// record is returned.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogServiceError::Domain`] for an invalid field,
    /// [`WorkLogServiceError::NoFieldsToUpdate`] when nothing usable was
    /// supplied, and [`WorkLogServiceError::Repository`] when the log is
    /// missing, the new name is taken, or persistence fails.
    pub async fn update(
        &self,
        id: WorkLogId,
        request: UpdateWorkLogRequest,
    ) -> WorkLogServiceResult<WorkLog> {
        let patch = request.into_patch()?;
        if patch.is_empty() {
            return Err(WorkLogServiceError::NoFieldsToUpdate);
        }
        if !self.repository.exists(id).await? {
            return Err(WorkLogRepositoryError::NotFound(id).into());
        }

        let updated_at = stored_precision(self.clock.utc());
        let updated = self.repository.update(id, &patch, updated_at).await?;
        info!(log_id = %id, "work log updated");
        Ok(updated)
    }

    /// Deletes a single work log.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogRepositoryError::NotFound`] when no such log exists.
    pub async fn delete(&self, id: WorkLogId) -> WorkLogServiceResult<()> {
        if !self.repository.exists(id).await? {
            return Err(WorkLogRepositoryError::NotFound(id).into());
        }
        self.repository.delete(id).await?;
        info!(log_id = %id, "work log deleted");
        Ok(())
    }

    /// Deletes every listed work log, returning how many rows went away.
    ///
    /// Unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogServiceError::NoIdsToDelete`] for an empty list and
    /// [`WorkLogServiceError::Repository`] when persistence fails.
    pub async fn delete_many(&self, ids: &[WorkLogId]) -> WorkLogServiceResult<u64> {
        if ids.is_empty() {
            return Err(WorkLogServiceError::NoIdsToDelete);
        }
        let removed = self.repository.delete_many(ids).await?;
        info!(requested = ids.len(), removed, "work logs bulk deleted");
        Ok(removed)
    }
}
