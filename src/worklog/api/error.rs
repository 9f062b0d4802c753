//! Error-to-status mapping for the JSON surface.

use crate::worklog::{
    domain::{WorkLogDomainError, WorkLogId},
    ports::{AnalyticsError, WorkLogRepositoryError},
    services::WorkLogServiceError,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Message returned when a referenced log does not exist.
pub const NOT_FOUND_MESSAGE: &str = "No records found with this log id";

/// Message returned when a task name is already taken.
pub const DUPLICATE_NAME_MESSAGE: &str = "Task name already exists";

/// A failed request, carrying the HTTP status a router should send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    status: u16,
    message: String,
    log_id: Option<WorkLogId>,
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human readable failure description.
    pub message: String,
    /// Identifier echoed back on not-found failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<WorkLogId>,
}

impl ApiError {
    /// Status for malformed request bodies and no-op updates.
    pub const BAD_REQUEST: u16 = 400;
    /// Status for unknown log ids.
    pub const NOT_FOUND: u16 = 404;
    /// Status for duplicate task names.
    pub const CONFLICT: u16 = 409;
    /// Status for validation failures.
    pub const UNPROCESSABLE_ENTITY: u16 = 422;
    /// Status for store failures.
    pub const INTERNAL_SERVER_ERROR: u16 = 500;

    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            log_id: None,
        }
    }

    /// Builds a bad-request error for a body or parameter that is not
    /// valid JSON.
    #[must_use]
    pub fn malformed_json(err: &serde_json::Error) -> Self {
        Self::new(Self::BAD_REQUEST, format!("Invalid request body: {err}"))
    }

    /// Builds a not-found error echoing the missing id.
    #[must_use]
    pub fn not_found(log_id: WorkLogId) -> Self {
        Self {
            status: Self::NOT_FOUND,
            message: NOT_FOUND_MESSAGE.to_owned(),
            log_id: Some(log_id),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Echoed identifier, present on not-found failures.
    #[must_use]
    pub const fn log_id(&self) -> Option<WorkLogId> {
        self.log_id
    }

    /// JSON body for the response.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.message.clone(),
            log_id: self.log_id,
        }
    }
}

impl From<WorkLogDomainError> for ApiError {
    fn from(err: WorkLogDomainError) -> Self {
        Self::new(Self::UNPROCESSABLE_ENTITY, err.to_string())
    }
}

impl From<WorkLogRepositoryError> for ApiError {
    fn from(err: WorkLogRepositoryError) -> Self {
        match err {
            WorkLogRepositoryError::NotFound(id) => {
                warn!(log_id = %id, "work log not found");
                Self::not_found(id)
            }
            WorkLogRepositoryError::DuplicateTaskName(_) => {
                Self::new(Self::CONFLICT, DUPLICATE_NAME_MESSAGE)
            }
            WorkLogRepositoryError::DuplicateLog(_) => Self::new(Self::CONFLICT, err.to_string()),
            WorkLogRepositoryError::Persistence(source) => {
                error!(error = %source, "work log store failure");
                Self::new(Self::INTERNAL_SERVER_ERROR, source.to_string())
            }
        }
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        let AnalyticsError::Persistence(source) = err;
        error!(error = %source, "analytics query failure");
        Self::new(Self::INTERNAL_SERVER_ERROR, source.to_string())
    }
}

impl From<WorkLogServiceError> for ApiError {
    fn from(err: WorkLogServiceError) -> Self {
        match err {
            WorkLogServiceError::Domain(domain) => domain.into(),
            WorkLogServiceError::Repository(repository) => repository.into(),
            WorkLogServiceError::NoFieldsToUpdate => {
                Self::new(Self::BAD_REQUEST, WorkLogServiceError::NoFieldsToUpdate.to_string())
            }
            WorkLogServiceError::NoIdsToDelete => Self::new(
                Self::UNPROCESSABLE_ENTITY,
                WorkLogServiceError::NoIdsToDelete.to_string(),
            ),
        }
    }
}
