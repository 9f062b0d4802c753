//! Raw request payloads for work log mutations and their validation.
//!
//! Requests carry caller input as received. Converting a request into a
//! [`WorkLogDraft`] or [`WorkLogPatch`] applies every validation rule, so
//! a malformed request is rejected before the store is touched.

use crate::worklog::domain::{
    Notes, Priority, TaskName, TaskStatus, TaskType, WorkLogDomainError, WorkLogDraft,
    WorkLogPatch, stored_precision,
};
use chrono::{DateTime, FixedOffset, Utc};

/// Request payload for creating a work log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWorkLogRequest {
    task_name: String,
    task_type: String,
    task_status: String,
    notes: Option<String>,
    started_at: Option<DateTime<FixedOffset>>,
    completed_at: Option<DateTime<FixedOffset>>,
    priority: Option<i64>,
}

impl CreateWorkLogRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        task_name: impl Into<String>,
        task_type: impl Into<String>,
        task_status: impl Into<String>,
    ) -> Self {
        Self {
            task_name: task_name.into(),
            task_type: task_type.into(),
            task_status: task_status.into(),
            notes: None,
            started_at: None,
            completed_at: None,
            priority: None,
        }
    }

    /// Sets notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the start timestamp in any offset.
    #[must_use]
    pub const fn with_started_at(mut self, started_at: DateTime<FixedOffset>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    /// Sets the completion timestamp in any offset.
    #[must_use]
    pub const fn with_completed_at(mut self, completed_at: DateTime<FixedOffset>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Sets the raw priority value.
    #[must_use]
    pub const fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Validates the request into draft values.
    ///
    /// Omitted priority defaults to 1 and blank notes to `N/A`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError`] for a blank name, an unknown type or
    /// status, or a priority outside 1/5/7/10.
    pub fn into_draft(self) -> Result<WorkLogDraft, WorkLogDomainError> {
        let task_name = TaskName::new(&self.task_name)?;
        let task_status = TaskStatus::try_from(self.task_status.as_str())?;
        let task_type = TaskType::try_from(self.task_type.as_str())?;
        let priority = self
            .priority
            .map(Priority::try_from)
            .transpose()?
            .unwrap_or_default();

        Ok(WorkLogDraft {
            task_name,
            task_type,
            task_status,
            priority,
            notes: Notes::or_write_default(self.notes.as_deref()),
            started_at: self.started_at.map(to_stored_utc),
            completed_at: self.completed_at.map(to_stored_utc),
        })
    }
}

/// Request payload for a sparse work log update.
///
/// Every field is optional; blank strings count as omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateWorkLogRequest {
    task_name: Option<String>,
    task_type: Option<String>,
    task_status: Option<String>,
    notes: Option<String>,
    started_at: Option<DateTime<FixedOffset>>,
    completed_at: Option<DateTime<FixedOffset>>,
    priority: Option<i64>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

fn to_stored_utc(value: DateTime<FixedOffset>) -> DateTime<Utc> {
    stored_precision(value.with_timezone(&Utc))
}

impl UpdateWorkLogRequest {
    /// Creates a request that supplies no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies a new task name.
    #[must_use]
    pub fn with_task_name(mut self, task_name: impl Into<String>) -> Self {
        self.task_name = Some(task_name.into());
        self
    }

    /// Supplies a new task type.
    #[must_use]
    pub fn with_task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = Some(task_type.into());
        self
    }

    /// Supplies a new task status.
    #[must_use]
    pub fn with_task_status(mut self, task_status: impl Into<String>) -> Self {
        self.task_status = Some(task_status.into());
        self
    }

    /// Supplies new notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Supplies a new start timestamp.
    #[must_use]
    pub const fn with_started_at(mut self, started_at: DateTime<FixedOffset>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    /// Supplies a new completion timestamp.
    #[must_use]
    pub const fn with_completed_at(mut self, completed_at: DateTime<FixedOffset>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Supplies a new raw priority value.
    #[must_use]
    pub const fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Validates supplied, non-blank fields into a sparse patch.
    ///
    /// The patch may be empty; callers decide whether that is an error.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError`] for the first supplied field that
    /// fails validation.
    pub fn into_patch(self) -> Result<WorkLogPatch, WorkLogDomainError> {
        let mut patch = WorkLogPatch::new();

        if let Some(name) = non_blank(self.task_name.as_deref()) {
            patch = patch.with_task_name(TaskName::new(name)?);
        }
        if let Some(task_type) = non_blank(self.task_type.as_deref()) {
            patch = patch.with_task_type(TaskType::try_from(task_type)?);
        }
        if let Some(task_status) = non_blank(self.task_status.as_deref()) {
            patch = patch.with_task_status(TaskStatus::try_from(task_status)?);
        }
        if let Some(notes) = Notes::supplied(self.notes.as_deref()) {
            patch = patch.with_notes(notes);
        }
        if let Some(started_at) = self.started_at {
            patch = patch.with_started_at(to_stored_utc(started_at));
        }
        if let Some(completed_at) = self.completed_at {
            patch = patch.with_completed_at(to_stored_utc(completed_at));
        }
        if let Some(priority) = self.priority {
            patch = patch.with_priority(Priority::try_from(priority)?);
        }

        Ok(patch)
    }
}
