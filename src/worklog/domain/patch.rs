//! Sparse patch describing the fields a caller explicitly supplied.

use super::{Notes, Priority, TaskName, TaskStatus, TaskType};
use chrono::{DateTime, Utc};

/// Validated subset of mutable work log fields.
///
/// A `None` field is left untouched in storage. The patch never carries
/// `updated_at`; that is refreshed unconditionally when the patch is
/// applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkLogPatch {
    task_name: Option<TaskName>,
    task_type: Option<TaskType>,
    task_status: Option<TaskStatus>,
    priority: Option<Priority>,
    notes: Option<Notes>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl WorkLogPatch {
    /// Creates a patch that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task name.
    #[must_use]
    pub fn with_task_name(mut self, task_name: TaskName) -> Self {
        self.task_name = Some(task_name);
        self
    }

    /// Sets the task type.
    #[must_use]
    pub const fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    /// Sets the task status.
    #[must_use]
    pub const fn with_task_status(mut self, task_status: TaskStatus) -> Self {
        self.task_status = Some(task_status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: Notes) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Sets the start timestamp.
    #[must_use]
    pub const fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    /// Sets the completion timestamp.
    #[must_use]
    pub const fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Returns the new task name, if supplied.
    #[must_use]
    pub const fn task_name(&self) -> Option<&TaskName> {
        self.task_name.as_ref()
    }

    /// Returns the new task type, if supplied.
    #[must_use]
    pub const fn task_type(&self) -> Option<TaskType> {
        self.task_type
    }

    /// Returns the new task status, if supplied.
    #[must_use]
    pub const fn task_status(&self) -> Option<TaskStatus> {
        self.task_status
    }

    /// Returns the new priority, if supplied.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the new notes, if supplied.
    #[must_use]
    pub const fn notes(&self) -> Option<&Notes> {
        self.notes.as_ref()
    }

    /// Returns the new start timestamp, if supplied.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns the new completion timestamp, if supplied.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.task_name.is_none()
            && self.task_type.is_none()
            && self.task_status.is_none()
            && self.priority.is_none()
            && self.notes.is_none()
            && self.started_at.is_none()
            && self.completed_at.is_none()
    }
}
