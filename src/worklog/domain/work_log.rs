//! Work log aggregate root and its creation input.

use super::{Notes, Priority, TaskName, TaskStatus, TaskType, WorkLogId, WorkLogPatch};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Fractional second digits kept by `TIMESTAMPTZ` columns.
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Truncates a timestamp to the microsecond precision the store keeps.
///
/// Every timestamp entering a [`WorkLog`] passes through here, so a value
/// read back from storage equals the value that was written.
#[must_use]
pub fn stored_precision(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(STORED_SUBSEC_DIGITS)
}

/// Validated field values for a work log that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLogDraft {
    /// Unique task name.
    pub task_name: TaskName,
    /// Kind of work.
    pub task_type: TaskType,
    /// Workflow status.
    pub task_status: TaskStatus,
    /// Priority, defaulting to [`Priority::Lowest`].
    pub priority: Priority,
    /// Notes, defaulting to [`Notes::WRITE_DEFAULT`].
    pub notes: Notes,
    /// When work started, in UTC.
    pub started_at: Option<DateTime<Utc>>,
    /// When work completed, in UTC.
    pub completed_at: Option<DateTime<Utc>>,
}

/// A tracked task, bug or story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLog {
    #[serde(rename = "logId")]
    id: WorkLogId,
    task_name: TaskName,
    task_type: TaskType,
    task_status: TaskStatus,
    priority: Priority,
    notes: Notes,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted work log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWorkLogData {
    /// Persisted identifier.
    pub id: WorkLogId,
    /// Persisted task name.
    pub task_name: TaskName,
    /// Persisted task type.
    pub task_type: TaskType,
    /// Persisted task status.
    pub task_status: TaskStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted notes after read-side default substitution.
    pub notes: Notes,
    /// Persisted start timestamp, if any.
    pub started_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl WorkLog {
    /// Creates a new work log from validated draft values.
    ///
    /// The identifier is generated here and both lifecycle timestamps are
    /// taken from the clock.
    #[must_use]
    pub fn create(draft: WorkLogDraft, clock: &impl Clock) -> Self {
        let timestamp = stored_precision(clock.utc());
        Self {
            id: WorkLogId::new(),
            task_name: draft.task_name,
            task_type: draft.task_type,
            task_status: draft.task_status,
            priority: draft.priority,
            notes: draft.notes,
            started_at: draft.started_at.map(stored_precision),
            completed_at: draft.completed_at.map(stored_precision),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a work log from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkLogData) -> Self {
        Self {
            id: data.id,
            task_name: data.task_name,
            task_type: data.task_type,
            task_status: data.task_status,
            priority: data.priority,
            notes: data.notes,
            started_at: data.started_at,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> WorkLogId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn task_name(&self) -> &TaskName {
        &self.task_name
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the task status.
    #[must_use]
    pub const fn task_status(&self) -> TaskStatus {
        self.task_status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the notes.
    #[must_use]
    pub const fn notes(&self) -> &Notes {
        &self.notes
    }

    /// Returns the start timestamp, if any.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a sparse patch, leaving every field the patch omits
    /// untouched, and refreshes `updated_at`.
    pub fn apply_patch(&mut self, patch: &WorkLogPatch, updated_at: DateTime<Utc>) {
        if let Some(task_name) = patch.task_name() {
            self.task_name = task_name.clone();
        }
        if let Some(task_type) = patch.task_type() {
            self.task_type = task_type;
        }
        if let Some(task_status) = patch.task_status() {
            self.task_status = task_status;
        }
        if let Some(priority) = patch.priority() {
            self.priority = priority;
        }
        if let Some(notes) = patch.notes() {
            self.notes = notes.clone();
        }
        if let Some(started_at) = patch.started_at() {
            self.started_at = Some(stored_precision(started_at));
        }
        if let Some(completed_at) = patch.completed_at() {
            self.completed_at = Some(stored_precision(completed_at));
        }
        self.updated_at = stored_precision(updated_at);
    }
}
