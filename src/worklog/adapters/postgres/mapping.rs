//! Conversions between Diesel rows and work log domain values.

use super::models::{NewWorkLogRow, WorkLogChangeset, WorkLogRow};
use crate::worklog::domain::{
    Notes, PersistedWorkLogData, Priority, TaskName, TaskStatus, TaskType, WorkLog,
    WorkLogDomainError, WorkLogId, WorkLogPatch,
};
use chrono::{DateTime, Utc};

/// Converts a stored row into a work log.
///
/// A `NULL` notes column becomes [`Notes::READ_DEFAULT`]; nullable
/// timestamps stay `None`.
///
/// # Errors
///
/// Returns [`WorkLogDomainError`] when a stored value violates a domain
/// rule, such as an unknown status written outside this service.
pub fn row_to_work_log(row: WorkLogRow) -> Result<WorkLog, WorkLogDomainError> {
    let WorkLogRow {
        log_id,
        task_name,
        task_type,
        task_status,
        priority,
        notes,
        started_at,
        completed_at,
        created_at,
        updated_at,
    } = row;

    Ok(WorkLog::from_persisted(PersistedWorkLogData {
        id: WorkLogId::from_uuid(log_id),
        task_name: TaskName::new(task_name)?,
        task_type: TaskType::try_from(task_type.as_str())?,
        task_status: TaskStatus::try_from(task_status.as_str())?,
        priority: Priority::try_from(i64::from(priority))?,
        notes: Notes::from_stored(notes),
        started_at,
        completed_at,
        created_at,
        updated_at,
    }))
}

/// Builds the insert row for a new work log.
#[must_use]
pub fn to_new_row(log: &WorkLog) -> NewWorkLogRow {
    NewWorkLogRow {
        log_id: log.id().into_inner(),
        task_name: log.task_name().as_str().to_owned(),
        task_type: log.task_type().as_str().to_owned(),
        task_status: log.task_status().as_str().to_owned(),
        priority: log.priority().value(),
        notes: Some(log.notes().as_str().to_owned()),
        started_at: log.started_at(),
        completed_at: log.completed_at(),
        created_at: log.created_at(),
        updated_at: log.updated_at(),
    }
}

impl WorkLogChangeset {
    /// Builds the `SET` assignments for a sparse patch.
    ///
    /// Only fields present in the patch are assigned; `updated_at` is
    /// always assigned.
    #[must_use]
    pub fn from_patch(patch: &WorkLogPatch, updated_at: DateTime<Utc>) -> Self {
        Self {
            task_name: patch.task_name().map(|name| name.as_str().to_owned()),
            task_type: patch.task_type().map(|task_type| task_type.as_str().to_owned()),
            task_status: patch
                .task_status()
                .map(|task_status| task_status.as_str().to_owned()),
            priority: patch.priority().map(Priority::value),
            notes: patch.notes().map(|notes| notes.as_str().to_owned()),
            started_at: patch.started_at(),
            completed_at: patch.completed_at(),
            updated_at,
        }
    }

    /// Returns the columns this changeset assigns, in `SET` order.
    #[must_use]
    pub fn assigned_columns(&self) -> Vec<&'static str> {
        [
            ("task_name", self.task_name.is_some()),
            ("task_type", self.task_type.is_some()),
            ("task_status", self.task_status.is_some()),
            ("priority", self.priority.is_some()),
            ("notes", self.notes.is_some()),
            ("started_at", self.started_at.is_some()),
            ("completed_at", self.completed_at.is_some()),
            ("updated_at", true),
        ]
        .into_iter()
        .filter_map(|(column, assigned)| assigned.then_some(column))
        .collect()
    }
}
