//! Identifier and validated scalar types for the work log domain.

use super::WorkLogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a work log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkLogId(Uuid);

impl WorkLogId {
    /// Creates a new random work log identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a work log identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for WorkLogId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for WorkLogId {
    type Err = WorkLogDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| WorkLogDomainError::InvalidLogId(value.to_owned()))
    }
}

impl fmt::Display for WorkLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty, trimmed task name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Maximum name length accepted by the `logs.task_name` column.
    pub const MAX_LENGTH: usize = 255;

    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::EmptyTaskName`] when the value is blank
    /// and [`WorkLogDomainError::TaskNameTooLong`] when it exceeds
    /// [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, WorkLogDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(WorkLogDomainError::EmptyTaskName);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(WorkLogDomainError::TaskNameTooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-form notes attached to a work log.
///
/// Absent notes are written as [`Notes::WRITE_DEFAULT`] and a `NULL`
/// column is read back as [`Notes::READ_DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notes(String);

impl Notes {
    /// Value stored when a caller creates a log without notes.
    pub const WRITE_DEFAULT: &'static str = "N/A";

    /// Value reported when the stored notes column is `NULL`.
    pub const READ_DEFAULT: &'static str = "n/a";

    /// Returns caller-supplied notes, or `None` when the value is blank.
    #[must_use]
    pub fn supplied(value: Option<&str>) -> Option<Self> {
        value
            .filter(|text| !text.trim().is_empty())
            .map(|text| Self(text.to_owned()))
    }

    /// Returns supplied notes or the write-side default.
    #[must_use]
    pub fn or_write_default(value: Option<&str>) -> Self {
        Self::supplied(value).unwrap_or_else(|| Self(Self::WRITE_DEFAULT.to_owned()))
    }

    /// Maps a nullable stored column to notes, substituting the read-side
    /// default for `NULL`.
    #[must_use]
    pub fn from_stored(value: Option<String>) -> Self {
        Self(value.unwrap_or_else(|| Self::READ_DEFAULT.to_owned()))
    }

    /// Returns the notes as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Notes {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Notes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
