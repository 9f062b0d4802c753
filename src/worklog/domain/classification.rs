//! Enumerated task classifications: type, status and priority.

use super::WorkLogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work a log tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// General task.
    Task,
    /// Defect fix.
    Bug,
    /// User story.
    Story,
}

impl TaskType {
    /// Every task type in declaration order.
    pub const ALL: [Self; 3] = [Self::Task, Self::Bug, Self::Story];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Bug => "bug",
            Self::Story => "story",
        }
    }
}

impl TryFrom<&str> for TaskType {
    type Error = WorkLogDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| WorkLogDomainError::InvalidTaskType(value.to_owned()))
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status of a logged task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet scheduled.
    Backlog,
    /// Scheduled but not started.
    Pending,
    /// Being worked on.
    Progress,
    /// Awaiting pull request review.
    Pr,
    /// Deployed to staging.
    Staging,
}

impl TaskStatus {
    /// Every task status in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Backlog,
        Self::Pending,
        Self::Progress,
        Self::Pr,
        Self::Staging,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Pending => "pending",
            Self::Progress => "progress",
            Self::Pr => "pr",
            Self::Staging => "staging",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = WorkLogDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| WorkLogDomainError::InvalidTaskStatus(value.to_owned()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority on the fixed 1/5/7/10 scale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "i16", try_from = "i64")]
pub enum Priority {
    /// Priority 1, the default.
    #[default]
    Lowest,
    /// Priority 5.
    Medium,
    /// Priority 7.
    High,
    /// Priority 10.
    Highest,
}

impl Priority {
    /// Returns the numeric priority value.
    #[must_use]
    pub const fn value(self) -> i16 {
        match self {
            Self::Lowest => 1,
            Self::Medium => 5,
            Self::High => 7,
            Self::Highest => 10,
        }
    }
}

impl TryFrom<i64> for Priority {
    type Error = WorkLogDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Lowest),
            5 => Ok(Self::Medium),
            7 => Ok(Self::High),
            10 => Ok(Self::Highest),
            other => Err(WorkLogDomainError::InvalidPriority(other)),
        }
    }
}

impl From<Priority> for i16 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
