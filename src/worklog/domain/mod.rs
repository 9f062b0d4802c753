//! Domain model for work log tracking.
//!
//! Validation rules, the [`WorkLog`] aggregate, sparse patches, listing
//! parameters and analytic shapes live here, free of storage concerns.

mod analytics;
mod classification;
mod error;
mod ids;
mod listing;
mod patch;
mod work_log;

pub use analytics::{
    BucketGranularity, CompletedBucketCount, CompletedCountWindow, DailyTaskCount, Lookback,
    LookbackUnit, StatusShare, TaskSummary, TypeShare, status_shares, type_shares,
};
pub use classification::{Priority, TaskStatus, TaskType};
pub use error::WorkLogDomainError;
pub use ids::{Notes, TaskName, WorkLogId};
pub use listing::{ListQuery, LogPage, PageIndex, PageSize, SearchText, SortField, SortOrder};
pub use patch::WorkLogPatch;
pub use work_log::{PersistedWorkLogData, WorkLog, WorkLogDraft, stored_precision};
