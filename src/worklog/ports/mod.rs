//! Port contracts for work log tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by work log
//! services.

pub mod analytics;
pub mod repository;

pub use analytics::{AnalyticsError, AnalyticsResult, WorkLogAnalytics};
pub use repository::{WorkLogRepository, WorkLogRepositoryError, WorkLogRepositoryResult};
