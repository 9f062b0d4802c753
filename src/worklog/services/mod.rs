//! Application services orchestrating work log use cases.

mod analytics;
mod logs;
mod requests;

pub use analytics::AnalyticsService;
pub use logs::{WorkLogService, WorkLogServiceError, WorkLogServiceResult};
pub use requests::{CreateWorkLogRequest, UpdateWorkLogRequest};
