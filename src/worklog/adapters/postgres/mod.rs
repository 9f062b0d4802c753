//! `PostgreSQL` adapters for work log persistence and analytics.

mod analytics;
pub(crate) mod analytics_sql;
pub(crate) mod listing_sql;
pub(crate) mod mapping;
pub(crate) mod models;
mod repository;
mod schema;

pub use repository::{PostgresWorkLogRepository, WorkLogPgPool};
pub(crate) use schema::logs;
