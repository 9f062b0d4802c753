//! Work log tracking.
//!
//! Callers create, update, delete, list, search and aggregate work logs:
//! named tasks, bugs and stories carrying a status, a priority, notes and
//! timing metadata. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - The framework-neutral JSON surface in [`api`]

pub mod adapters;
pub mod api;
pub mod domain;
pub mod ports;
pub mod services;
