//! Worklog: a work log tracking backend.
//!
//! This crate provides validated work log records, listing with full-text
//! and fuzzy search, sparse updates, bulk deletion and dashboard
//! aggregations over a single Postgres table.
//!
//! # Architecture
//!
//! Worklog follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, Postgres)
//!
//! # Modules
//!
//! - [`worklog`]: Work log domain, storage, services and JSON surface
//! - [`config`]: Environment configuration for the store and listener
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod telemetry;
pub mod worklog;
