//! In-memory adapters for work log tracking.

mod repository;
mod search;

pub use repository::InMemoryWorkLogStore;
