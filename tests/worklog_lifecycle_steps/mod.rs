//! Step definitions for work log lifecycle scenarios.

pub mod given;
pub mod world;
