//! Adapter implementations for work log ports.

pub mod memory;
pub mod postgres;
