//! Storage implementations for the service layer.
//!
//! Only an in-memory store exists; records live for the lifetime of the process.

pub mod memory_store;
