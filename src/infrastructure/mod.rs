//! Persistence adapters and process-level plumbing
//!
//! This module contains the adapter abstraction, the bundled backends, and
//! tracing setup.

pub mod adapter;
pub mod memory;
pub mod telemetry;

pub use adapter::{Adapter, Model, ModelAdapter, ModelRef, ObjectAdapter};
pub use memory::MemoryModel;
