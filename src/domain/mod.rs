//! Domain types for fixture factories
//!
//! Plain data the pipeline passes around: names, documents, and the log of
//! what has been persisted.

pub mod creation_log;
pub mod document;
pub mod types;

pub use creation_log::{CreationLog, CreationRecord};
pub use document::{Attributes, Document};
pub use types::{FactoryName, ModelName};
