//! Fixture Factory - named factories for test fixtures
//!
//! Define a factory once (a model plus attribute defaults, constant or
//! generated), then build in-memory documents from it, create persisted ones
//! through a pluggable adapter, and tear everything down in reverse creation
//! order at the end of the test run.
//!
//! ```
//! use fixture_factory::{AttributeTemplate, Factory, MemoryModel, Overrides};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let factory = Factory::new();
//! factory.define(
//!     "post",
//!     Arc::new(MemoryModel::new("Post")),
//!     AttributeTemplate::new().value("title", "Hello"),
//! );
//! factory.define(
//!     "comment",
//!     Arc::new(MemoryModel::new("Comment")),
//!     AttributeTemplate::new()
//!         .value("body", "Nice post")
//!         .attribute("post_id", Factory::assoc("post", Some("id"))),
//! );
//!
//! let comment = factory.create("comment", Overrides::new()).await?;
//! assert_eq!(comment.get("post_id"), Some(&json!(1)));
//!
//! factory.cleanup().await?;
//! # Ok::<(), fixture_factory::Error>(())
//! # }).unwrap();
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{
    AttributeTemplate, AttributeValue, Batch, Factory, GeneratorContext, Overrides,
    PromisedFactory,
};
pub use config::Settings;
pub use domain::{Attributes, CreationRecord, Document, FactoryName, ModelName};
pub use error::{BoxError, Error, Result};
pub use infrastructure::{Adapter, MemoryModel, Model, ModelAdapter, ModelRef, ObjectAdapter};
