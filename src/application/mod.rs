//! The fixture pipeline
//!
//! Registration, attribute resolution, build/create, batches, associations,
//! cleanup, and the promise-returning surface.

pub mod attributes;
pub mod batch;
pub mod factory;
pub mod promise;
pub mod registry;
mod resolver;

pub use attributes::{AttributeTemplate, AttributeValue, GeneratorContext, Overrides};
pub use batch::Batch;
pub use factory::Factory;
pub use promise::{AmbientRuntime, Promise, PromiseLibrary, PromisedFactory, Spawner};
pub use registry::{FactoryDefinition, Registry};
