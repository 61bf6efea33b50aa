//! Adapters bridging the pipeline to a persistence mechanism
//!
//! A factory definition names a [`Model`], the handle that knows how to
//! instantiate and persist documents of one kind. An [`Adapter`] decides how
//! the pipeline talks to that model; swapping adapters lets one set of
//! factory definitions target different backends.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::domain::{Attributes, Document, ModelName};
use crate::error::BoxError;

/// A constructible, persistable model
#[async_trait]
pub trait Model: Send + Sync + fmt::Debug {
    fn name(&self) -> ModelName;

    /// Fresh, empty instance of this model
    fn instantiate(&self) -> Document {
        Document::new(self.name())
    }

    /// Persist the document. Implementations may write back generated
    /// attributes such as an id.
    async fn save(&self, document: &mut Document) -> Result<(), BoxError>;

    /// Remove a persisted document.
    ///
    /// The record may already be gone; that is not an error.
    async fn destroy(&self, document: &Document) -> Result<(), BoxError>;
}

/// Shared handle to a model
pub type ModelRef = Arc<dyn Model>;

/// Capability set the pipeline uses to build, save, and destroy documents
#[async_trait]
pub trait Adapter: Send + Sync + fmt::Debug {
    /// Instantiate the model and copy the resolved attributes onto it
    fn build(&self, model: &dyn Model, attributes: Attributes) -> Document {
        let mut document = model.instantiate();
        self.set(attributes, &mut document, model);
        document
    }

    /// Copy every attribute onto the document, overwriting existing values
    fn set(&self, attributes: Attributes, document: &mut Document, _model: &dyn Model) {
        for (attribute, value) in attributes {
            document.set(attribute, value);
        }
    }

    async fn save(&self, document: &mut Document, model: &dyn Model) -> Result<(), BoxError>;

    async fn destroy(&self, document: &Document, model: &dyn Model) -> Result<(), BoxError>;
}

/// Default adapter: persistence is delegated to the model itself
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelAdapter;

#[async_trait]
impl Adapter for ModelAdapter {
    async fn save(&self, document: &mut Document, model: &dyn Model) -> Result<(), BoxError> {
        model.save(document).await
    }

    async fn destroy(&self, document: &Document, model: &dyn Model) -> Result<(), BoxError> {
        model.destroy(document).await
    }
}

/// Adapter for plain objects that never touch storage
///
/// Saving and destroying always succeed without calling the model, so
/// `create` still records documents and `cleanup` still walks them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectAdapter;

#[async_trait]
impl Adapter for ObjectAdapter {
    async fn save(&self, _document: &mut Document, _model: &dyn Model) -> Result<(), BoxError> {
        Ok(())
    }

    async fn destroy(&self, _document: &Document, _model: &dyn Model) -> Result<(), BoxError> {
        Ok(())
    }
}
