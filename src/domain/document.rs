//! In-memory fixture documents

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::ModelName;

/// Ordered attribute map of a resolved fixture
pub type Attributes = serde_json::Map<String, Value>;

/// An instance of a model built by a factory
///
/// A document is a plain value: the caller owns whatever `build` or `create`
/// hands back, and the creation log keeps its own copy of saved documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    model: ModelName,
    attributes: Attributes,
}

impl Document {
    pub fn new(model: ModelName) -> Self {
        Self {
            model,
            attributes: Attributes::new(),
        }
    }

    pub fn model(&self) -> &ModelName {
        &self.model
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Set an attribute, returning the value it replaced
    pub fn set(&mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.insert(attribute.into(), value.into())
    }

    pub fn remove(&mut self, attribute: &str) -> Option<Value> {
        self.attributes.remove(attribute)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    /// JSON object view of the document's attributes
    pub fn to_value(&self) -> Value {
        Value::Object(self.attributes.clone())
    }
}
