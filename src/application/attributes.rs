//! Attribute templates and generators
//!
//! A template maps attribute names to [`AttributeValue`]s: constants,
//! synchronous generators, or asynchronous generators. Caller overrides use
//! the same shape, so an override may itself be a generator.

use futures_util::future::{BoxFuture, FutureExt};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::factory::Factory;
use crate::domain::Attributes;
use crate::error::BoxError;

pub type SyncGenerator = Arc<dyn Fn(&Attributes) -> Value + Send + Sync>;

pub type AsyncGenerator =
    Arc<dyn Fn(GeneratorContext) -> BoxFuture<'static, Result<Value, BoxError>> + Send + Sync>;

/// A template entry
#[derive(Clone)]
pub enum AttributeValue {
    Constant(Value),
    /// Computed immediately from the attributes resolved so far
    Sync(SyncGenerator),
    /// Awaited before the next attribute is resolved
    Async(AsyncGenerator),
}

impl AttributeValue {
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }

    pub fn sync<F>(generator: F) -> Self
    where
        F: Fn(&Attributes) -> Value + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(generator))
    }

    pub fn future<F, Fut>(generator: F) -> Self
    where
        F: Fn(GeneratorContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
    {
        Self::Async(Arc::new(move |context| generator(context).boxed()))
    }

    pub fn is_generator(&self) -> bool {
        !matches!(self, Self::Constant(_))
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Self::Constant(value) => Some(value),
            Self::Sync(_) | Self::Async(_) => None,
        }
    }
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Sync(_) => f.write_str("Sync(<generator>)"),
            Self::Async(_) => f.write_str("Async(<generator>)"),
        }
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        Self::Constant(value)
    }
}

/// What an async generator gets to work with
#[derive(Debug, Clone)]
pub struct GeneratorContext {
    factory: Factory,
    attribute: String,
    attributes: Attributes,
}

impl GeneratorContext {
    pub(crate) fn new(factory: Factory, attribute: String, attributes: Attributes) -> Self {
        Self {
            factory,
            attribute,
            attributes,
        }
    }

    /// The pipeline running this resolution; nested `create`s go here
    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    /// Name of the attribute being generated
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Constants and every attribute resolved before this one
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }
}

/// Ordered mapping of attribute names to values or generators
#[derive(Debug, Clone, Default)]
pub struct AttributeTemplate {
    entries: IndexMap<String, AttributeValue>,
}

/// Caller-supplied attributes layered over a template
pub type Overrides = AttributeTemplate;

impl AttributeTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attribute(attribute, AttributeValue::constant(value))
    }

    pub fn sync<F>(self, attribute: impl Into<String>, generator: F) -> Self
    where
        F: Fn(&Attributes) -> Value + Send + Sync + 'static,
    {
        self.attribute(attribute, AttributeValue::sync(generator))
    }

    pub fn future<F, Fut>(self, attribute: impl Into<String>, generator: F) -> Self
    where
        F: Fn(GeneratorContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
    {
        self.attribute(attribute, AttributeValue::future(generator))
    }

    pub fn attribute(mut self, attribute: impl Into<String>, value: AttributeValue) -> Self {
        self.insert(attribute, value);
        self
    }

    /// Insert an entry; an existing attribute keeps its position
    pub fn insert(
        &mut self,
        attribute: impl Into<String>,
        value: AttributeValue,
    ) -> Option<AttributeValue> {
        self.entries.insert(attribute.into(), value)
    }

    pub fn get(&self, attribute: &str) -> Option<&AttributeValue> {
        self.entries.get(attribute)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Shallow copy of this template with `overrides` laid on top.
    ///
    /// Overridden attributes keep their template position; new ones are
    /// appended in override order.
    pub fn merged(&self, overrides: &Overrides) -> Self {
        let mut merged = self.clone();
        for (attribute, value) in &overrides.entries {
            merged.entries.insert(attribute.clone(), value.clone());
        }
        merged
    }
}

impl From<Attributes> for AttributeTemplate {
    fn from(attributes: Attributes) -> Self {
        attributes
            .into_iter()
            .map(|(attribute, value)| (attribute, AttributeValue::Constant(value)))
            .collect()
    }
}

impl FromIterator<(String, AttributeValue)> for AttributeTemplate {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AttributeTemplate {
    type Item = (String, AttributeValue);
    type IntoIter = indexmap::map::IntoIter<String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
