//! Factory definitions keyed by name

use std::collections::HashMap;
use std::sync::Arc;

use super::attributes::AttributeTemplate;
use crate::domain::FactoryName;
use crate::infrastructure::adapter::ModelRef;

/// A model plus the attribute defaults for documents built from it
#[derive(Debug, Clone)]
pub struct FactoryDefinition {
    name: FactoryName,
    model: ModelRef,
    attributes: AttributeTemplate,
}

impl FactoryDefinition {
    pub fn new(name: FactoryName, model: ModelRef, attributes: AttributeTemplate) -> Self {
        Self {
            name,
            model,
            attributes,
        }
    }

    pub fn name(&self) -> &FactoryName {
        &self.name
    }

    pub fn model(&self) -> &ModelRef {
        &self.model
    }

    pub fn attributes(&self) -> &AttributeTemplate {
        &self.attributes
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    definitions: HashMap<FactoryName, Arc<FactoryDefinition>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a definition, returning the one it replaced
    pub fn define(&mut self, definition: FactoryDefinition) -> Option<Arc<FactoryDefinition>> {
        self.definitions
            .insert(definition.name.clone(), Arc::new(definition))
    }

    pub fn get(&self, name: &FactoryName) -> Option<Arc<FactoryDefinition>> {
        self.definitions.get(name).cloned()
    }

    pub fn contains(&self, name: &FactoryName) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<FactoryName> {
        let mut names: Vec<_> = self.definitions.keys().cloned().collect();
        names.sort();
        names
    }
}
