//! Attribute resolution
//!
//! Resolution walks the merged template one attribute at a time. Each
//! generator sees the constants plus every attribute resolved before it, and an
//! async generator finishes before the next attribute starts.

use tracing::{debug, trace};

use super::attributes::{AttributeValue, GeneratorContext, Overrides};
use super::factory::Factory;
use super::registry::FactoryDefinition;
use crate::domain::Attributes;
use crate::error::{Error, Result};

/// Resolve `overrides` over the definition's template into plain values
pub(crate) async fn resolve(
    factory: &Factory,
    definition: &FactoryDefinition,
    overrides: &Overrides,
) -> Result<Attributes> {
    let merged = definition.attributes().merged(overrides);

    let mut resolved: Attributes = merged
        .iter()
        .filter_map(|(attribute, value)| {
            value
                .as_constant()
                .map(|constant| (attribute.to_string(), constant.clone()))
        })
        .collect();

    for (attribute, value) in merged.iter() {
        match value {
            AttributeValue::Constant(_) => continue,
            AttributeValue::Sync(generator) => {
                trace!(factory = %definition.name(), attribute, "generating attribute");
                let generated = generator(&resolved);
                resolved.insert(attribute.to_string(), generated);
            }
            AttributeValue::Async(generator) => {
                debug!(factory = %definition.name(), attribute, "awaiting attribute generator");
                let context =
                    GeneratorContext::new(factory.clone(), attribute.to_string(), resolved.clone());
                let generated = generator(context)
                    .await
                    .map_err(|source| Error::AttributeResolution {
                        factory: definition.name().clone(),
                        attribute: attribute.to_string(),
                        source,
                    })?;
                resolved.insert(attribute.to_string(), generated);
            }
        }
    }

    Ok(merged
        .keys()
        .filter_map(|attribute| {
            resolved
                .get(attribute)
                .map(|value| (attribute.to_string(), value.clone()))
        })
        .collect())
}
