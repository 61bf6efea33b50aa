//! The fixture pipeline
//!
//! A [`Factory`] owns the registry, the adapter table, and the creation log
//! for one test run. Clones are handles to the same state; construct a new
//! `Factory` per test worker rather than sharing one.

use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::attributes::{AttributeTemplate, AttributeValue, Overrides};
use super::batch::Batch;
use super::registry::{FactoryDefinition, Registry};
use super::resolver;
use crate::config::{CleanupPolicy, Settings};
use crate::domain::{CreationLog, CreationRecord, Document, FactoryName};
use crate::error::{BoxError, Error, Result};
use crate::infrastructure::adapter::{Adapter, ModelAdapter, ModelRef};

struct FactoryState {
    settings: Settings,
    registry: RwLock<Registry>,
    adapters: RwLock<HashMap<FactoryName, Arc<dyn Adapter>>>,
    default_adapter: RwLock<Arc<dyn Adapter>>,
    created: Mutex<CreationLog>,
}

/// Builds, persists, and tears down fixture documents
#[derive(Clone)]
pub struct Factory {
    state: Arc<FactoryState>,
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("factories", &self.factory_names())
            .field("created", &self.state.created.lock().len())
            .field("cleanup_policy", &self.state.settings.cleanup.policy)
            .finish()
    }
}

impl Factory {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            state: Arc::new(FactoryState {
                settings,
                registry: RwLock::new(Registry::new()),
                adapters: RwLock::new(HashMap::new()),
                default_adapter: RwLock::new(Arc::new(ModelAdapter)),
                created: Mutex::new(CreationLog::new()),
            }),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// Register a factory, replacing any definition with the same name
    pub fn define(
        &self,
        name: impl Into<FactoryName>,
        model: ModelRef,
        attributes: AttributeTemplate,
    ) {
        let name = name.into();
        let replaced = self
            .state
            .registry
            .write()
            .define(FactoryDefinition::new(name.clone(), model, attributes));
        debug!(factory = %name, replaced = replaced.is_some(), "factory defined");
    }

    pub fn is_defined(&self, name: impl Into<FactoryName>) -> bool {
        self.state.registry.read().contains(&name.into())
    }

    pub fn factory_names(&self) -> Vec<FactoryName> {
        self.state.registry.read().names()
    }

    /// Install an adapter for one factory, or as the default when `name` is `None`
    pub fn set_adapter(&self, adapter: Arc<dyn Adapter>, name: Option<&str>) {
        match name {
            Some(name) => {
                debug!(factory = name, ?adapter, "adapter set");
                self.state
                    .adapters
                    .write()
                    .insert(FactoryName::from(name), adapter);
            }
            None => {
                debug!(?adapter, "default adapter set");
                *self.state.default_adapter.write() = adapter;
            }
        }
    }

    /// The adapter registered for `name`, falling back to the default
    pub fn adapter_for(&self, name: impl Into<FactoryName>) -> Arc<dyn Adapter> {
        let name = name.into();
        self.state
            .adapters
            .read()
            .get(&name)
            .cloned()
            .unwrap_or_else(|| self.state.default_adapter.read().clone())
    }

    /// Resolve a factory's attributes and build an unsaved document
    #[instrument(skip(self, name, overrides), fields(factory = tracing::field::Empty))]
    pub async fn build(
        &self,
        name: impl Into<FactoryName>,
        overrides: Overrides,
    ) -> Result<Document> {
        let name = name.into();
        tracing::Span::current().record("factory", tracing::field::display(&name));
        let (definition, adapter) = self.prepare(&name)?;
        self.build_defined(&definition, adapter.as_ref(), &overrides)
            .await
    }

    /// Build a document, save it, and record it for cleanup
    #[instrument(skip(self, name, overrides), fields(factory = tracing::field::Empty))]
    pub async fn create(
        &self,
        name: impl Into<FactoryName>,
        overrides: Overrides,
    ) -> Result<Document> {
        let name = name.into();
        tracing::Span::current().record("factory", tracing::field::display(&name));
        let (definition, adapter) = self.prepare(&name)?;
        let mut document = self
            .build_defined(&definition, adapter.as_ref(), &overrides)
            .await?;

        adapter
            .save(&mut document, definition.model().as_ref())
            .await
            .map_err(|source| Error::Save {
                factory: name.clone(),
                source,
            })?;

        self.state
            .created
            .lock()
            .push(CreationRecord::new(name.clone(), document.clone()));
        debug!(factory = %name, "document created");
        Ok(document)
    }

    /// Build one document per batch entry, stopping at the first failure
    #[instrument(skip(self, name, batch), fields(factory = tracing::field::Empty, count = tracing::field::Empty))]
    pub async fn build_many(
        &self,
        name: impl Into<FactoryName>,
        batch: impl Into<Batch>,
    ) -> Result<Vec<Document>> {
        let name = name.into();
        let batch = batch.into();
        let span = tracing::Span::current();
        span.record("factory", tracing::field::display(&name));
        span.record("count", batch.len());

        let mut documents = Vec::with_capacity(batch.len());
        for overrides in batch {
            documents.push(self.build(&name, overrides).await?);
        }
        Ok(documents)
    }

    /// Create one document per batch entry, stopping at the first failure
    ///
    /// Documents created before the failure stay in the creation log.
    #[instrument(skip(self, name, batch), fields(factory = tracing::field::Empty, count = tracing::field::Empty))]
    pub async fn create_many(
        &self,
        name: impl Into<FactoryName>,
        batch: impl Into<Batch>,
    ) -> Result<Vec<Document>> {
        let name = name.into();
        let batch = batch.into();
        let span = tracing::Span::current();
        span.record("factory", tracing::field::display(&name));
        span.record("count", batch.len());

        let mut documents = Vec::with_capacity(batch.len());
        for overrides in batch {
            documents.push(self.create(&name, overrides).await?);
        }
        Ok(documents)
    }

    /// Attribute generator that creates a `name` document first.
    ///
    /// Resolves to the created document as a JSON object, or to its
    /// `attribute` field (`null` when the document has no such field).
    ///
    /// A failure of the nested `create` reaches the caller as
    /// [`Error::AttributeResolution`] for the attribute holding the
    /// association; the nested [`Error`] is its `source` and can be
    /// recovered with `downcast_ref::<Error>()`.
    pub fn assoc(name: impl Into<FactoryName>, attribute: Option<&str>) -> AttributeValue {
        let name = name.into();
        let attribute = attribute.map(str::to_string);
        AttributeValue::future(move |context| {
            let name = name.clone();
            let attribute = attribute.clone();
            async move {
                let document = context.factory().create(name, Overrides::new()).await?;
                Ok::<Value, BoxError>(match attribute {
                    Some(attribute) => document.get(&attribute).cloned().unwrap_or(Value::Null),
                    None => document.to_value(),
                })
            }
        })
    }

    /// Destroy every recorded document, newest first.
    ///
    /// The creation log is emptied before anything is destroyed, so a record
    /// is never handed to `destroy` twice, even when this call fails.
    #[instrument(skip(self))]
    pub async fn cleanup(&self) -> Result<()> {
        let records = self.state.created.lock().drain_newest_first();
        let policy = self.state.settings.cleanup.policy;
        info!(records = records.len(), %policy, "cleaning up fixtures");

        let mut first_error = None;
        let total = records.len();
        for (position, record) in records.into_iter().enumerate() {
            if let Err(error) = self.destroy(&record).await {
                warn!(factory = %record.factory(), %error, "failed to destroy fixture");
                match policy {
                    CleanupPolicy::StopOnError => {
                        let abandoned = total - position - 1;
                        if abandoned > 0 {
                            warn!(abandoned, "remaining fixtures will not be destroyed");
                        }
                        return Err(error);
                    }
                    CleanupPolicy::ContinueOnError => {
                        if first_error.is_none() {
                            first_error = Some(error);
                        }
                    }
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Snapshot of the creation log, oldest first
    pub fn created(&self) -> Vec<CreationRecord> {
        self.state.created.lock().records().to_vec()
    }

    fn prepare(&self, name: &FactoryName) -> Result<(Arc<FactoryDefinition>, Arc<dyn Adapter>)> {
        let definition = self
            .state
            .registry
            .read()
            .get(name)
            .ok_or_else(|| Error::undefined_factory(name))?;
        Ok((definition, self.adapter_for(name)))
    }

    async fn build_defined(
        &self,
        definition: &FactoryDefinition,
        adapter: &dyn Adapter,
        overrides: &Overrides,
    ) -> Result<Document> {
        let attributes = resolver::resolve(self, definition, overrides).await?;
        Ok(adapter.build(definition.model().as_ref(), attributes))
    }

    async fn destroy(&self, record: &CreationRecord) -> Result<()> {
        let (definition, adapter) = self.prepare(record.factory())?;
        adapter
            .destroy(record.document(), definition.model().as_ref())
            .await
            .map_err(|source| Error::Destroy {
                factory: record.factory().clone(),
                source,
            })
    }
}
