//! Shared fixtures for integration tests
//!
//! `JournalModel` records every save and destroy it sees, and can be told to
//! fail either operation for documents carrying a given `label`.

#![allow(dead_code)]

use async_trait::async_trait;
use fixture_factory::{BoxError, Document, Model, ModelName};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Ordered list of `"save:<label>"` / `"destroy:<label>"` entries
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter_map(|entry| entry.strip_prefix("destroy:").map(str::to_string))
            .collect()
    }

    fn record(&self, operation: &str, document: &Document) {
        self.entries
            .lock()
            .push(format!("{operation}:{}", label(document)));
    }
}

fn label(document: &Document) -> String {
    document
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or("?")
        .to_string()
}

#[derive(Debug, Clone)]
pub struct JournalModel {
    name: ModelName,
    journal: Journal,
    fail_save: Option<String>,
    fail_destroy: Option<String>,
}

impl JournalModel {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: ModelName::from(name),
            journal: journal.clone(),
            fail_save: None,
            fail_destroy: None,
        }
    }

    pub fn failing_save_of(mut self, label: &str) -> Self {
        self.fail_save = Some(label.to_string());
        self
    }

    pub fn failing_destroy_of(mut self, label: &str) -> Self {
        self.fail_destroy = Some(label.to_string());
        self
    }

    pub fn shared(self) -> Arc<dyn Model> {
        Arc::new(self)
    }
}

#[async_trait]
impl Model for JournalModel {
    fn name(&self) -> ModelName {
        self.name.clone()
    }

    async fn save(&self, document: &mut Document) -> Result<(), BoxError> {
        tokio::task::yield_now().await;
        if self.fail_save.as_deref() == Some(label(document).as_str()) {
            return Err(format!("cannot save {}", label(document)).into());
        }
        self.journal.record("save", document);
        Ok(())
    }

    async fn destroy(&self, document: &Document) -> Result<(), BoxError> {
        tokio::task::yield_now().await;
        self.journal.record("destroy", document);
        if self.fail_destroy.as_deref() == Some(label(document).as_str()) {
            return Err(format!("cannot destroy {}", label(document)).into());
        }
        Ok(())
    }
}
