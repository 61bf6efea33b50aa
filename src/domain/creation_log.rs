//! Record of the fixtures persisted during a test run

use super::document::Document;
use super::types::FactoryName;

/// A document that was saved successfully, with the factory that made it
#[derive(Debug, Clone, PartialEq)]
pub struct CreationRecord {
    factory: FactoryName,
    document: Document,
}

impl CreationRecord {
    pub fn new(factory: FactoryName, document: Document) -> Self {
        Self { factory, document }
    }

    pub fn factory(&self) -> &FactoryName {
        &self.factory
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// Append-only log of saved documents, in save-completion order
#[derive(Debug, Default)]
pub struct CreationLog {
    records: Vec<CreationRecord>,
}

impl CreationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: CreationRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CreationRecord] {
        &self.records
    }

    /// Empty the log, handing back its records newest first
    pub fn drain_newest_first(&mut self) -> Vec<CreationRecord> {
        let mut records = std::mem::take(&mut self.records);
        records.reverse();
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ModelName;

    fn record(factory: &str) -> CreationRecord {
        CreationRecord::new(
            FactoryName::from(factory),
            Document::new(ModelName::from(factory)),
        )
    }

    #[test]
    fn drain_returns_records_in_reverse_and_empties_log() {
        let mut log = CreationLog::new();
        log.push(record("a"));
        log.push(record("b"));
        log.push(record("c"));

        let drained: Vec<_> = log
            .drain_newest_first()
            .iter()
            .map(|r| r.factory().to_string())
            .collect();

        assert_eq!(drained, vec!["c", "b", "a"]);
        assert!(log.is_empty());
    }

    #[test]
    fn draining_an_empty_log_yields_nothing() {
        let mut log = CreationLog::new();
        assert!(log.drain_newest_first().is_empty());
        assert_eq!(log.len(), 0);
    }
}
