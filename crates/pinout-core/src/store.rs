//! Ordered per-attribute result records for one extraction session.

use std::collections::HashMap;

use crate::types::AttributeRecord;

/// Holds the authoritative record for every attribute, in catalog order.
///
/// Stages read the current record, build a replacement, and write it
/// back wholesale. Order is stable across replacements so exports and
/// displays always list attributes the way the catalog does.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    records: Vec<AttributeRecord>,
    index: HashMap<String, usize>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with one pending record per attribute key, in order.
    pub fn for_attributes<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut store = Self::new();
        for key in keys {
            store.replace(AttributeRecord::pending(key));
        }
        store
    }

    /// Current record for an attribute.
    pub fn get(&self, prompt_name: &str) -> Option<&AttributeRecord> {
        self.index
            .get(prompt_name)
            .map(|&position| &self.records[position])
    }

    /// Replace an attribute's record, or append it if absent.
    pub fn replace(&mut self, record: AttributeRecord) {
        match self.index.get(&record.prompt_name) {
            Some(&position) => self.records[position] = record,
            None => {
                self.index
                    .insert(record.prompt_name.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// All records in catalog order.
    pub fn records(&self) -> &[AttributeRecord] {
        &self.records
    }

    /// Attributes that should go through the document fallback stage.
    pub fn document_fallback_queue(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.needs_document_fallback())
            .map(|record| record.prompt_name.clone())
            .collect()
    }

    /// Attributes that should go through the final recheck stage.
    pub fn final_recheck_queue(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.needs_final_recheck())
            .map(|record| record.prompt_name.clone())
            .collect()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
