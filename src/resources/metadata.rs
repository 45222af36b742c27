//! Asset-level metadata carried through untouched by scene algorithms.

use std::collections::BTreeMap;

/// A single metadata entry value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Int(Vec<i32>),
    Double(Vec<f64>),
    String(String),
}

/// Named entries plus nested named sub-metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    entries: BTreeMap<String, MetadataValue>,
    sub_metadatas: BTreeMap<String, Metadata>,
}

impl Metadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, name: impl Into<String>, value: MetadataValue) {
        self.entries.insert(name.into(), value);
    }

    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&MetadataValue> {
        self.entries.get(name)
    }

    pub fn remove_entry(&mut self, name: &str) -> Option<MetadataValue> {
        self.entries.remove(name)
    }

    #[must_use]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn add_sub_metadata(&mut self, name: impl Into<String>, metadata: Metadata) {
        self.sub_metadatas.insert(name.into(), metadata);
    }

    #[must_use]
    pub fn sub_metadata(&self, name: &str) -> Option<&Metadata> {
        self.sub_metadatas.get(name)
    }
}

/// One column of a property table, stored as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyTableProperty {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyTable {
    pub name: String,
    pub class: String,
    pub count: usize,
    pub properties: Vec<PropertyTableProperty>,
}

/// Structural metadata: a schema document and the property tables that
/// mesh feature IDs index into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuralMetadata {
    /// Schema as an opaque JSON document.
    pub schema: String,
    property_tables: Vec<PropertyTable>,
}

impl StructuralMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_property_table(&mut self, table: PropertyTable) -> usize {
        self.property_tables.push(table);
        self.property_tables.len() - 1
    }

    #[must_use]
    pub fn num_property_tables(&self) -> usize {
        self.property_tables.len()
    }

    #[must_use]
    pub fn property_table(&self, index: usize) -> Option<&PropertyTable> {
        self.property_tables.get(index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schema.is_empty() && self.property_tables.is_empty()
    }
}
