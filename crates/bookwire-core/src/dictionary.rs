//! Field dictionary interface.
//!
//! The dictionary is an external collaborator: it maps numeric field ids to
//! names and semantic types. Decoding never requires it to be complete; a
//! miss degrades the rendered field, it never fails the decode.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Semantic type declared by the dictionary for a field.
///
/// The wire type governs how bytes are decoded; the semantic type only
/// refines display (e.g. a BUFFER field with `text` semantics is shown as
/// text rather than hex).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Integer,
    Decimal,
    Date,
    Enumerated,
    Text,
    Binary,
}

/// One dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub field_id: u16,
    pub name: String,
    pub semantic: SemanticType,
}

/// Lookup capability consumed by the renderer.
pub trait FieldDictionary {
    fn lookup(&self, field_id: u16) -> Option<&FieldDef>;
}

/// Simple in-memory dictionary, loadable from a JSON array of `FieldDef`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDictionary {
    defs: HashMap<u16, FieldDef>,
}

impl InMemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_defs(defs: impl IntoIterator<Item = FieldDef>) -> Self {
        Self {
            defs: defs.into_iter().map(|def| (def.field_id, def)).collect(),
        }
    }

    pub fn insert(&mut self, def: FieldDef) {
        self.defs.insert(def.field_id, def);
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl FieldDictionary for InMemoryDictionary {
    fn lookup(&self, field_id: u16) -> Option<&FieldDef> {
        self.defs.get(&field_id)
    }
}
