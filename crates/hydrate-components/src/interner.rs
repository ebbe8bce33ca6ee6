//! Type Interner - Deduplicate component type names
//!
//! Every distinct type name is sent once in the envelope's type table and
//! records refer to it by index.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Index into an envelope's type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeIndex(pub u32);

impl TypeIndex {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Type name interner, scoped to one envelope build
#[derive(Debug, Default)]
pub struct TypeInterner {
    types: Vec<Arc<str>>,
    lookup: HashMap<Arc<str>, TypeIndex>,
}

impl TypeInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a type name.
    /// First occurrence gets the next sequential index.
    pub fn intern(&mut self, type_name: &str) -> TypeIndex {
        if let Some(&index) = self.lookup.get(type_name) {
            return index;
        }

        let index = TypeIndex(self.types.len() as u32);
        let name: Arc<str> = type_name.into();
        self.types.push(name.clone());
        self.lookup.insert(name, index);
        index
    }

    /// Get type name by index
    pub fn get(&self, index: TypeIndex) -> Option<&str> {
        self.types.get(index.as_usize()).map(|s| s.as_ref())
    }

    /// Number of distinct types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Consume into the type table, ordered by index
    pub fn into_types(self) -> Vec<String> {
        self.types.iter().map(|s| s.to_string()).collect()
    }
}
