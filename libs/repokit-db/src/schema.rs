//! Static per-entity schema descriptors.
//!
//! An `EntitySchema` is built once per entity type and maps public
//! field names to columns plus a value-coercion tag. Filter and order
//! validation is a plain lookup here, never a per-call reflection scan.

use std::collections::HashMap;

use sea_orm::EntityTrait;

/// Value-coercion tag for a schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    I64,
    F64,
    Bool,
    Uuid,
    DateTimeUtc,
    Date,
    Time,
}

/// One named field: the entity column and how to coerce values for it.
#[derive(Clone)]
pub struct Field<E: EntityTrait> {
    pub col: E::Column,
    pub kind: FieldKind,
}

/// Field-name -> column map for one entity. Lookups are
/// case-insensitive; names are stored lowercased.
#[derive(Clone)]
#[must_use]
pub struct EntitySchema<E: EntityTrait> {
    map: HashMap<String, Field<E>>,
}

impl<E: EntityTrait> Default for EntitySchema<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> EntitySchema<E> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Register a field under its public name.
    pub fn field(mut self, name: impl Into<String>, col: E::Column, kind: FieldKind) -> Self {
        self.map
            .insert(name.into().to_lowercase(), Field { col, kind });
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field<E>> {
        self.map.get(&name.to_lowercase())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}
