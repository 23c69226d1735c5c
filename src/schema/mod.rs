//! Explicit schema descriptor for a row type.
//!
//! Replaces runtime discovery of accessors: the declared property set,
//! each property's expected representation and access kind are supplied
//! at construction and stay immutable for the proxy's lifetime.

use crate::core::Representation;
use crate::naming;

/// The distinguished primary-key property.
pub const ID_PROPERTY: &str = "Id";

/// How a declared property may be used through the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: String,
    pub representation: Representation,
    pub access: Access,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, representation: Representation) -> Self {
        Self {
            name: name.into(),
            representation,
            access: Access::ReadWrite,
        }
    }

    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }
}

/// Declared property set of a row type.
#[derive(Debug, Clone)]
pub struct RowSchema {
    type_name: String,
    properties: Vec<PropertyDef>,
}

impl RowSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: Vec::new(),
        }
    }

    /// Declare a read-write property.
    pub fn property(mut self, name: impl Into<String>, representation: Representation) -> Self {
        self.properties.push(PropertyDef::new(name, representation));
        self
    }

    /// Declare a property with full control over its descriptor.
    pub fn declare(mut self, def: PropertyDef) -> Self {
        self.properties.push(def);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    pub fn find(&self, property: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|def| def.name == property)
    }

    /// Enumerate the quoted column names for the declared properties.
    ///
    /// `Id` is skipped unless `include_id`. Duplicates collapse, and the
    /// result is sorted ascending by the final quoted string, which fixes
    /// generated statement argument order.
    pub fn columns(&self, include_id: bool, quote: &str) -> Vec<String> {
        let mut columns: Vec<String> = Vec::with_capacity(self.properties.len());
        for def in &self.properties {
            if def.name == ID_PROPERTY && !include_id {
                continue;
            }
            let column = naming::column_name(&def.name, quote);
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns.sort();
        columns
    }
}
