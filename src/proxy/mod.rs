//! The public facade over one row's state.
//!
//! Composes the naming converter, the dual-snapshot store and the schema
//! descriptor, and adds table-name resolution and numeric-representation
//! coercion at the read boundary. One instance owns exactly one row's state.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, RwLock};

use log::debug;

use crate::core::{Representation, Result, RowError, Value};
use crate::naming;
use crate::schema::{Access, RowSchema, ID_PROPERTY};
use crate::store::PropertyStore;

/// One recognized suffix is stripped from the type name before the table
/// name is derived: `AccountRow` maps to table `account`.
const ROW_TYPE_SUFFIX: &str = "Row";

pub struct RowProxy {
    schema: Arc<RowSchema>,
    store: PropertyStore,
    quote: RwLock<String>,
    table_name: RwLock<Option<String>>,
}

impl RowProxy {
    pub fn new(schema: RowSchema) -> Self {
        Self {
            schema: Arc::new(schema),
            store: PropertyStore::new(),
            quote: RwLock::new(String::new()),
            table_name: RwLock::new(None),
        }
    }

    /// Builder-style quote configuration.
    pub fn identifier_quote(self, quote: &str) -> Self {
        self.set_identifier_quote_string(quote);
        self
    }

    /// Builder-style table name override.
    pub fn table(self, name: &str) -> Self {
        self.set_table_name(name);
        self
    }

    pub fn schema(&self) -> &RowSchema {
        &self.schema
    }

    pub fn set_identifier_quote_string(&self, quote: &str) {
        *self.quote.write().unwrap_or_else(|e| e.into_inner()) = quote.to_string();
    }

    pub fn identifier_quote_string(&self) -> String {
        self.quote.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Load a row or re-baseline after a successful write.
    pub fn bulk_set(&self, column_values: &HashMap<String, Value>) -> Result<()> {
        self.store.bulk_set(column_values, &self.identifier_quote_string())
    }

    /// Column-keyed view of the current state for statement binding.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.store.snapshot(&self.identifier_quote_string())
    }

    /// Current value of a single column, normalized for statement binding.
    pub fn column_value(&self, column: &str) -> Result<Option<Value>> {
        self.store.column_value(column, &self.identifier_quote_string())
    }

    pub fn is_dirty(&self, column: &str) -> Result<bool> {
        self.store.is_dirty(column, &self.identifier_quote_string())
    }

    /// True iff any column in the full column list (id included) is dirty.
    pub fn is_dirty_any(&self) -> Result<bool> {
        for column in self.columns(true) {
            if self.is_dirty(&column)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Sorted quoted column list for SELECT/INSERT ordering.
    pub fn columns(&self, include_id: bool) -> Vec<String> {
        self.schema.columns(include_id, &self.identifier_quote_string())
    }

    /// Fixed primary-key convention: the quoted `id` column.
    pub fn id_column(&self) -> String {
        let quote = self.identifier_quote_string();
        format!("{quote}id{quote}")
    }

    pub fn id_value(&self) -> Option<Value> {
        self.store.get(ID_PROPERTY)
    }

    /// Resolve the table name, deriving it from the schema's type name on
    /// first request. An explicit override, once set, permanently disables
    /// derivation.
    pub fn table_name(&self) -> String {
        if let Some(name) = &*self.table_name.read().unwrap_or_else(|e| e.into_inner()) {
            return name.clone();
        }
        let mut guard = self.table_name.write().unwrap_or_else(|e| e.into_inner());
        if guard.is_none() {
            let type_name = self.schema.type_name();
            let simple = type_name.strip_suffix(ROW_TYPE_SUFFIX).unwrap_or(type_name);
            let derived = naming::column_name(simple, &self.identifier_quote_string());
            debug!("derived table name '{}' from row type '{}'", derived, type_name);
            *guard = Some(derived);
        }
        guard.clone().unwrap_or_default()
    }

    pub fn set_table_name(&self, name: &str) {
        *self.table_name.write().unwrap_or_else(|e| e.into_inner()) = Some(name.to_string());
    }

    /// Read a property from the current state.
    ///
    /// When the schema declares one of the six numeric kinds and the stored
    /// value is numeric, the value is narrowed or widened accordingly. A
    /// non-numeric declared representation never coerces: an incompatible
    /// stored kind surfaces as [`RowError::TypeMismatch`]. Properties outside
    /// the schema pass through raw.
    pub fn get(&self, property: &str) -> Result<Option<Value>> {
        let def = self.schema.find(property);
        if let Some(def) = def {
            if def.access == Access::WriteOnly {
                return Err(RowError::UnsupportedOperation(property.to_string()));
            }
        }
        let Some(value) = self.store.get(property) else {
            return Ok(None);
        };
        let Some(def) = def else {
            return Ok(Some(value));
        };
        let repr = def.representation;
        if repr.is_numeric() {
            if value.is_numeric() {
                return Ok(Some(repr.coerce(&value)));
            }
            // Mismatch surfaces at the caller, matching the original proxy.
            return Ok(Some(value));
        }
        if repr == Representation::Any {
            return Ok(Some(value));
        }
        if !repr.accepts(&value) {
            return Err(RowError::TypeMismatch(format!(
                "property '{}' declared {} but holds {}",
                property,
                repr,
                value.type_name()
            )));
        }
        Ok(Some(value))
    }

    /// Write a property into the current state. `None` removes the key.
    pub fn set(&self, property: &str, value: Option<Value>) -> Result<()> {
        if let Some(def) = self.schema.find(property) {
            if def.access == Access::ReadOnly {
                return Err(RowError::UnsupportedOperation(property.to_string()));
            }
        }
        self.store.set(property, value);
        Ok(())
    }

    /// Revert uncommitted edits back to the baseline snapshot.
    pub fn reset(&self) {
        self.store.reset()
    }

    /// Read-only export of the current state, keyed by property name.
    pub fn as_map(&self) -> HashMap<String, Value> {
        self.store.as_map()
    }

    /// Diagnostics export of the current state as a JSON object, keys sorted.
    pub fn to_json(&self) -> serde_json::Value {
        let entries: BTreeMap<String, Value> = self.store.sorted_entries();
        serde_json::Value::Object(
            entries
                .into_iter()
                .map(|(property, value)| (property, value.to_json()))
                .collect(),
        )
    }
}

impl fmt::Display for RowProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (property, value)) in self.store.sorted_entries().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", property, value)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for RowProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowProxy")
            .field("type", &self.schema.type_name())
            .field("table", &*self.table_name.read().unwrap_or_else(|e| e.into_inner()))
            .field("properties", &self.store.len())
            .finish()
    }
}
