//! Dual-snapshot property store.
//!
//! Holds two parallel maps keyed by property name: `current` (live state)
//! and `baseline` (last loaded or persisted state). Dirtiness is the
//! difference between the two. Both maps tolerate concurrent access without
//! external locking; `bulk_set` and `reset` are clear-then-refill and are
//! deliberately not atomic across the whole batch, so a concurrent dirty
//! check may observe a partially refilled state.

use std::collections::{BTreeMap, HashMap};

use dashmap::DashMap;
use log::debug;

use crate::core::{Result, Value};
use crate::naming;

#[derive(Debug, Default)]
pub struct PropertyStore {
    current: DashMap<String, Value>,
    baseline: DashMap<String, Value>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full replace of both snapshots from column-keyed raw data, never a
    /// merge. Immediately afterwards `current` and `baseline` are value-equal
    /// for every key.
    pub fn bulk_set(&self, column_values: &HashMap<String, Value>, quote: &str) -> Result<()> {
        self.baseline.clear();
        self.current.clear();
        for (column, value) in column_values {
            let property = naming::property_name(column, quote)?;
            self.baseline.insert(property.clone(), value.clone());
            self.current.insert(property, value.clone());
        }
        debug!("bulk set replaced snapshots with {} columns", column_values.len());
        Ok(())
    }

    /// Re-key `current` by quoted column name for statement binding.
    /// Timestamps are normalized to their canonical form at this boundary.
    pub fn snapshot(&self, quote: &str) -> HashMap<String, Value> {
        let mut columns = HashMap::with_capacity(self.current.len());
        for entry in self.current.iter() {
            columns.insert(naming::column_name(entry.key(), quote), entry.value().normalized());
        }
        columns
    }

    /// Single-column variant of [`snapshot`](Self::snapshot).
    pub fn column_value(&self, column: &str, quote: &str) -> Result<Option<Value>> {
        let property = naming::property_name(column, quote)?;
        Ok(self.current.get(&property).map(|entry| entry.value().normalized()))
    }

    /// A column is dirty when its current value differs from baseline.
    /// Keys introduced after the last bulk set are unconditionally dirty.
    pub fn is_dirty(&self, column: &str, quote: &str) -> Result<bool> {
        let property = naming::property_name(column, quote)?;
        let current = self.current.get(&property).map(|entry| entry.value().clone());
        let baseline = self.baseline.get(&property).map(|entry| entry.value().clone());
        Ok(match (current, baseline) {
            (None, None) => false,
            (Some(current), Some(baseline)) => current != baseline,
            _ => true,
        })
    }

    /// Discard uncommitted edits: `current` becomes a fresh copy of
    /// `baseline`. The baseline itself is untouched.
    pub fn reset(&self) {
        self.current.clear();
        for entry in self.baseline.iter() {
            self.current.insert(entry.key().clone(), entry.value().clone());
        }
    }

    pub fn get(&self, property: &str) -> Option<Value> {
        self.current.get(property).map(|entry| entry.value().clone())
    }

    /// `None` removes the key; there is no stored null marker.
    pub fn set(&self, property: &str, value: Option<Value>) {
        match value {
            Some(value) => {
                self.current.insert(property.to_string(), value);
            }
            None => {
                self.current.remove(property);
            }
        }
    }

    pub fn as_map(&self) -> HashMap<String, Value> {
        self.current
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Deterministically ordered view, used for dumps and JSON export.
    pub fn sorted_entries(&self) -> BTreeMap<String, Value> {
        self.current
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
