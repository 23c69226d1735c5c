// ============================================================================
// RowProxy Library
// ============================================================================
//
//! Row/object mapping proxy core.
//!
//! Presents a structured accessor surface (get/set per named property) backed
//! by an in-memory key-value store, translating between capitalized property
//! names (`FirstName`) and dialect-quoted column names (`"first_name"`), and
//! tracking which properties changed since the row was last loaded or
//! persisted so a collaborator can build partial UPDATE statements.
//!
//! # Examples
//!
//! ```
//! use rowproxy::{Representation, RowProxy, RowSchema, Value};
//! use std::collections::HashMap;
//!
//! # fn main() -> rowproxy::Result<()> {
//! let schema = RowSchema::new("AccountRow")
//!     .property("Id", Representation::Long)
//!     .property("FirstName", Representation::Text);
//! let proxy = RowProxy::new(schema).identifier_quote("\"");
//!
//! // Load a row (e.g. from a query result).
//! let mut row = HashMap::new();
//! row.insert("\"id\"".to_string(), Value::Integer(1));
//! row.insert("\"first_name\"".to_string(), Value::from("Mark"));
//! proxy.bulk_set(&row)?;
//! assert!(!proxy.is_dirty_any()?);
//!
//! // Edit through the accessor surface; dirtiness drives partial updates.
//! proxy.set("FirstName", Some(Value::from("Anna")))?;
//! assert!(proxy.is_dirty("\"first_name\"")?);
//! assert!(!proxy.is_dirty("\"id\"")?);
//!
//! assert_eq!(proxy.table_name(), "\"account\"");
//! assert_eq!(proxy.columns(true), vec!["\"first_name\"", "\"id\""]);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod dispatch;
pub mod naming;
pub mod proxy;
pub mod schema;
pub mod store;

// Re-export main types for convenience
pub use crate::core::{Representation, Result, RowError, Value};
pub use crate::dispatch::{dispatch, Call, CallArg, Reply};
pub use crate::proxy::RowProxy;
pub use crate::schema::{Access, PropertyDef, RowSchema};
pub use crate::store::PropertyStore;
