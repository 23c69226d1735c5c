//! Call dispatcher.
//!
//! Routes an incoming call descriptor (name plus arguments) onto the facade,
//! mirroring the accessor protocol the proxy exposes to generated bindings:
//! `get*`/`set*` accessor names, two zero-argument reserved queries and two
//! `$`-prefixed one-argument reserved commands.

use std::collections::HashMap;

use log::trace;

use crate::core::{Result, RowError, Value};
use crate::proxy::RowProxy;

/// Reserved zero-argument query returning the facade handle itself.
pub const PROXY_QUERY: &str = "privateProxy";
/// Reserved zero-argument query returning a formatted dump of current state.
pub const STRING_QUERY: &str = "toString";
/// Reserved one-argument bulk-set command.
pub const BULK_SET_COMMAND: &str = "$set";
/// Reserved one-argument quote-configuration command.
pub const QUOTE_COMMAND: &str = "$setIdentifierQuoteString";

#[derive(Debug, Clone)]
pub enum CallArg {
    /// An explicit null argument; on a property write it removes the key.
    Null,
    Value(Value),
    /// Column-keyed raw data for the bulk-set command.
    ColumnValues(HashMap<String, Value>),
}

#[derive(Debug, Clone)]
pub struct Call {
    pub name: String,
    pub args: Vec<CallArg>,
}

impl Call {
    pub fn nullary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn unary(name: impl Into<String>, arg: CallArg) -> Self {
        Self {
            name: name.into(),
            args: vec![arg],
        }
    }
}

#[derive(Debug)]
pub enum Reply<'a> {
    /// The facade handle (identity query).
    Proxy(&'a RowProxy),
    /// Formatted dump of the current state.
    Text(String),
    /// Result of a property read; `None` when the property is unset.
    Value(Option<Value>),
    /// A write or command completed.
    Unit,
}

/// Route a call onto the facade.
///
/// Unrecognized name/arity combinations fail with
/// [`RowError::UnsupportedOperation`] carrying the attempted name; store
/// state is never touched by a rejected call.
pub fn dispatch<'a>(proxy: &'a RowProxy, call: &Call) -> Result<Reply<'a>> {
    trace!("dispatch '{}' with {} args", call.name, call.args.len());
    let name = call.name.as_str();
    match call.args.as_slice() {
        [] => {
            if name == PROXY_QUERY {
                return Ok(Reply::Proxy(proxy));
            }
            if name == STRING_QUERY {
                return Ok(Reply::Text(proxy.to_string()));
            }
            if is_accessor_shaped(name) {
                return Ok(Reply::Value(proxy.get(property_suffix(name))?));
            }
            Err(RowError::UnsupportedOperation(name.to_string()))
        }
        [arg] => {
            if name.starts_with('$') {
                if name == BULK_SET_COMMAND {
                    return match arg {
                        CallArg::ColumnValues(values) => {
                            proxy.bulk_set(values)?;
                            Ok(Reply::Unit)
                        }
                        _ => Err(RowError::TypeMismatch(format!(
                            "{} expects a column-keyed value map",
                            name
                        ))),
                    };
                }
                if name == QUOTE_COMMAND {
                    return match arg {
                        CallArg::Value(Value::Text(quote)) => {
                            proxy.set_identifier_quote_string(quote);
                            Ok(Reply::Unit)
                        }
                        _ => Err(RowError::TypeMismatch(format!("{} expects a string", name))),
                    };
                }
                return Err(RowError::UnsupportedOperation(name.to_string()));
            }
            if is_accessor_shaped(name) {
                let property = property_suffix(name);
                match arg {
                    CallArg::Null => proxy.set(property, None)?,
                    CallArg::Value(value) => proxy.set(property, Some(value.clone()))?,
                    CallArg::ColumnValues(_) => {
                        return Err(RowError::TypeMismatch(format!(
                            "property write '{}' expects a scalar value",
                            name
                        )))
                    }
                }
                return Ok(Reply::Unit);
            }
            Err(RowError::UnsupportedOperation(name.to_string()))
        }
        _ => Err(RowError::UnsupportedOperation(name.to_string())),
    }
}

// Try to be fast with this check: read marker, or write marker + "et".
// Deliberately loose; names that merely share a prefix are accepted and
// routed as property access on their suffix.
fn is_accessor_shaped(name: &str) -> bool {
    name.starts_with('g') || name.starts_with('s') && name[1..].starts_with("et")
}

// The property is whatever follows the three-character accessor prefix.
fn property_suffix(name: &str) -> &str {
    name.get(3..).unwrap_or("")
}
