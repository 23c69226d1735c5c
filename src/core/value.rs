use std::fmt;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single stored property value.
///
/// Absence of a key in the store means "unset"; there is no null marker.
/// Writing `None` through the facade removes the key instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Float(_) => "FLOAT",
            Self::Text(_) => "TEXT",
            Self::Boolean(_) => "BOOLEAN",
            Self::Timestamp(_) => "TIMESTAMP",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Float(f) => {
                if f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Canonical statement-binding form: timestamps are truncated to
    /// millisecond precision, everything else passes through untouched.
    pub fn normalized(&self) -> Value {
        match self {
            Self::Timestamp(ts) => match Utc.timestamp_millis_opt(ts.timestamp_millis()).single() {
                Some(truncated) => Self::Timestamp(truncated),
                None => self.clone(),
            },
            other => other.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Integer(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Value::from(*f),
            Self::Text(s) => serde_json::Value::from(s.clone()),
            Self::Boolean(b) => serde_json::Value::from(*b),
            Self::Timestamp(ts) => serde_json::Value::from(ts.to_rfc3339()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    return true;
                }
                (a - b).abs() < f64::EPSILON
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Integer(i), Self::Float(f)) | (Self::Float(f), Self::Integer(i)) => {
                (*i as f64 - f).abs() < f64::EPSILON
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(fl) => {
                if fl.is_nan() {
                    write!(f, "NaN")
                } else if fl.is_infinite() {
                    if *fl > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else {
                    write!(f, "{}", fl)
                }
            }
            Self::Text(s) => write!(f, "{}", s),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

/// The representation a schema declares for a property.
///
/// The six numeric kinds drive narrowing/widening at the read boundary;
/// the non-numeric kinds only gate compatibility; `Any` declares nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation {
    Double,
    Long,
    Int,
    Float,
    Short,
    Byte,
    Text,
    Boolean,
    Timestamp,
    Any,
}

impl Representation {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Double | Self::Long | Self::Int | Self::Float | Self::Short | Self::Byte
        )
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::Text, Value::Text(_)) => true,
            (Self::Boolean, Value::Boolean(_)) => true,
            (Self::Timestamp, Value::Timestamp(_)) => true,
            (repr, value) if repr.is_numeric() => value.is_numeric(),
            _ => false,
        }
    }

    /// Narrow or widen a numeric value to this declared kind.
    ///
    /// Integer kinds truncate a stored float; `Short` and `Byte` wrap like
    /// hardware casts. Non-numeric inputs come back unchanged.
    pub fn coerce(&self, value: &Value) -> Value {
        let (i, f) = match value {
            Value::Integer(i) => (*i, *i as f64),
            Value::Float(f) => (*f as i64, *f),
            _ => return value.clone(),
        };
        match self {
            Self::Double => Value::Float(f),
            Self::Long => Value::Integer(i),
            Self::Int => Value::Integer(i as i32 as i64),
            Self::Float => Value::Float(f as f32 as f64),
            Self::Short => Value::Integer(i as i16 as i64),
            Self::Byte => Value::Integer(i as i8 as i64),
            _ => value.clone(),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Double => write!(f, "DOUBLE"),
            Self::Long => write!(f, "LONG"),
            Self::Int => write!(f, "INT"),
            Self::Float => write!(f, "FLOAT"),
            Self::Short => write!(f, "SHORT"),
            Self::Byte => write!(f, "BYTE"),
            Self::Text => write!(f, "TEXT"),
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::Timestamp => write!(f, "TIMESTAMP"),
            Self::Any => write!(f, "ANY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_equality() {
        assert_eq!(Value::Integer(42), Value::Integer(42));
        assert_eq!(Value::Integer(1), Value::Float(1.0));
        assert_ne!(Value::Integer(1), Value::Integer(2));
        assert_ne!(Value::Text("1".into()), Value::Integer(1));
    }

    #[test]
    fn test_coerce_narrows_integer() {
        assert_eq!(Representation::Byte.coerce(&Value::Integer(300)), Value::Integer(44));
        assert_eq!(Representation::Short.coerce(&Value::Integer(70_000)), Value::Integer(4464));
        assert_eq!(
            Representation::Int.coerce(&Value::Integer(0x1_0000_0001)),
            Value::Integer(1)
        );
    }

    #[test]
    fn test_coerce_float_to_integer_kind_truncates() {
        assert_eq!(Representation::Int.coerce(&Value::Float(3.9)), Value::Integer(3));
        assert_eq!(Representation::Long.coerce(&Value::Float(-2.7)), Value::Integer(-2));
    }

    #[test]
    fn test_coerce_widens_to_double() {
        assert_eq!(Representation::Double.coerce(&Value::Integer(3)), Value::Float(3.0));
    }

    #[test]
    fn test_coerce_leaves_non_numeric_alone() {
        let text = Value::Text("hello".into());
        assert_eq!(Representation::Long.coerce(&text), text);
    }

    #[test]
    fn test_normalized_truncates_timestamp_to_millis() {
        let ts = chrono::DateTime::from_timestamp(1_700_000_000, 123_456_789).unwrap();
        let normalized = Value::Timestamp(ts).normalized();
        let truncated = normalized.as_timestamp().unwrap();
        assert_eq!(truncated.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_accepts() {
        assert!(Representation::Text.accepts(&Value::Text("a".into())));
        assert!(!Representation::Text.accepts(&Value::Boolean(true)));
        assert!(Representation::Any.accepts(&Value::Boolean(true)));
        assert!(Representation::Long.accepts(&Value::Float(1.5)));
    }
}
