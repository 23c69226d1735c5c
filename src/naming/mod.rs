//! Bidirectional conversion between property names (`FirstName`) and
//! dialect-quoted column names (`"first_name"`).

use crate::core::{Result, RowError};

/// Convert a capitalized property name to its quoted column form.
///
/// An underscore goes in front of every uppercase letter except the first,
/// all letters are lower-cased, and the whole quote string wraps both ends.
/// Works with an empty quote.
pub fn column_name(property: &str, quote: &str) -> String {
    format!("{quote}{}{quote}", to_snake_case(property))
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a quoted column name back to its capitalized property form.
///
/// The quote character (first character of the configured quote string) is
/// dropped wherever it appears, not only at the ends. Underscores are dropped
/// and force the next emitted character upper-case; the first emitted
/// character is always upper-cased.
///
/// Fails with [`RowError::ConfigurationError`] carrying the column key when
/// the quote string is empty.
pub fn property_name(column: &str, quote: &str) -> Result<String> {
    let quote_char = quote
        .chars()
        .next()
        .ok_or_else(|| RowError::ConfigurationError(column.to_string()))?;
    let mut out = String::with_capacity(column.len());
    let mut upper = true;
    for c in column.chars() {
        if c == quote_char {
            // dropped wherever it appears
        } else if c != '_' {
            if upper {
                out.extend(c.to_uppercase());
                upper = false;
            } else {
                out.push(c);
            }
        }
        if c == '_' {
            upper = true;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_name_inserts_underscores() {
        assert_eq!(column_name("UserId", "\""), "\"user_id\"");
        assert_eq!(column_name("FirstName", "`"), "`first_name`");
        assert_eq!(column_name("Id", ""), "id");
    }

    #[test]
    fn test_property_name_round_trip() {
        for property in ["Id", "UserId", "FirstName", "A", "HtmlBody"] {
            let column = column_name(property, "\"");
            assert_eq!(property_name(&column, "\"").unwrap(), property);
        }
    }

    #[test]
    fn test_property_name_examples() {
        assert_eq!(property_name("\"user_id\"", "\"").unwrap(), "UserId");
        assert_eq!(property_name("`created_at`", "`").unwrap(), "CreatedAt");
        assert_eq!(property_name("name", "\"").unwrap(), "Name");
    }

    #[test]
    fn test_property_name_drops_internal_quote_chars() {
        // The quote character vanishes anywhere in the string, so a column
        // containing it internally comes back silently corrupted.
        assert_eq!(property_name("fo\"o_id", "\"").unwrap(), "FooId");
    }

    #[test]
    fn test_property_name_requires_quote() {
        let err = property_name("user_id", "").unwrap_err();
        match err {
            RowError::ConfigurationError(key) => assert_eq!(key, "user_id"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trailing_underscore() {
        assert_eq!(property_name("\"user_\"", "\"").unwrap(), "User");
        assert_eq!(property_name("\"_user\"", "\"").unwrap(), "User");
    }
}
