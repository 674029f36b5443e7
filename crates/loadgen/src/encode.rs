//! SQL literal encoding for generated statements.
//!
//! The batch inserter renders whole multi-row INSERT statements as text, so
//! every variable value must pass through these functions. tokio-postgres
//! has no literal-quoting routine of its own; this module implements the
//! PostgreSQL quoting rule (single-quote delimiters, embedded single quotes
//! doubled) and is the only place in the crate allowed to build literals.
//!
//! Today's vocabularies contain no special characters. That is not a reason
//! to skip quoting: an author name like `O'Brien` must produce a valid
//! statement with the literal value stored intact.

use chrono::{DateTime, NaiveDate, Utc};

/// Quote a text value as a PostgreSQL string literal.
pub fn quote_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Quote a calendar date as `'YYYY-MM-DD'`.
pub fn quote_date(value: NaiveDate) -> String {
    format!("'{}'", value.format("%Y-%m-%d"))
}

/// Quote a UTC timestamp as `'YYYY-MM-DD HH:MM:SS'`.
pub fn quote_timestamp(value: DateTime<Utc>) -> String {
    format!("'{}'", value.format("%Y-%m-%d %H:%M:%S"))
}
