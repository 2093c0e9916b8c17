//! Identifier canonicalization and definition checks
//!
//! Every name that enters the core from outside (table names, field names,
//! relation targets, projected fields) goes through [`canonical_name`], so
//! lookups inside the core can compare with plain `==`.

use crate::error::{Error, Result};

/// Longest accepted table or field name.
pub const MAX_NAME_LENGTH: usize = 64;

/// Widest accepted column, the classic character field limit.
pub const MAX_FIELD_WIDTH: usize = 254;

/// Longest accepted filter expression.
pub const MAX_FILTER_LENGTH: usize = 64 * 1024;

/// Trims and upper-cases an identifier.
#[inline]
pub fn canonical_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Canonicalizes and validates a table or field name
///
/// # Errors
///
/// Returns Error::InvalidArgument when the name is empty, too long, or
/// contains whitespace, a quote, a null byte or `.` (reserved for
/// `TABLE.FIELD` projections).
pub fn validate_name(name: &str) -> Result<String> {
    let name = canonical_name(name);

    if name.is_empty() {
        return Err(Error::InvalidArgument("name cannot be empty".to_string()));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::InvalidArgument(format!(
            "name length {} exceeds maximum {}",
            name.chars().count(),
            MAX_NAME_LENGTH
        )));
    }

    if let Some(ch) = name
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '.' | '"' | '\'' | '\0'))
    {
        return Err(Error::InvalidArgument(format!(
            "name {:?} cannot contain {:?}",
            name, ch
        )));
    }

    Ok(name)
}

/// Validates a field's display width and decimal count
///
/// # Errors
///
/// Returns Error::InvalidArgument if the width is outside
/// `1..=MAX_FIELD_WIDTH` or the decimals exceed the width.
#[inline]
pub fn validate_width(width: usize, decimals: usize) -> Result<()> {
    if width == 0 || width > MAX_FIELD_WIDTH {
        return Err(Error::InvalidArgument(format!(
            "width {} must be between 1 and {}",
            width, MAX_FIELD_WIDTH
        )));
    }

    if decimals > width {
        return Err(Error::InvalidArgument(format!(
            "decimals {} exceed width {}",
            decimals, width
        )));
    }

    Ok(())
}

/// Rejects oversized filter text before it reaches the lexer.
#[inline]
pub fn validate_filter(filter: &str) -> Result<()> {
    if filter.len() > MAX_FILTER_LENGTH {
        return Err(Error::InvalidArgument(format!(
            "filter length {} exceeds maximum {}",
            filter.len(),
            MAX_FILTER_LENGTH
        )));
    }

    Ok(())
}
