//! Field definitions.

use std::fmt;

/// One column of a table: name, type tag, display width and decimals.
///
/// The type tag is stored as given and never interpreted; values are raw
/// text regardless of the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Canonical (upper-case) field name
    pub name: String,
    /// Declared type tag such as `C`, `N` or `D`
    pub field_type: String,
    /// Display width in characters
    pub width: usize,
    /// Decimal places, meaningful only for numeric display
    pub decimals: usize,
}

impl FieldDef {
    /// Creates a field definition. The name is expected to be canonical.
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        width: usize,
        decimals: usize,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            width,
            decimals,
        }
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}({},{})",
            self.name, self.field_type, self.width, self.decimals
        )
    }
}
