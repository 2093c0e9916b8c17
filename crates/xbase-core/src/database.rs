//! The database: tables, relations, the selected table and display flags.

use crate::error::{Error, Result};
use crate::field::FieldDef;
use crate::relation::{Relation, RelationSet};
use crate::table::{Record, Table};
use crate::validation::{canonical_name, validate_name, validate_width};

/// Result of [`Database::use_table`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    /// The table existed and is now selected
    Opened,
    /// The table did not exist; it was created and selected
    Created,
}

/// All interpreter state that a session works on.
///
/// Tables keep their creation order, which is also the order they are
/// written to a snapshot. The selected table is held by name and always
/// names a table in `tables`.
#[derive(Debug, Clone, Default)]
pub struct Database {
    tables: Vec<Table>,
    relations: RelationSet,
    selected: Option<String>,
    show_record_numbers: bool,
}

impl Database {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a database from loaded tables and relations.
    ///
    /// Nothing is selected afterwards. Relations that point at missing
    /// tables are kept as loaded; LIST skips them.
    pub fn from_parts(tables: Vec<Table>, relations: RelationSet) -> Self {
        for relation in relations.iter() {
            let known = |name: &str| tables.iter().any(|t| t.name() == name);
            if !known(&relation.source_table) || !known(&relation.target_table) {
                tracing::warn!("relation {} refers to a missing table", relation);
            }
        }

        Self {
            tables,
            relations,
            selected: None,
            show_record_numbers: false,
        }
    }

    /// Tables in creation order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Declared relations
    pub fn relations(&self) -> &RelationSet {
        &self.relations
    }

    /// Looks up a table, canonicalizing the name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        let name = canonical_name(name);
        self.tables.iter().find(|t| t.name() == name)
    }

    fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name() == name)
    }

    /// The table commands currently apply to.
    ///
    /// # Errors
    ///
    /// Returns Error::NoTableSelected when nothing is in use.
    pub fn selected(&self) -> Result<&Table> {
        self.selected
            .as_deref()
            .and_then(|name| self.tables.iter().find(|t| t.name() == name))
            .ok_or(Error::NoTableSelected)
    }

    pub(crate) fn selected_mut(&mut self) -> Result<&mut Table> {
        let name = self.selected.clone().ok_or(Error::NoTableSelected)?;
        self.table_mut(&name).ok_or(Error::NoTableSelected)
    }

    /// Name of the selected table, if any
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether listings carry a record-number column
    pub fn show_record_numbers(&self) -> bool {
        self.show_record_numbers
    }

    /// Turns the record-number column on or off
    pub fn set_show_record_numbers(&mut self, on: bool) {
        self.show_record_numbers = on;
    }

    /// Creates an empty table and returns its canonical name.
    ///
    /// # Errors
    ///
    /// Returns Error::TableExists if the name is taken, or
    /// Error::InvalidArgument for an unusable name.
    pub fn create_table(&mut self, name: &str) -> Result<String> {
        let name = validate_name(name)?;
        if self.tables.iter().any(|t| t.name() == name) {
            return Err(Error::TableExists(name));
        }

        tracing::debug!("creating table {}", name);
        self.tables.push(Table::new(name.clone()));
        Ok(name)
    }

    /// Selects a table, creating it first when it does not exist.
    pub fn use_table(&mut self, name: &str) -> Result<UseOutcome> {
        let canonical = canonical_name(name);
        let outcome = if self.tables.iter().any(|t| t.name() == canonical) {
            UseOutcome::Opened
        } else {
            self.create_table(&canonical)?;
            UseOutcome::Created
        };

        tracing::debug!("table {} in use ({:?})", canonical, outcome);
        self.selected = Some(canonical);
        Ok(outcome)
    }

    /// Adds a field to the selected table.
    ///
    /// Fields may be added after records exist; older records then read
    /// as empty in the new column. Redefining a name replaces it in place.
    pub fn add_field(
        &mut self,
        name: &str,
        field_type: &str,
        width: usize,
        decimals: usize,
    ) -> Result<&FieldDef> {
        self.selected()?;
        let name = validate_name(name)?;
        validate_width(width, decimals)?;

        let table = self.selected_mut()?;
        let replaced = table.add_field(FieldDef::new(name.clone(), field_type, width, decimals));
        if replaced {
            tracing::debug!("field {} redefined in table {}", name, table.name());
        } else if table.record_count() > 0 {
            tracing::debug!(
                "field {} added to table {} which already holds {} records",
                name,
                table.name(),
                table.record_count()
            );
        }

        let idx = table.field_index(&name).ok_or_else(|| Error::FieldNotFound {
            table: table.name().to_string(),
            field: name.clone(),
        })?;
        Ok(&table.fields()[idx])
    }

    /// Appends a record to the selected table.
    ///
    /// # Errors
    ///
    /// Error::NoTableSelected, or Error::RecordLength when the value count
    /// differs from the field count; nothing is appended in either case.
    pub fn add_record(&mut self, values: Record) -> Result<()> {
        let table = self.selected_mut()?;
        table.add_record(values)?;
        tracing::debug!(
            "record {} added to table {}",
            table.record_count(),
            table.name()
        );
        Ok(())
    }

    /// Declares `selected.field -> target`.
    ///
    /// Checks, in order: a table is selected, `target` exists, `field`
    /// exists in the selected table. Duplicates are not rejected.
    pub fn set_relation(&mut self, field: &str, target: &str) -> Result<&Relation> {
        let source = self.selected()?;
        let target = canonical_name(target);
        if !self.tables.iter().any(|t| t.name() == target) {
            return Err(Error::TableNotFound(target));
        }

        let field = canonical_name(field);
        if source.field_index(&field).is_none() {
            return Err(Error::FieldNotFound {
                table: source.name().to_string(),
                field,
            });
        }

        let relation = Relation::new(source.name(), field, target);
        tracing::debug!("relation declared: {}", relation);
        Ok(self.relations.push(relation))
    }

    pub(crate) fn set_cursor(&mut self, table: &str, cursor: usize) {
        if let Some(table) = self.table_mut(table) {
            table.set_cursor(cursor);
        }
    }
}
