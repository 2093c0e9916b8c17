//! Tables: an ordered field catalog plus append-only records.

use crate::error::{Error, Result};
use crate::field::FieldDef;

/// One record: raw text values in field-declaration order.
pub type Record = Vec<String>;

/// A named table.
///
/// Records are checked against the field count when they are inserted.
/// Fields may still be added afterwards, so older records can be shorter
/// than the current catalog; [`Table::value`] reads missing positions as
/// empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    fields: Vec<FieldDef>,
    records: Vec<Record>,
    cursor: usize,
}

impl Table {
    /// Creates an empty table. The name is expected to be canonical.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            records: Vec::new(),
            cursor: 0,
        }
    }

    /// Rebuilds a table from persisted parts without re-checking record
    /// lengths.
    pub fn from_parts(
        name: impl Into<String>,
        fields: Vec<FieldDef>,
        records: Vec<Record>,
        cursor: usize,
    ) -> Self {
        Self {
            name: name.into(),
            fields,
            records,
            cursor,
        }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field catalog in declaration order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Records in insertion order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Position where an unqualified LIST resumes
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    /// Number of declared fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of stored records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Position of a field by canonical name
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field definition by canonical name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Adds a field at the end of the catalog.
    ///
    /// Redefining an existing name replaces that definition in place, so
    /// the field keeps its position and the field count does not change.
    /// Returns `true` when an earlier definition was replaced.
    pub fn add_field(&mut self, field: FieldDef) -> bool {
        match self.field_index(&field.name) {
            Some(idx) => {
                self.fields[idx] = field;
                true
            }
            None => {
                self.fields.push(field);
                false
            }
        }
    }

    /// Appends a record.
    ///
    /// # Errors
    ///
    /// Returns Error::RecordLength when the value count differs from the
    /// field count; the table is left unchanged.
    pub fn add_record(&mut self, values: Record) -> Result<()> {
        if values.len() != self.fields.len() {
            return Err(Error::RecordLength {
                expected: self.fields.len(),
                got: values.len(),
            });
        }
        self.records.push(values);
        Ok(())
    }

    /// Value at `field_idx` of `record`, empty when the record predates
    /// the field.
    pub fn value<'r>(record: &'r Record, field_idx: usize) -> &'r str {
        record.get(field_idx).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customers() -> Table {
        let mut table = Table::new("CUSTOMERS");
        table.add_field(FieldDef::new("ID", "C", 4, 0));
        table.add_field(FieldDef::new("NAME", "C", 10, 0));
        table
    }

    #[test]
    fn test_add_record_in_order() {
        let mut table = customers();
        for i in 0..5 {
            table
                .add_record(vec![format!("{}", 1000 + i), format!("N{}", i)])
                .unwrap();
        }

        assert_eq!(table.record_count(), 5);
        assert_eq!(table.records()[0][0], "1000");
        assert_eq!(table.records()[4][1], "N4");
    }

    #[test]
    fn test_add_record_wrong_length() {
        let mut table = customers();
        table.add_record(vec!["1".into(), "A".into()]).unwrap();

        let err = table.add_record(vec!["2".into()]).unwrap_err();
        assert!(matches!(
            err,
            Error::RecordLength {
                expected: 2,
                got: 1
            }
        ));
        assert!(table
            .add_record(vec!["3".into(), "B".into(), "x".into()])
            .is_err());
        assert_eq!(table.record_count(), 1);
    }

    #[test]
    fn test_redefined_field_keeps_position() {
        let mut table = customers();
        assert!(table.add_field(FieldDef::new("ID", "N", 6, 0)));

        assert_eq!(table.field_count(), 2);
        assert_eq!(table.field_index("ID"), Some(0));
        assert_eq!(table.field("ID").unwrap().width, 6);
    }

    #[test]
    fn test_field_added_after_records_reads_empty() {
        let mut table = customers();
        table.add_record(vec!["1001".into(), "ALICE".into()]).unwrap();
        table.add_field(FieldDef::new("CITY", "C", 8, 0));

        let record = &table.records()[0];
        assert_eq!(Table::value(record, 1), "ALICE");
        assert_eq!(Table::value(record, 2), "");

        // new records must match the grown catalog
        assert!(table.add_record(vec!["1002".into(), "BOB".into()]).is_err());
        table
            .add_record(vec!["1002".into(), "BOB".into(), "PARIS".into()])
            .unwrap();
    }
}
