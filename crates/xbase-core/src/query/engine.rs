//! LIST execution
//!
//! Resolves the row range, the projection (own fields, explicit
//! `TABLE.FIELD` names and every field of every related table), applies the
//! filter per record and advances the selected table's cursor.

use super::filter::{Filter, RecordBindings};
use super::options::ListOptions;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::field::FieldDef;
use crate::relation::Relation;
use crate::table::{Record, Table};
use crate::validation::validate_filter;

/// Column of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header label: the field name, or `TABLE.FIELD` for related fields
    pub label: String,
    /// Display width taken from the field definition
    pub width: usize,
}

/// One emitted record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedRow {
    /// 1-based position in the table
    pub number: usize,
    /// Values in column order, not yet fitted to width
    pub values: Vec<String>,
}

/// Result of a record LIST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub columns: Vec<Column>,
    pub rows: Vec<ListedRow>,
    /// Whether rows carry their record number
    pub show_record_numbers: bool,
}

/// Field catalog of a table, as listed by `LIST STRUCTURE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub table: String,
    pub fields: Vec<FieldDef>,
}

/// What a LIST command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutput {
    Records(Listing),
    Structure(Structure),
}

/// Where a projected column reads its value from
enum Source<'a> {
    Own(usize),
    Related {
        relation: &'a Relation,
        target: &'a Table,
        field_idx: usize,
    },
}

struct Projection<'a> {
    columns: Vec<Column>,
    sources: Vec<Source<'a>>,
}

impl<'a> Projection<'a> {
    fn push(&mut self, label: String, width: usize, source: Source<'a>) {
        self.columns.push(Column { label, width });
        self.sources.push(source);
    }
}

enum RowFilter {
    Everything,
    Matching(Filter),
    Nothing,
}

impl RowFilter {
    fn compile(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return RowFilter::Everything;
        };
        if let Err(e) = validate_filter(text) {
            tracing::debug!("filter rejected, no record matches: {}", e);
            return RowFilter::Nothing;
        }
        match Filter::parse(text) {
            Ok(filter) => RowFilter::Matching(filter),
            Err(e) => {
                tracing::debug!("filter {:?} does not parse, no record matches: {}", text, e);
                RowFilter::Nothing
            }
        }
    }

    fn accepts(&self, table: &Table, record: &Record, number: usize) -> bool {
        match self {
            RowFilter::Everything => true,
            RowFilter::Nothing => false,
            RowFilter::Matching(filter) => {
                match filter.matches(&RecordBindings::new(table, record)) {
                    Ok(matched) => matched,
                    Err(e) => {
                        tracing::debug!("filter fault on record {}: {}", number, e);
                        false
                    }
                }
            }
        }
    }
}

impl Database {
    /// Runs a LIST against the selected table.
    ///
    /// For record listings the cursor is moved to the end of the requested
    /// range, even when that is past the last record or the filter
    /// rejected every row. `STRUCTURE` leaves the cursor alone.
    ///
    /// # Errors
    ///
    /// Error::NoTableSelected, or Error::FieldNotFound / Error::TableNotFound
    /// for an unknown projected field. The cursor is unchanged on error.
    pub fn list(&mut self, options: &ListOptions) -> Result<ListOutput> {
        let table = self.selected()?;

        if options.structure {
            return Ok(ListOutput::Structure(Structure {
                table: table.name().to_string(),
                fields: table.fields().to_vec(),
            }));
        }

        let (start, end) = options.bounds(table.cursor(), table.record_count());
        let projection = self.projection(table, options.fields.as_deref())?;
        let filter = RowFilter::compile(options.filter.as_deref());

        let stop = end.min(table.record_count());
        let mut rows = Vec::new();
        for (idx, record) in table.records().iter().enumerate().take(stop).skip(start) {
            let number = idx + 1;
            if !filter.accepts(table, record, number) {
                continue;
            }
            let values = projection
                .sources
                .iter()
                .map(|source| resolve_value(table, record, source).to_string())
                .collect();
            rows.push(ListedRow { number, values });
        }

        tracing::debug!(
            "LIST {} [{}, {}) emitted {} rows",
            table.name(),
            start,
            end,
            rows.len()
        );

        let listing = Listing {
            columns: projection.columns,
            rows,
            show_record_numbers: self.show_record_numbers(),
        };
        let name = table.name().to_string();
        self.set_cursor(&name, end);
        Ok(ListOutput::Records(listing))
    }

    fn projection<'a>(
        &'a self,
        table: &'a Table,
        requested: Option<&[String]>,
    ) -> Result<Projection<'a>> {
        let mut projection = Projection {
            columns: Vec::new(),
            sources: Vec::new(),
        };

        match requested {
            Some(names) => {
                for name in names {
                    let (label, width, source) = self.resolve_column(table, name)?;
                    projection.push(label, width, source);
                }
            }
            None => {
                for (idx, field) in table.fields().iter().enumerate() {
                    projection.push(field.name.clone(), field.width, Source::Own(idx));
                }
            }
        }

        for relation in self.relations().from_table(table.name()) {
            let Some(target) = self.table(&relation.target_table) else {
                tracing::warn!("skipping relation {}: target table is missing", relation);
                continue;
            };
            // resolution always goes through the first declared relation
            let Some(first) = self.relations().resolve(table.name(), target.name()) else {
                continue;
            };
            for (field_idx, field) in target.fields().iter().enumerate() {
                projection.push(
                    format!("{}.{}", target.name(), field.name),
                    field.width,
                    Source::Related {
                        relation: first,
                        target,
                        field_idx,
                    },
                );
            }
        }

        Ok(projection)
    }

    fn resolve_column<'a>(
        &'a self,
        table: &'a Table,
        name: &str,
    ) -> Result<(String, usize, Source<'a>)> {
        let own = |field: &str| {
            table
                .field_index(field)
                .map(|idx| (field.to_string(), table.fields()[idx].width, Source::Own(idx)))
                .ok_or_else(|| Error::FieldNotFound {
                    table: table.name().to_string(),
                    field: field.to_string(),
                })
        };

        let Some((target_name, field)) = name.split_once('.') else {
            return own(name);
        };
        if target_name == table.name() {
            return own(field);
        }

        let target = self
            .table(target_name)
            .ok_or_else(|| Error::TableNotFound(target_name.to_string()))?;
        let relation = self
            .relations()
            .resolve(table.name(), target.name())
            .ok_or_else(|| Error::FieldNotFound {
                table: table.name().to_string(),
                field: name.to_string(),
            })?;
        let field_idx = target
            .field_index(field)
            .ok_or_else(|| Error::FieldNotFound {
                table: target.name().to_string(),
                field: field.to_string(),
            })?;

        Ok((
            format!("{}.{}", target.name(), field),
            target.fields()[field_idx].width,
            Source::Related {
                relation,
                target,
                field_idx,
            },
        ))
    }
}

fn resolve_value<'a>(table: &Table, record: &'a Record, source: &Source<'a>) -> &'a str {
    match source {
        Source::Own(idx) => Table::value(record, *idx),
        Source::Related {
            relation,
            target,
            field_idx,
        } => {
            let key = table
                .field_index(&relation.source_field)
                .map(|idx| Table::value(record, idx))
                .unwrap_or("");
            let Some(key_idx) = target.field_index(&relation.source_field) else {
                return "";
            };
            target
                .records()
                .iter()
                .find(|candidate| Table::value(candidate, key_idx) == key)
                .map(|found| Table::value(found, *field_idx))
                .unwrap_or("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vals: &[&str]) -> Record {
        vals.iter().map(|v| v.to_string()).collect()
    }

    fn customers() -> Database {
        let mut db = Database::new();
        db.use_table("CUSTOMERS").unwrap();
        db.add_field("ID", "C", 4, 0).unwrap();
        db.add_field("NAME", "C", 10, 0).unwrap();
        db.add_record(record(&["1001", "ALICE"])).unwrap();
        db.add_record(record(&["1002", "BOB"])).unwrap();
        db.add_record(record(&["1003", "CAROL"])).unwrap();
        db
    }

    fn with_orders() -> Database {
        let mut db = customers();
        db.use_table("ORDERS").unwrap();
        db.add_field("OID", "C", 3, 0).unwrap();
        db.add_field("ID", "C", 4, 0).unwrap();
        db.add_record(record(&["1", "1001"])).unwrap();
        db.add_record(record(&["2", "9999"])).unwrap();
        db.set_relation("ID", "CUSTOMERS").unwrap();
        db
    }

    fn records(output: ListOutput) -> Listing {
        match output {
            ListOutput::Records(listing) => listing,
            ListOutput::Structure(s) => panic!("expected records, got structure of {}", s.table),
        }
    }

    fn cursor(db: &Database) -> usize {
        db.selected().unwrap().cursor()
    }

    #[test]
    fn test_list_requires_selection() {
        let mut db = Database::new();
        assert!(matches!(
            db.list(&ListOptions::new()),
            Err(Error::NoTableSelected)
        ));
    }

    #[test]
    fn test_list_all_moves_cursor_to_end() {
        let mut db = customers();
        let listing = records(db.list(&ListOptions::new().all()).unwrap());

        assert_eq!(listing.rows.len(), 3);
        assert_eq!(listing.rows[0].values, vec!["1001", "ALICE"]);
        assert_eq!(listing.rows[2].number, 3);
        assert_eq!(cursor(&db), 3);

        // sequential LIST resumes at the cursor
        let listing = records(db.list(&ListOptions::new()).unwrap());
        assert!(listing.rows.is_empty());
    }

    #[test]
    fn test_next_advances_past_record_count() {
        let mut db = customers();
        let listing = records(db.list(&ListOptions::new().next(2)).unwrap());
        assert_eq!(listing.rows.len(), 2);
        assert_eq!(cursor(&db), 2);

        let listing = records(db.list(&ListOptions::new().next(5)).unwrap());
        assert_eq!(listing.rows.len(), 1);
        assert_eq!(listing.rows[0].number, 3);
        assert_eq!(cursor(&db), 7);

        let listing = records(db.list(&ListOptions::new().all().next(1)).unwrap());
        assert_eq!(listing.rows[0].values[0], "1001");
        assert_eq!(cursor(&db), 1);
    }

    #[test]
    fn test_filter_matches_and_misses() {
        let mut db = customers();
        let listing = records(
            db.list(&ListOptions::new().all().filter("ID == \"1001\""))
                .unwrap(),
        );
        assert_eq!(listing.rows.len(), 1);
        assert_eq!(listing.rows[0].values[1], "ALICE");

        let listing = records(
            db.list(&ListOptions::new().all().filter("ID == \"9999\""))
                .unwrap(),
        );
        assert!(listing.rows.is_empty());
        assert_eq!(cursor(&db), 3);
    }

    #[test]
    fn test_broken_filter_matches_nothing() {
        let mut db = customers();
        for text in ["ID ==", "NOPE == 1", "NAME > 3", "__import__('os')"] {
            let listing = records(db.list(&ListOptions::new().all().filter(text)).unwrap());
            assert!(listing.rows.is_empty(), "{} should match nothing", text);
        }
        assert_eq!(cursor(&db), 3);
    }

    #[test]
    fn test_projection() {
        let mut db = customers();
        let listing = records(db.list(&ListOptions::new().all().fields(["name"])).unwrap());
        assert_eq!(
            listing.columns,
            vec![Column {
                label: "NAME".to_string(),
                width: 10
            }]
        );
        assert_eq!(listing.rows[1].values, vec!["BOB"]);

        let err = db
            .list(&ListOptions::new().all().fields(["CITY"]))
            .unwrap_err();
        assert!(matches!(err, Error::FieldNotFound { .. }));
    }

    #[test]
    fn test_unknown_field_leaves_cursor() {
        let mut db = customers();
        db.list(&ListOptions::new().next(1)).unwrap();
        assert!(db.list(&ListOptions::new().fields(["NOPE"])).is_err());
        assert_eq!(cursor(&db), 1);
    }

    #[test]
    fn test_related_fields_resolve_by_key() {
        let mut db = with_orders();
        let listing = records(db.list(&ListOptions::new().all()).unwrap());

        let labels: Vec<_> = listing.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["OID", "ID", "CUSTOMERS.ID", "CUSTOMERS.NAME"]
        );
        assert_eq!(listing.rows[0].values, vec!["1", "1001", "1001", "ALICE"]);
        // no matching customer
        assert_eq!(listing.rows[1].values, vec!["2", "9999", "", ""]);
    }

    #[test]
    fn test_explicit_related_field() {
        let mut db = with_orders();
        let listing = records(
            db.list(&ListOptions::new().all().fields(["OID", "customers.name"]))
                .unwrap(),
        );
        let labels: Vec<_> = listing.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["OID", "CUSTOMERS.NAME", "CUSTOMERS.ID", "CUSTOMERS.NAME"]
        );
        assert_eq!(listing.rows[0].values, vec!["1", "ALICE", "1001", "ALICE"]);

        assert!(matches!(
            db.list(&ListOptions::new().fields(["NOWHERE.X"])),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            db.list(&ListOptions::new().fields(["CUSTOMERS.CITY"])),
            Err(Error::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_requested_fields_keep_duplicates() {
        let mut db = with_orders();
        let listing = records(db.list(&ListOptions::new().all().fields(["ID", "ID"])).unwrap());
        let labels: Vec<_> = listing.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["ID", "ID", "CUSTOMERS.ID", "CUSTOMERS.NAME"]);
        assert_eq!(listing.rows[0].values, vec!["1001", "1001", "1001", "ALICE"]);
    }

    #[test]
    fn test_every_relation_adds_its_target_fields() {
        let mut db = with_orders();
        db.set_relation("ID", "CUSTOMERS").unwrap();

        let listing = records(db.list(&ListOptions::new().all()).unwrap());
        let labels: Vec<_> = listing.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "OID",
                "ID",
                "CUSTOMERS.ID",
                "CUSTOMERS.NAME",
                "CUSTOMERS.ID",
                "CUSTOMERS.NAME"
            ]
        );
        assert_eq!(
            listing.rows[0].values,
            vec!["1", "1001", "1001", "ALICE", "1001", "ALICE"]
        );
    }

    #[test]
    fn test_long_operator_chain_matches_nothing() {
        let mut db = customers();
        let chain = format!("{}ID == '1'", "ID+".repeat(20_000));
        let listing = records(db.list(&ListOptions::new().all().filter(chain)).unwrap());
        assert!(listing.rows.is_empty());
        assert_eq!(cursor(&db), 3);
    }

    #[test]
    fn test_target_without_key_field_yields_empty() {
        let mut db = with_orders();
        db.use_table("NOTES").unwrap();
        db.add_field("TEXT", "C", 8, 0).unwrap();
        db.add_record(record(&["hello"])).unwrap();
        db.use_table("ORDERS").unwrap();
        db.set_relation("OID", "NOTES").unwrap();

        let listing = records(db.list(&ListOptions::new().all().next(1)).unwrap());
        assert_eq!(listing.columns.last().unwrap().label, "NOTES.TEXT");
        assert_eq!(listing.rows[0].values.last().unwrap(), "");
    }

    #[test]
    fn test_filter_sees_own_fields_only() {
        let mut db = with_orders();
        let listing = records(
            db.list(&ListOptions::new().all().filter("ID == '1001'"))
                .unwrap(),
        );
        assert_eq!(listing.rows.len(), 1);

        let listing = records(
            db.list(&ListOptions::new().all().filter("CUSTOMERS.NAME == 'ALICE'"))
                .unwrap(),
        );
        assert!(listing.rows.is_empty());
    }

    #[test]
    fn test_structure_keeps_cursor() {
        let mut db = customers();
        db.list(&ListOptions::new().next(2)).unwrap();

        match db.list(&ListOptions::new().structure()).unwrap() {
            ListOutput::Structure(structure) => {
                assert_eq!(structure.table, "CUSTOMERS");
                assert_eq!(structure.fields.len(), 2);
            }
            ListOutput::Records(_) => panic!("expected structure"),
        }
        assert_eq!(cursor(&db), 2);
    }

    #[test]
    fn test_field_added_after_records() {
        let mut db = customers();
        db.add_field("CITY", "C", 6, 0).unwrap();
        db.add_record(record(&["1004", "DAN", "PARIS"])).unwrap();

        let listing = records(db.list(&ListOptions::new().all()).unwrap());
        assert_eq!(listing.rows[0].values, vec!["1001", "ALICE", ""]);
        assert_eq!(listing.rows[3].values, vec!["1004", "DAN", "PARIS"]);
    }
}
