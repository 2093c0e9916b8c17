//! Serializable images of a database.
//!
//! The JSON form is:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "name": "CUSTOMERS",
//!       "fields": { "ID": { "name": "ID", "type": "C", "width": 4, "decimals": 0 } },
//!       "records": [["1001"]],
//!       "current_record": 0
//!     }
//!   ],
//!   "relations": [["ORDERS", "ID", "CUSTOMERS"]]
//! }
//! ```
//!
//! `fields` is an object keyed by field name whose entry order is the field
//! order, so it is (de)serialized through [`field_map`] rather than a map
//! type that would reorder it.

use serde::{Deserialize, Serialize};
use xbase_core::{Database, FieldDef, Relation, RelationSet, Table};

/// Whole-database image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseImage {
    /// Tables in creation order
    pub tables: Vec<TableImage>,
    /// `(source table, source field, target table)` in declaration order
    pub relations: Vec<(String, String, String)>,
}

/// One table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableImage {
    /// Table name
    pub name: String,
    /// Field catalog in declaration order
    #[serde(with = "field_map")]
    pub fields: Vec<FieldImage>,
    /// Raw record values
    pub records: Vec<Vec<String>>,
    /// Cursor position
    pub current_record: usize,
}

/// One field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldImage {
    /// Field name
    pub name: String,
    /// Type tag
    #[serde(rename = "type")]
    pub field_type: String,
    /// Display width
    pub width: usize,
    /// Decimal places
    #[serde(default)]
    pub decimals: usize,
}

impl From<&FieldDef> for FieldImage {
    fn from(field: &FieldDef) -> Self {
        Self {
            name: field.name.clone(),
            field_type: field.field_type.clone(),
            width: field.width,
            decimals: field.decimals,
        }
    }
}

impl From<FieldImage> for FieldDef {
    fn from(image: FieldImage) -> Self {
        FieldDef::new(image.name, image.field_type, image.width, image.decimals)
    }
}

impl From<&Table> for TableImage {
    fn from(table: &Table) -> Self {
        Self {
            name: table.name().to_string(),
            fields: table.fields().iter().map(FieldImage::from).collect(),
            records: table.records().to_vec(),
            current_record: table.cursor(),
        }
    }
}

impl From<TableImage> for Table {
    fn from(image: TableImage) -> Self {
        Table::from_parts(
            image.name,
            image.fields.into_iter().map(FieldDef::from).collect(),
            image.records,
            image.current_record,
        )
    }
}

impl From<&Database> for DatabaseImage {
    fn from(db: &Database) -> Self {
        Self {
            tables: db.tables().iter().map(TableImage::from).collect(),
            relations: db
                .relations()
                .iter()
                .map(|r| {
                    (
                        r.source_table.clone(),
                        r.source_field.clone(),
                        r.target_table.clone(),
                    )
                })
                .collect(),
        }
    }
}

impl From<DatabaseImage> for Database {
    fn from(image: DatabaseImage) -> Self {
        let tables = image.tables.into_iter().map(Table::from).collect();
        let relations: RelationSet = image
            .relations
            .into_iter()
            .map(|(source, field, target)| Relation::new(source, field, target))
            .collect();
        Database::from_parts(tables, relations)
    }
}

/// Ordered `name -> FieldImage` object encoding for a field list.
pub mod field_map {
    use super::FieldImage;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    /// Writes the fields as a map keyed by name, in list order.
    pub fn serialize<S>(fields: &[FieldImage], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for field in fields {
            map.serialize_entry(&field.name, field)?;
        }
        map.end()
    }

    /// Reads a map of fields, keeping entry order.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<FieldImage>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FieldMapVisitor)
    }

    struct FieldMapVisitor;

    impl<'de> Visitor<'de> for FieldMapVisitor {
        type Value = Vec<FieldImage>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a map of field name to field definition")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut fields: Vec<FieldImage> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((_name, field)) = access.next_entry::<String, FieldImage>()? {
                match fields.iter_mut().find(|f| f.name == field.name) {
                    Some(existing) => *existing = field,
                    None => fields.push(field),
                }
            }
            Ok(fields)
        }
    }
}
