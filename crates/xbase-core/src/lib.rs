//! # xbase core
//!
//! Tables of fixed-width text fields, relations between tables and the LIST
//! query engine of the xbase record manager.
//!
//! ```
//! use xbase_core::{Database, ListOptions};
//!
//! let mut db = Database::new();
//! db.use_table("customers").unwrap();
//! db.add_field("id", "C", 4, 0).unwrap();
//! db.add_field("name", "C", 10, 0).unwrap();
//! db.add_record(vec!["1001".into(), "ALICE".into()]).unwrap();
//!
//! let output = db.list(&ListOptions::parse("ALL FOR ID == \"1001\"")).unwrap();
//! assert_eq!(output.lines()[2], "1001 ALICE     ");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod database;
pub mod error;
pub mod field;
pub mod format;
pub mod query;
pub mod relation;
pub mod table;
pub mod validation;
pub mod words;

pub use database::{Database, UseOutcome};
pub use error::{Error, Result};
pub use field::FieldDef;
pub use query::{ListOptions, ListOutput, Listing, Structure};
pub use relation::{Relation, RelationSet};
pub use table::{Record, Table};
