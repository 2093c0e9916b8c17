//! # xbase
//!
//! A small record manager in the dBASE III+ tradition: tables of
//! fixed-width text fields, lookup relations between tables and a LIST
//! command with ranges, projections and filters.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xbase::{Config, Session};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new().with_snapshot_path("database_state.json");
//!     let mut session = Session::open(&config)?;
//!
//!     for line in [
//!         "USE CUSTOMERS",
//!         "ADD FIELD ID C 4",
//!         "ADD FIELD NAME C 10",
//!         "ADD RECORD 1001 ALICE",
//!         "LIST ALL FOR ID == \"1001\"",
//!     ] {
//!         for out in session.execute(line).lines {
//!             println!("{}", out);
//!         }
//!     }
//!
//!     session.save()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Working with the database directly
//!
//! ```rust
//! use xbase::{Database, ListOptions};
//!
//! let mut db = Database::new();
//! db.use_table("orders")?;
//! db.add_field("id", "C", 4, 0)?;
//! db.add_record(vec!["1001".into()])?;
//!
//! let output = db.list(&ListOptions::new().all())?;
//! assert_eq!(output.lines(), vec!["ID  ", "----", "1001"]);
//! # Ok::<(), xbase::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod config;
pub mod logging;
pub mod session;

// Re-export core types
pub use xbase_core::{
    Database, Error, FieldDef, ListOptions, ListOutput, Relation, Result, Table, UseOutcome,
};

// Snapshot components
pub use xbase_snapshot::{SnapshotFormat, SnapshotStore};

pub use command::{Command, CommandError};
pub use config::Config;
pub use logging::LogConfig;
pub use session::{Reply, Session};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
