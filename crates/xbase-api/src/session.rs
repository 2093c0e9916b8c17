//! Interpreter session: one database, one snapshot store, one command at a
//! time.

use crate::command::{self, Command};
use crate::config::Config;
use xbase_core::{Database, Result, UseOutcome};
use xbase_snapshot::SnapshotStore;

/// Output of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Lines to print, without trailing newlines
    pub lines: Vec<String>,
    /// Whether the session should end
    pub quit: bool,
}

impl Reply {
    fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            quit: false,
        }
    }

    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }
}

/// A running interpreter.
///
/// Owns the [`Database`]; every command goes through [`Session::execute`]
/// and failures are turned into reply lines, so a bad command never ends
/// the session.
#[derive(Debug)]
pub struct Session {
    db: Database,
    store: SnapshotStore,
    autosave: bool,
    loaded: bool,
}

impl Session {
    /// Session over an empty database; nothing is read from disk.
    pub fn new(config: &Config) -> Self {
        Self::with_database(Database::new(), config)
    }

    /// Session over an existing database
    pub fn with_database(db: Database, config: &Config) -> Self {
        Self {
            db,
            store: config.store(),
            autosave: config.autosave,
            loaded: false,
        }
    }

    /// Session over the configured snapshot, or an empty database when the
    /// snapshot file does not exist.
    ///
    /// # Errors
    ///
    /// Fails when the snapshot exists but cannot be read or decoded.
    pub fn open(config: &Config) -> Result<Self> {
        let store = config.store();
        let (db, loaded) = match store.load()? {
            Some(db) => (db, true),
            None => (Database::new(), false),
        };
        Ok(Self {
            db,
            store,
            autosave: config.autosave,
            loaded,
        })
    }

    /// Whether startup state came from a snapshot file
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// The database being worked on
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Where SAVE writes to
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Writes the snapshot.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.db)
    }

    /// Runs one input line.
    pub fn execute(&mut self, line: &str) -> Reply {
        match Command::parse(line) {
            Ok(None) => Reply::default(),
            Ok(Some(command)) => {
                tracing::debug!("executing {:?}", command);
                self.run(command).unwrap_or_else(|e| Reply::line(e.to_string()))
            }
            Err(e) => Reply::line(e.to_string()),
        }
    }

    /// Ends the session as QUIT does (used for end of input).
    pub fn shutdown(&mut self) -> Reply {
        self.quit()
    }

    fn run(&mut self, command: Command) -> Result<Reply> {
        let reply = match command {
            Command::Create(name) => {
                let name = self.db.create_table(&name)?;
                Reply::line(format!("Table {} created.", name))
            }
            Command::Use(name) => {
                let outcome = self.db.use_table(&name)?;
                let name = self.db.selected()?.name().to_string();
                match outcome {
                    UseOutcome::Opened => Reply::line(format!("Table {} is now in use.", name)),
                    UseOutcome::Created => Reply::lines(vec![
                        format!("Table {} does not exist. Creating it.", name),
                        format!("Table {} created.", name),
                    ]),
                }
            }
            Command::AddField {
                name,
                field_type,
                width,
                decimals,
            } => {
                // replies echo the names as typed
                self.db.add_field(&name, &field_type, width, decimals)?;
                let table = self.db.selected()?.name();
                Reply::line(format!("Field {} added to table {}.", name, table))
            }
            Command::AddRecord(values) => {
                self.db.add_record(values)?;
                Reply::line("Record added.")
            }
            Command::SetRecord(on) => {
                self.db.set_show_record_numbers(on);
                Reply::line(format!(
                    "Record numbers are now {}",
                    if on { "ON" } else { "OFF" }
                ))
            }
            Command::SetRelation { field, table } => {
                let source = self.db.set_relation(&field, &table)?.source_table.clone();
                Reply::line(format!("Relation set: {}.{} -> {}", source, field, table))
            }
            Command::List(options) => Reply::lines(self.db.list(&options)?.lines()),
            Command::Save => match self.save() {
                Ok(()) => Reply::line("Database state saved."),
                Err(e) => save_failed(e),
            },
            Command::Help(topic) => Reply::lines(command::help(topic.as_deref())),
            Command::Quit => self.quit(),
        };
        Ok(reply)
    }

    fn quit(&mut self) -> Reply {
        if !self.autosave {
            return Reply {
                lines: vec!["Goodbye!".to_string()],
                quit: true,
            };
        }

        match self.save() {
            Ok(()) => Reply {
                lines: vec!["Database state saved. Goodbye!".to_string()],
                quit: true,
            },
            Err(e) => save_failed(e),
        }
    }
}

fn save_failed(err: xbase_core::Error) -> Reply {
    tracing::warn!("saving snapshot failed: {}", err);
    Reply::line(format!("Failed to save database state: {}", err))
}
