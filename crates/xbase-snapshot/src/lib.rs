//! # xbase snapshot
//!
//! Whole-database snapshots for xbase.
//!
//! ## Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of xbase.** Users
//! should depend on the main `xbase` crate, which loads the snapshot at
//! startup and writes it on `SAVE` and `QUIT`.
//!
//! ---
//!
//! A snapshot is a single file holding every table (field catalog, records,
//! cursor) and every relation. Two encodings are supported:
//!
//! - **JSON** (default): pretty-printed, readable and compatible with the
//!   classic `database_state.json` layout
//! - **Binary**: a checked header (magic, format version, CRC32) followed
//!   by a bincode payload
//!
//! ## Usage
//!
//! ```no_run
//! use xbase_core::Database;
//! use xbase_snapshot::SnapshotStore;
//!
//! let store = SnapshotStore::new("database_state.json");
//! let mut db = store.load()?.unwrap_or_default();
//! db.use_table("customers")?;
//! store.save(&db)?;
//! # Ok::<(), xbase_core::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use xbase_core::{Database, Error, Result};

pub mod format_version;
pub mod image;

pub use image::{DatabaseImage, FieldImage, TableImage};

use format_version::{snapshot_version, Header, HEADER_LEN};

/// Default snapshot file name
pub const DEFAULT_SNAPSHOT_FILE: &str = "database_state.json";

/// Snapshot encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Header plus bincode payload
    Binary,
}

impl SnapshotFormat {
    /// Picks the format from a file extension: `.json` (or none) is JSON,
    /// anything else is binary.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            None => SnapshotFormat::Json,
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            Some(_) => SnapshotFormat::Binary,
        }
    }

    /// Parses a format name (`json` or `binary`/`bin`)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(SnapshotFormat::Json),
            "binary" | "bin" => Some(SnapshotFormat::Binary),
            _ => None,
        }
    }

    /// Encodes an image
    pub fn encode(self, image: &DatabaseImage) -> Result<Vec<u8>> {
        match self {
            SnapshotFormat::Json => {
                serde_json::to_vec_pretty(image).map_err(|e| Error::Serialization(e.to_string()))
            }
            SnapshotFormat::Binary => {
                let payload =
                    bincode::serialize(image).map_err(|e| Error::Serialization(e.to_string()))?;
                let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
                bytes.extend_from_slice(&Header::encode(crc32fast::hash(&payload)));
                bytes.extend_from_slice(&payload);
                Ok(bytes)
            }
        }
    }

    /// Decodes an image, verifying the header of binary snapshots.
    ///
    /// # Errors
    ///
    /// Error::Corruption for a bad header or checksum,
    /// Error::UnsupportedVersion for a newer format, Error::Serialization
    /// for a payload that does not decode.
    pub fn decode(self, bytes: &[u8]) -> Result<DatabaseImage> {
        match self {
            SnapshotFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))
            }
            SnapshotFormat::Binary => {
                let header = Header::decode(bytes)
                    .ok_or_else(|| Error::Corruption("missing snapshot header".into()))?;
                if !snapshot_version().can_read(header.version) {
                    return Err(Error::UnsupportedVersion(header.version));
                }

                let payload = &bytes[HEADER_LEN..];
                let checksum = crc32fast::hash(payload);
                if checksum != header.checksum {
                    return Err(Error::Corruption(format!(
                        "checksum mismatch: expected {:08x}, got {:08x}",
                        header.checksum, checksum
                    )));
                }

                bincode::deserialize(payload).map_err(|e| Error::Serialization(e.to_string()))
            }
        }
    }
}

/// Snapshot file location and encoding
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
    format: SnapshotFormat,
}

impl SnapshotStore {
    /// Store at `path`, format chosen from the extension
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = SnapshotFormat::from_path(&path);
        Self { path, format }
    }

    /// Store at `path` with an explicit format
    pub fn with_format(path: impl AsRef<Path>, format: SnapshotFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    /// Snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot encoding
    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Loads the database, or `None` when no snapshot file exists yet.
    pub fn load(&self) -> Result<Option<Database>> {
        if !self.path.exists() {
            tracing::debug!("no snapshot at {}", self.path.display());
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let image = self.format.decode(&bytes)?;
        tracing::info!(
            "loaded snapshot {} ({} tables, {} relations)",
            self.path.display(),
            image.tables.len(),
            image.relations.len()
        );
        Ok(Some(Database::from(image)))
    }

    /// Writes the whole database.
    ///
    /// An existing snapshot is copied to `<path>.bak` first and removed
    /// once the new file is written, so a failed write leaves the backup in
    /// place.
    pub fn save(&self, db: &Database) -> Result<()> {
        let image = DatabaseImage::from(db);
        let bytes = self.format.encode(&image)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let backup = self.backup_path();
        let had_previous = self.path.exists();
        if had_previous {
            fs::copy(&self.path, &backup)?;
        }

        fs::write(&self.path, &bytes)?;

        if had_previous {
            fs::remove_file(&backup)?;
        }

        tracing::info!(
            "saved snapshot {} ({} tables, {} bytes)",
            self.path.display(),
            image.tables.len(),
            bytes.len()
        );
        Ok(())
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_FILE)
    }
}
