//! Error types for xbase.

use std::fmt;

/// The main error type for xbase operations.
///
/// The `Display` text of each variant is the status line the interpreter
/// prints, so the variants double as user-facing messages.
#[derive(Debug)]
pub enum Error {
    /// A command needs a selected table and none is in use
    NoTableSelected,

    /// `CREATE` of a name that is already taken
    TableExists(String),

    /// Table lookup failed
    TableNotFound(String),

    /// Field lookup failed in the named table
    FieldNotFound {
        /// Table that was searched
        table: String,
        /// Field that was requested
        field: String,
    },

    /// Record value count differs from the table's field count
    RecordLength {
        /// Number of fields in the table
        expected: usize,
        /// Number of values supplied
        got: usize,
    },

    /// Malformed name, width or other argument
    InvalidArgument(String),

    /// I/O error
    Io(std::io::Error),

    /// Serialization/deserialization error
    Serialization(String),

    /// Snapshot checksum or framing mismatch
    Corruption(String),

    /// Snapshot written by a newer format version
    UnsupportedVersion(u16),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoTableSelected => write!(f, "No table in use. Use the USE command first."),
            Error::TableExists(name) => write!(f, "Table {} already exists.", name),
            Error::TableNotFound(name) => write!(f, "Table {} does not exist.", name),
            Error::FieldNotFound { table, field } => {
                write!(f, "Field {} does not exist in table {}.", field, table)
            }
            Error::RecordLength { expected, got } => write!(
                f,
                "Invalid number of values. Expected {}, got {}.",
                expected, got
            ),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::Corruption(msg) => write!(f, "Snapshot corrupted: {}", msg),
            Error::UnsupportedVersion(v) => {
                write!(f, "Unsupported snapshot format version {}", v)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// A specialized `Result` type for xbase operations.
pub type Result<T> = std::result::Result<T, Error>;
