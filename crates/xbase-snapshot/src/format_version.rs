//! Snapshot file format versions
//!
//! The binary encoding starts with a fixed header:
//! `magic (u32 BE) | version (u16 BE) | crc32 of payload (u32 BE)`,
//! followed by the bincode payload. JSON snapshots carry no header.

/// Binary snapshot format version
pub const SNAPSHOT_FORMAT_VERSION: u16 = 1;

/// Magic numbers for file validation
pub mod magic {
    /// Binary snapshot magic: "XBSN" (XBase SNapshot)
    pub const SNAPSHOT: u32 = 0x5842534E;
}

/// Length of the binary snapshot header in bytes
pub const HEADER_LEN: usize = 4 + 2 + 4;

/// Version compatibility information
pub struct FormatVersion {
    /// Current version of this format
    pub current: u16,
    /// Minimum supported version for reading
    pub min_read: u16,
}

impl FormatVersion {
    /// Check if a version can be read
    pub fn can_read(&self, version: u16) -> bool {
        version >= self.min_read && version <= self.current
    }
}

/// Binary snapshot format version info
pub fn snapshot_version() -> FormatVersion {
    FormatVersion {
        current: SNAPSHOT_FORMAT_VERSION,
        min_read: 1,
    }
}

/// Header fields of a binary snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format version the file was written with
    pub version: u16,
    /// CRC32 of the payload
    pub checksum: u32,
}

impl Header {
    /// Encodes the header for the current format version.
    pub fn encode(checksum: u32) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&magic::SNAPSHOT.to_be_bytes());
        buf[4..6].copy_from_slice(&SNAPSHOT_FORMAT_VERSION.to_be_bytes());
        buf[6..10].copy_from_slice(&checksum.to_be_bytes());
        buf
    }

    /// Decodes a header, returning `None` when the magic does not match or
    /// the input is too short.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_LEN {
            return None;
        }
        let magic = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != magic::SNAPSHOT {
            return None;
        }
        Some(Self {
            version: u16::from_be_bytes([bytes[4], bytes[5]]),
            checksum: u32::from_be_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]),
        })
    }
}
