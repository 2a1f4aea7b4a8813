//! ID3v2 header detection
//!
//! An ID3v2 tag starts with a 10-byte header:
//!
//! | offset | length | field                        |
//! |--------|--------|------------------------------|
//! | 0      | 3      | `ID3`                        |
//! | 3      | 1      | major version                |
//! | 4      | 1      | revision                     |
//! | 5      | 1      | flags                        |
//! | 6      | 4      | tag size, synchsafe encoded  |

use serde::Serialize;

const ID3_MAGIC: &[u8; 3] = b"ID3";
pub const ID3_HEADER_LEN: usize = 10;

/// Decode a 28-bit synchsafe integer (7 data bits per byte, big-endian)
pub fn decode_synchsafe(bytes: [u8; 4]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |sum, byte| (sum << 7) | u32::from(byte & 0x7F))
}

/// Fields of a parsed ID3v2 header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Id3Header {
    pub major_version: u8,
    pub revision: u8,
    pub flags: u8,
    /// Tag body size in bytes, excluding the header
    pub size: u32,
}

/// Outcome of looking for an ID3v2 tag at the start of the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Id3Detection {
    NotFound,
    Found(Id3Header),
    /// `ID3` magic present but the header is cut short
    Truncated,
}

impl Id3Detection {
    pub fn is_present(&self) -> bool {
        !matches!(self, Id3Detection::NotFound)
    }

    pub fn size(&self) -> Option<u32> {
        match self {
            Id3Detection::Found(header) => Some(header.size),
            _ => None,
        }
    }
}

/// Check for an ID3v2 tag at offset 0. The magic match is case-sensitive.
pub fn detect_id3(content: &[u8]) -> Id3Detection {
    if !content.starts_with(ID3_MAGIC) {
        return Id3Detection::NotFound;
    }

    let Some(header) = content.get(..ID3_HEADER_LEN) else {
        return Id3Detection::Truncated;
    };

    Id3Detection::Found(Id3Header {
        major_version: header[3],
        revision: header[4],
        flags: header[5],
        size: decode_synchsafe([header[6], header[7], header[8], header[9]]),
    })
}
