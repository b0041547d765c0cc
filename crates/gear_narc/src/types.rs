//! Base types for structure of NARC file.
//!
//! None of these carry a byte order attribute; they are read and written with the
//! [`Endian`] decoded from the archive's byte order mark.

use binrw::{BinRead, BinWrite, Endian};
use gear_core::error::FormatError;

/// Magic at the start of every archive
pub const NARC_MAGIC: &[u8; 4] = b"NARC";

/// Magic of the file allocation table section
pub const FAT_MAGIC: &[u8; 4] = b"BTAF";

/// Magic of the name table section
pub const NAME_TABLE_MAGIC: &[u8; 4] = b"BTNF";

/// Magic of the file image section
pub const IMAGE_MAGIC: &[u8; 4] = b"GMIF";

/// Value of the byte order mark, stored in the archive's own byte order
pub const BYTE_ORDER_MARK: u16 = 0xFFFE;

/// Required value of [`NarcHeader::header_length`]
pub const HEADER_LENGTH: u16 = 0x10;

/// Required value of [`NarcHeader::section_count`]
pub const SECTION_COUNT: u16 = 3;

/// Alignment of the name table end and of every file in the image
pub const ALIGNMENT: u64 = 128;

/// Folder entries carry this byte after their id
pub const FOLDER_ENTRY_CONSTANT: u8 = 0xF0;

/// Header blob written for archives created from scratch
pub const DEFAULT_BFNT_UNKNOWN: [u8; 4] = [0x00, 0x00, 0x01, 0x00];

/// Version written for archives created from scratch
pub const DEFAULT_VERSION: u16 = 0x0100;

/// Decode the raw byte order mark bytes
pub fn byte_order_from_mark(mark: [u8; 2]) -> Option<Endian> {
    match mark {
        [0xFE, 0xFF] => Some(Endian::Little),
        [0xFF, 0xFE] => Some(Endian::Big),
        _ => None,
    }
}

/// NARC file header
///
/// The fields following the magic and byte order mark.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
pub struct NarcHeader {
    /// Format version
    pub version: u16,

    /// Size of the whole archive, ignored when reading
    pub total_length: u32,

    /// Size of the header, always [`HEADER_LENGTH`]
    pub header_length: u16,

    /// Number of sections, always [`SECTION_COUNT`]
    pub section_count: u16,
}

impl NarcHeader {
    /// Check the structural constants, `offset` being where the archive starts.
    pub fn validate(&self, offset: u64) -> Result<(), FormatError> {
        if self.header_length != HEADER_LENGTH {
            return Err(FormatError::UnexpectedValue {
                field: "header length",
                offset: offset + 0x0C,
                expected: HEADER_LENGTH.into(),
                found: self.header_length.into(),
            });
        }

        if self.section_count != SECTION_COUNT {
            return Err(FormatError::UnexpectedValue {
                field: "section count",
                offset: offset + 0x0E,
                expected: SECTION_COUNT.into(),
                found: self.section_count.into(),
            });
        }

        Ok(())
    }
}

/// Fields following the BTAF magic
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
pub struct FatHeader {
    /// Distance from the BTAF magic to the BTNF magic
    pub length: u32,

    /// Number of files in the archive
    pub file_count: u32,
}

/// A single BTAF entry
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
pub struct FatEntry {
    /// Start of the file, relative to the start of the image data
    pub offset: u32,

    /// End of the file (exclusive), relative to the start of the image data
    pub end: u32,
}
