//! Base types for structure of SARC file.
//!
//! The byte order mark sits in the middle of the header, so the header is parsed by
//! hand and everything after it goes through `binrw` with the decoded [`Endian`].

use std::io::{Read, Seek, Write};

use binrw::{BinRead, BinWrite, BinWriterExt, Endian};
use gear_core::error::FormatError;
use gear_core::io::{expect_magic, read_array, read_range};
use indexmap::IndexMap;
use tracing::trace;

use crate::error::Result;
use crate::hash::HASH_MULTIPLIER;

/// Magic at the start of every archive
pub const SARC_MAGIC: &[u8; 4] = b"SARC";

/// Magic found at the start of some older archives
pub const LEGACY_MAGIC: &[u8; 4] = b"CRAS";

/// Magic of the hash table section
pub const SFAT_MAGIC: &[u8; 4] = b"SFAT";

/// Magic of the name table section
pub const SFNT_MAGIC: &[u8; 4] = b"SFNT";

/// Value of the byte order mark, stored in the archive's own byte order
pub const BYTE_ORDER_MARK: u16 = 0xFEFF;

/// Required value of [`SarcHeader::chunk_length`]
pub const HEADER_LENGTH: u16 = 0x14;

/// Value of [`SfatHeader::chunk_length`] written by this crate
pub const SFAT_HEADER_LENGTH: u16 = 0x0C;

/// Value of [`SfntHeader::chunk_length`] written by this crate
pub const SFNT_HEADER_LENGTH: u16 = 0x08;

/// Version written for archives created from scratch
pub const DEFAULT_VERSION: u16 = 0x0100;

/// Alignment of the data region
pub const DATA_ALIGNMENT: u64 = 0x1000;

/// Alignment of every name in the name table
pub const NAME_ALIGNMENT: u64 = 4;

/// Attribute bit set on nodes that have a name
pub const NAMED_FLAG: u32 = 0x0100_0000;

/// Decode the raw byte order mark bytes
pub fn byte_order_from_mark(mark: [u8; 2]) -> Option<Endian> {
    match mark {
        [0xFE, 0xFF] => Some(Endian::Big),
        [0xFF, 0xFE] => Some(Endian::Little),
        _ => None,
    }
}

/// SARC file header
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SarcHeader {
    /// Either [`SARC_MAGIC`] or [`LEGACY_MAGIC`]
    pub magic: [u8; 4],

    /// Size of the header, always [`HEADER_LENGTH`]
    pub chunk_length: u16,

    /// Byte order decoded from the byte order mark
    pub byte_order: Endian,

    /// Size of the whole archive
    pub total_length: u32,

    /// Start of the data region, relative to the start of the archive
    pub data_offset: u32,

    /// Format version
    pub version: u16,

    /// Reserved half of the last word
    pub reserved: u16,
}

/// Header fields following the byte order mark
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
struct HeaderTail {
    total_length: u32,
    data_offset: u32,
    version: u16,
    reserved: u16,
}

impl Default for SarcHeader {
    fn default() -> Self {
        Self {
            magic: *SARC_MAGIC,
            chunk_length: HEADER_LENGTH,
            byte_order: Endian::Little,
            total_length: 0,
            data_offset: 0,
            version: DEFAULT_VERSION,
            reserved: 0,
        }
    }
}

impl SarcHeader {
    /// Read the header, `reader` being positioned at the magic.
    pub fn parse<R: Read + Seek>(reader: &mut R) -> Result<SarcHeader> {
        let offset = reader.stream_position()?;

        let magic: [u8; 4] = read_array(reader)?;
        if &magic != SARC_MAGIC && &magic != LEGACY_MAGIC {
            return Err(FormatError::BadMagic {
                offset,
                expected: "SARC or CRAS".into(),
                found: String::from_utf8_lossy(&magic).into_owned(),
            }
            .into());
        }

        let chunk_length_raw: [u8; 2] = read_array(reader)?;
        let mark: [u8; 2] = read_array(reader)?;
        let byte_order = byte_order_from_mark(mark).ok_or(FormatError::InvalidByteOrderMark {
            offset: offset + 6,
            found: mark,
        })?;

        let chunk_length = match byte_order {
            Endian::Big => u16::from_be_bytes(chunk_length_raw),
            Endian::Little => u16::from_le_bytes(chunk_length_raw),
        };
        if chunk_length != HEADER_LENGTH {
            return Err(FormatError::UnexpectedValue {
                field: "header length",
                offset: offset + 4,
                expected: HEADER_LENGTH.into(),
                found: chunk_length.into(),
            }
            .into());
        }

        let tail = HeaderTail::read_options(reader, byte_order, ())?;

        Ok(SarcHeader {
            magic,
            chunk_length,
            byte_order,
            total_length: tail.total_length,
            data_offset: tail.data_offset,
            version: tail.version,
            reserved: tail.reserved,
        })
    }

    /// Write the header in its own byte order
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.magic)?;
        writer.write_type(&self.chunk_length, self.byte_order)?;
        writer.write_type(&BYTE_ORDER_MARK, self.byte_order)?;
        HeaderTail {
            total_length: self.total_length,
            data_offset: self.data_offset,
            version: self.version,
            reserved: self.reserved,
        }
        .write_options(writer, self.byte_order, ())?;
        Ok(())
    }
}

/// Fields following the SFAT magic
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
pub struct SfatHeader {
    /// Size of the section header
    pub chunk_length: u16,

    /// Number of nodes following the header
    pub node_count: u16,

    /// Multiplier of the name hash
    pub hash_multiplier: u32,
}

impl SfatHeader {
    /// Check the magic and read the fields after it
    pub fn parse<R: Read + Seek>(reader: &mut R, byte_order: Endian) -> Result<SfatHeader> {
        expect_magic(reader, SFAT_MAGIC)?;
        let header = SfatHeader::read_options(reader, byte_order, ())?;
        if header.hash_multiplier != HASH_MULTIPLIER {
            trace!(multiplier = header.hash_multiplier, "unusual hash multiplier");
        }
        Ok(header)
    }
}

/// A single SFAT node
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
pub struct SfatNode {
    /// Hash of the file name
    pub hash: u32,

    /// Packed "has name" flag, unknown byte and name offset
    pub attributes: u32,

    /// Start of the file, relative to the data offset
    pub data_start: u32,

    /// End of the file (exclusive), relative to the data offset
    pub data_end: u32,
}

impl SfatNode {
    /// Whether the node points at a name in the name table
    pub fn is_file(&self) -> bool {
        self.attributes >> 24 != 0
    }

    /// The byte between the flag and the name offset
    pub fn unknown(&self) -> u8 {
        (self.attributes >> 16) as u8
    }

    /// Offset of the name in the name table, in units of four bytes
    pub fn name_offset(&self) -> u16 {
        self.attributes as u16
    }
}

/// Fields following the SFNT magic
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
pub struct SfntHeader {
    /// Size of the section header
    pub chunk_length: u16,

    /// Always zero
    pub reserved: u16,
}

/// The decoded name table
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SfntTable {
    /// Names keyed by their byte offset from the start of the table
    pub names: IndexMap<u64, String>,
}

impl SfntTable {
    /// Check the magic, then read every name up to the absolute `end`.
    ///
    /// Blank names, including the runs of padding between entries, are dropped.
    pub fn parse<R: Read + Seek>(reader: &mut R, byte_order: Endian, end: u64) -> Result<SfntTable> {
        let section_offset = reader.stream_position()?;
        expect_magic(reader, SFNT_MAGIC)?;
        SfntHeader::read_options(reader, byte_order, ())?;

        let start = reader.stream_position()?;
        if end < start {
            return Err(FormatError::InvertedRange {
                what: "name table",
                offset: section_offset,
                start,
                end,
            }
            .into());
        }
        let raw = read_range(reader, "name table", start, end - start)?;

        let mut names = IndexMap::new();
        let mut name_start = 0;
        for part in raw.split(|&b| b == 0) {
            let name = String::from_utf8_lossy(part);
            if !name.trim().is_empty() {
                names.insert(name_start as u64, name.into_owned());
            }
            name_start += part.len() + 1;
        }

        Ok(SfntTable { names })
    }

    /// The name starting `offset` bytes into the table
    pub fn get(&self, offset: u64) -> Option<&str> {
        self.names.get(&offset).map(String::as_str)
    }
}
