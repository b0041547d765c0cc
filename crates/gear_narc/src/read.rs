//! Types for reading NARC archives
//!

use binrw::BinRead;
use byteorder::ReadBytesExt;
use gear_core::error::FormatError;
use gear_core::io::{expect_magic, read_array, read_range, read_u32};
use gear_core::{SeekExt, Tree};
use std::io::{Read, Seek, SeekFrom};
use tracing::{debug, instrument, trace};

use crate::{
    archive::NarcArchive,
    error::Result,
    types::{
        byte_order_from_mark, FatEntry, FatHeader, NarcHeader, FAT_MAGIC, IMAGE_MAGIC,
        NAME_TABLE_MAGIC, NARC_MAGIC,
    },
};

/// Marks a folder entry in the name table; the low bits hold the name length
const FOLDER_FLAG: u8 = 0x80;

impl NarcArchive {
    /// Read a NARC archive collecting the folders and files it contains.
    ///
    /// `reader` must be positioned at the NARC magic. Any structural problem aborts the
    /// read; there is no partially decoded result.
    #[instrument(skip_all, err)]
    pub fn read<R: Read + Seek>(mut reader: R) -> Result<NarcArchive> {
        let start = reader.stream_position()?;
        expect_magic(&mut reader, NARC_MAGIC)?;

        let mark_offset = reader.stream_position()?;
        let mark: [u8; 2] = read_array(&mut reader)?;
        let byte_order = byte_order_from_mark(mark).ok_or(FormatError::InvalidByteOrderMark {
            offset: mark_offset,
            found: mark,
        })?;

        let header = NarcHeader::read_options(&mut reader, byte_order, ())?;
        header.validate(start)?;
        debug!(?byte_order, version = header.version, "read header");

        // BTAF
        let fat_start = reader.stream_position()?;
        expect_magic(&mut reader, FAT_MAGIC)?;
        let fat = FatHeader::read_options(&mut reader, byte_order, ())?;
        let mut fat_cursor = reader.stream_position()?;
        let name_table_start = fat_start + u64::from(fat.length);
        debug!(fat_start, files = fat.file_count, "read file allocation table");

        // BTNF
        reader.seek_to(name_table_start)?;
        expect_magic(&mut reader, NAME_TABLE_MAGIC)?;
        let name_table_length = read_u32(&mut reader, byte_order)?;
        let image_start = name_table_start + u64::from(name_table_length);

        let image_data_start = {
            let mut scope = reader.temporary_seek()?;
            scope.seek_to(image_start)?;
            expect_magic(&mut *scope, IMAGE_MAGIC)?;
            image_start + 8
        };
        debug!(name_table_start, image_start, "located sections");

        let unknown_offset = reader.stream_position()?;
        let unknown_header_length = read_u32(&mut reader, byte_order)?;
        let unknown_length =
            unknown_header_length
                .checked_sub(4)
                .ok_or(FormatError::UnexpectedValue {
                    field: "name table header length",
                    offset: unknown_offset,
                    expected: 4,
                    found: unknown_header_length.into(),
                })?;
        let blob_start = reader.stream_position()?;
        let bfnt_unknown = read_range(
            &mut reader,
            "name table header",
            blob_start,
            u64::from(unknown_length),
        )?;
        reader.seek(SeekFrom::Current(i64::from(unknown_length)))?;

        let mut tree = Tree::new();
        let mut current = tree.root();
        let mut remaining = fat.file_count;

        while remaining > 0 {
            let length = reader.read_u8()?;

            if length == 0 {
                current = tree.parent(current)?.unwrap_or(current);
                trace!(folder = %tree.path(current), "closed folder");
                continue;
            }

            if length >= FOLDER_FLAG {
                let name = read_name(&mut reader, length & !FOLDER_FLAG)?;
                // folder id and constant
                reader.seek(SeekFrom::Current(2))?;
                current = tree.add_folder(current, name)?;
                trace!(folder = %tree.path(current), "opened folder");
                continue;
            }

            let name = read_name(&mut reader, length)?;

            let entry_offset = fat_cursor;
            let entry = {
                let mut scope = reader.temporary_seek()?;
                scope.seek_to(fat_cursor)?;
                let entry = FatEntry::read_options(&mut *scope, byte_order, ())?;
                fat_cursor = scope.stream_position()?;
                entry
            };

            if entry.end < entry.offset {
                return Err(FormatError::InvertedRange {
                    what: "file",
                    offset: entry_offset,
                    start: entry.offset.into(),
                    end: entry.end.into(),
                }
                .into());
            }

            let data = read_range(
                &mut reader,
                "file",
                image_data_start + u64::from(entry.offset),
                u64::from(entry.end - entry.offset),
            )?;

            let leaf = tree.add_leaf(current, name, data)?;
            trace!(file = %tree.path(leaf), offset = entry.offset, end = entry.end, "read file");

            remaining -= 1;
        }

        Ok(NarcArchive {
            byte_order,
            version: header.version,
            bfnt_unknown,
            tree,
        })
    }

    /// Read a NARC archive from an in-memory buffer
    pub fn from_bytes(data: &[u8]) -> Result<NarcArchive> {
        Self::read(std::io::Cursor::new(data))
    }
}

fn read_name<R: Read>(reader: &mut R, length: u8) -> Result<String> {
    let mut name_raw = vec![0u8; length as usize];
    reader.read_exact(&mut name_raw)?;
    Ok(String::from_utf8_lossy(&name_raw).into_owned())
}
