//! Types for writing NARC archives
//!

use binrw::{BinWrite, BinWriterExt, Endian};
use bon::Builder;
use byteorder::WriteBytesExt;
use gear_core::io::patch_u32;
use gear_core::{NodeId, SeekExt};
use std::io::{Cursor, Seek, Write};
use tracing::{debug, instrument, trace};

use crate::{
    archive::NarcArchive,
    error::{Error, Result},
    types::{
        FatEntry, FatHeader, NarcHeader, ALIGNMENT, BYTE_ORDER_MARK, FAT_MAGIC,
        FOLDER_ENTRY_CONSTANT, HEADER_LENGTH, IMAGE_MAGIC, NAME_TABLE_MAGIC, NARC_MAGIC,
        SECTION_COUNT,
    },
};

/// Longest name a name table entry can describe
const MAX_NAME_LENGTH: usize = 0x7F;

/// Options for how the NARC file should be written
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct NarcWriteOptions {
    /// Byte order to write instead of the archive's own
    pub byte_order: Option<Endian>,
}

impl NarcArchive {
    /// Serialize the archive into `writer` using its own byte order.
    ///
    /// ```
    /// # fn doit() -> gear_narc::error::Result<()>
    /// # {
    /// use gear_narc::NarcArchive;
    ///
    /// let mut narc = NarcArchive::new();
    /// let root = narc.tree.root();
    /// narc.tree.add_leaf(root, "hello_world.txt", b"Hello, World!".to_vec())?;
    ///
    /// // We use a buffer here, though you'd normally use a `File`
    /// let buffer = narc.write(Vec::new())?;
    /// assert_eq!(&buffer[..4], b"NARC");
    /// # Ok(())
    /// # }
    /// # doit().unwrap();
    /// ```
    pub fn write<W: Write>(&self, writer: W) -> Result<W> {
        self.write_with_options(writer, NarcWriteOptions::default())
    }

    /// Serialize the archive into `writer`.
    ///
    /// The layout is built in memory first, so nothing reaches `writer` when the tree
    /// cannot be encoded.
    #[instrument(skip_all, err)]
    pub fn write_with_options<W: Write>(&self, mut writer: W, options: NarcWriteOptions) -> Result<W> {
        let data = self.encode(options.byte_order.unwrap_or(self.byte_order))?;
        writer.write_all(&data)?;
        Ok(writer)
    }

    /// Serialize the archive into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.write(Vec::new())
    }

    fn check_names(&self) -> Result<()> {
        for (id, _) in self.tree.walk() {
            let node = self.tree.get(id)?;
            let length = node.name().len();
            if length > MAX_NAME_LENGTH {
                return Err(Error::EncodingPrecondition(format!(
                    "name of {} is {length} bytes long, at most {MAX_NAME_LENGTH} fit",
                    self.tree.path(id)
                )));
            }

            if length == 0 && !node.is_folder() {
                return Err(Error::EncodingPrecondition(format!(
                    "file {} has an empty name",
                    self.tree.path(id)
                )));
            }
        }
        Ok(())
    }

    fn encode(&self, byte_order: Endian) -> Result<Vec<u8>> {
        self.check_names()?;

        let leaves = self.tree.leaves().collect::<Vec<_>>();
        let mut out = Cursor::new(Vec::new());

        out.write_all(NARC_MAGIC)?;
        out.write_type(&BYTE_ORDER_MARK, byte_order)?;
        NarcHeader {
            version: self.version,
            total_length: 0,
            header_length: HEADER_LENGTH,
            section_count: SECTION_COUNT,
        }
        .write_options(&mut out, byte_order, ())?;

        // BTAF
        let fat_start = out.stream_position()?;
        out.write_all(FAT_MAGIC)?;
        FatHeader {
            length: 0,
            file_count: to_u32(leaves.len() as u64, "file count")?,
        }
        .write_options(&mut out, byte_order, ())?;
        let fat_entries_start = out.stream_position()?;
        out.write_all(&vec![0u8; leaves.len() * 8])?;

        // BTNF
        let name_table_start = out.stream_position()?;
        out.write_all(NAME_TABLE_MAGIC)?;
        out.write_type(&0u32, byte_order)?;
        out.write_type(
            &to_u32(self.bfnt_unknown.len() as u64 + 4, "name table header length")?,
            byte_order,
        )?;
        out.write_all(&self.bfnt_unknown)?;

        let mut next_folder_id = 1u8;
        self.write_name_entries(&mut out, self.tree.root(), &mut next_folder_id)?;
        out.align_with_zeros(ALIGNMENT)?;
        debug!(fat_start, name_table_start, files = leaves.len(), "wrote tables");

        // GMIF
        let image_start = out.stream_position()?;
        out.write_all(IMAGE_MAGIC)?;
        out.write_type(&0u32, byte_order)?;
        let image_data_start = out.stream_position()?;

        for (index, &leaf) in leaves.iter().enumerate() {
            let data = self.tree.data(leaf)?;
            let offset = out.stream_position()? - image_data_start;
            out.write_all(data)?;

            let entry = FatEntry {
                offset: to_u32(offset, "file offset")?,
                end: to_u32(offset + data.len() as u64, "file end")?,
            };
            {
                let mut scope = out.temporary_seek()?;
                scope.seek_to(fat_entries_start + index as u64 * 8)?;
                entry.write_options(&mut *scope, byte_order, ())?;
            }
            trace!(file = %self.tree.path(leaf), offset = entry.offset, end = entry.end, "wrote file");

            out.align_with_zeros(ALIGNMENT)?;
        }

        let end = out.stream_position()?;
        patch_u32(&mut out, fat_start + 4, to_u32(name_table_start - fat_start, "BTAF length")?, byte_order)?;
        patch_u32(&mut out, name_table_start + 4, to_u32(image_start - name_table_start, "BTNF length")?, byte_order)?;
        // counts the GMIF magic and length field, like every other section length
        patch_u32(&mut out, image_start + 4, to_u32(end - image_start, "GMIF length")?, byte_order)?;
        patch_u32(&mut out, 0x08, to_u32(end, "total length")?, byte_order)?;
        debug!(image_start, length = end, "wrote image");

        Ok(out.into_inner())
    }

    fn write_name_entries<W: Write>(&self, out: &mut W, folder: NodeId, next_folder_id: &mut u8) -> Result<()> {
        for &child in self.tree.children(folder)? {
            let node = self.tree.get(child)?;
            let name = node.name().as_bytes();

            if node.is_folder() {
                out.write_u8(name.len() as u8 | 0x80)?;
                out.write_all(name)?;
                out.write_u8(*next_folder_id)?;
                out.write_u8(FOLDER_ENTRY_CONSTANT)?;
                *next_folder_id = next_folder_id.wrapping_add(1);

                self.write_name_entries(out, child, next_folder_id)?;
            } else {
                out.write_u8(name.len() as u8)?;
                out.write_all(name)?;
            }
        }

        out.write_u8(0)?;
        Ok(())
    }
}

fn to_u32(value: u64, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Error::EncodingPrecondition(format!("{what} {value:#x} does not fit in 32 bits")))
}
