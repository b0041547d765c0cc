//! Types for writing SARC archives
//!

use binrw::{BinWrite, Endian};
use bon::Builder;
use gear_core::io::patch_u32;
use gear_core::SeekExt;
use indexmap::IndexMap;
use std::io::{Cursor, Seek, Write};
use tracing::{debug, instrument, trace};

use crate::{
    alignment::guess_file_alignment,
    archive::SarcArchive,
    error::{Error, Result},
    hash::{hash_from_name, name_hash, HASH_MULTIPLIER},
    types::{
        SarcHeader, SfatHeader, SfatNode, SfntHeader, DATA_ALIGNMENT, DEFAULT_VERSION, NAMED_FLAG,
        NAME_ALIGNMENT, SARC_MAGIC, SFAT_HEADER_LENGTH, SFAT_MAGIC, SFNT_HEADER_LENGTH, SFNT_MAGIC,
    },
};

/// Options for how the SARC file should be written
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct SarcWriteOptions {
    /// Byte order to write instead of the archive's own
    pub byte_order: Option<Endian>,

    /// Overrides [`SarcArchive::hash_only`]
    pub hash_only: Option<bool>,
}

/// A file waiting to be laid out
struct Entry<'a> {
    name: &'a str,
    hash: u32,
    data: &'a [u8],
}

impl SarcArchive {
    /// Serialize the archive into `writer` using its own byte order and naming mode.
    ///
    /// ```
    /// # fn doit() -> gear_sarc::error::Result<()>
    /// # {
    /// use gear_sarc::SarcArchive;
    ///
    /// let mut sarc = SarcArchive::new();
    /// let root = sarc.tree.root();
    /// sarc.tree.add_leaf(root, "hello_world.txt", b"Hello, World!".to_vec())?;
    ///
    /// // We use a buffer here, though you'd normally use a `File`
    /// let buffer = sarc.write(Vec::new())?;
    /// assert_eq!(&buffer[..4], b"SARC");
    /// # Ok(())
    /// # }
    /// # doit().unwrap();
    /// ```
    pub fn write<W: Write>(&self, writer: W) -> Result<W> {
        self.write_with_options(writer, SarcWriteOptions::default())
    }

    /// Serialize the archive into `writer`.
    ///
    /// Every leaf of the tree is stored under its `/` joined path. Nothing reaches
    /// `writer` when the tree cannot be encoded.
    #[instrument(skip_all, err)]
    pub fn write_with_options<W: Write>(&self, mut writer: W, options: SarcWriteOptions) -> Result<W> {
        let data = self.encode(
            options.byte_order.unwrap_or(self.byte_order),
            options.hash_only.unwrap_or(self.hash_only),
        )?;
        writer.write_all(&data)?;
        Ok(writer)
    }

    /// Serialize the archive into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.write(Vec::new())
    }

    fn collect_files(&self) -> Result<IndexMap<String, &[u8]>> {
        let mut files = IndexMap::new();
        for leaf in self.tree.leaves() {
            let path = self.tree.path(leaf);
            if path.trim().is_empty() || path.contains('\0') {
                return Err(Error::EncodingPrecondition(format!(
                    "file name {path:?} cannot be stored in the name table"
                )));
            }

            let data = self.tree.data(leaf)?;
            if files.insert(path, data).is_some() {
                return Err(Error::EncodingPrecondition(format!(
                    "{} is stored more than once",
                    self.tree.path(leaf)
                )));
            }
        }
        Ok(files)
    }

    fn encode(&self, byte_order: Endian, hash_only: bool) -> Result<Vec<u8>> {
        let files = self.collect_files()?;

        let mut entries = Vec::with_capacity(files.len());
        for (name, &data) in &files {
            let hash = if hash_only {
                hash_from_name(name)?
            } else {
                name_hash(name)
            };
            entries.push(Entry { name, hash, data });
        }
        entries.sort_by_key(|entry| entry.hash);

        let node_count = u16::try_from(entries.len()).map_err(|_| {
            Error::EncodingPrecondition(format!("{} files do not fit in one archive", entries.len()))
        })?;

        let mut out = Cursor::new(Vec::new());

        let header = SarcHeader {
            magic: *SARC_MAGIC,
            byte_order,
            version: self.header.map_or(DEFAULT_VERSION, |header| header.version),
            reserved: self.header.map_or(0, |header| header.reserved),
            ..Default::default()
        };
        header.write(&mut out)?;

        // SFAT
        out.write_all(SFAT_MAGIC)?;
        SfatHeader {
            chunk_length: SFAT_HEADER_LENGTH,
            node_count,
            hash_multiplier: HASH_MULTIPLIER,
        }
        .write_options(&mut out, byte_order, ())?;
        let nodes_start = out.stream_position()?;
        out.write_all(&vec![0u8; entries.len() * 16])?;

        // SFNT
        out.write_all(SFNT_MAGIC)?;
        SfntHeader {
            chunk_length: SFNT_HEADER_LENGTH,
            reserved: 0,
        }
        .write_options(&mut out, byte_order, ())?;
        let names_start = out.stream_position()?;

        let mut name_offsets = Vec::with_capacity(entries.len());
        for entry in &entries {
            name_offsets.push(out.stream_position()? - names_start);
            out.write_all(entry.name.as_bytes())?;
            out.write_all(&[0])?;
            out.align_with_zeros(NAME_ALIGNMENT)?;
        }
        debug!(nodes_start, names_start, files = entries.len(), "wrote tables");

        let data_offset = out.align_with_zeros(DATA_ALIGNMENT)?;

        let mut file_starts = Vec::with_capacity(entries.len());
        for entry in &entries {
            out.align_with_zeros(guess_file_alignment(entry.data))?;
            file_starts.push(out.stream_position()?);
            out.write_all(entry.data)?;
        }
        let first_file = file_starts.first().copied().unwrap_or(data_offset);

        for (index, entry) in entries.iter().enumerate() {
            let attributes = if hash_only {
                0
            } else {
                let name_offset = u16::try_from(name_offsets[index] / 4).map_err(|_| {
                    Error::EncodingPrecondition(format!("name of {} is past the end of the name table", entry.name))
                })?;
                NAMED_FLAG | u32::from(name_offset)
            };

            let start = file_starts[index] - first_file;
            let node = SfatNode {
                hash: entry.hash,
                attributes,
                data_start: to_u32(start, "file offset")?,
                data_end: to_u32(start + entry.data.len() as u64, "file end")?,
            };

            let mut scope = out.temporary_seek()?;
            scope.seek_to(nodes_start + index as u64 * 16)?;
            node.write_options(&mut *scope, byte_order, ())?;
            trace!(file = entry.name, hash = node.hash, start = node.data_start, end = node.data_end, "wrote file");
        }

        let end = out.stream_position()?;
        patch_u32(&mut out, 0x08, to_u32(end, "total length")?, byte_order)?;
        patch_u32(&mut out, 0x0C, to_u32(first_file, "data offset")?, byte_order)?;
        debug!(data_offset = first_file, length = end, "wrote data");

        Ok(out.into_inner())
    }
}

fn to_u32(value: u64, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Error::EncodingPrecondition(format!("{what} {value:#x} does not fit in 32 bits")))
}
