//! Types for reading SARC archives
//!

use binrw::BinRead;
use gear_core::error::FormatError;
use gear_core::io::read_range;
use gear_core::Tree;
use std::io::{Read, Seek};
use tracing::{debug, instrument, trace};

use crate::{
    archive::SarcArchive,
    error::Result,
    types::{SarcHeader, SfatHeader, SfatNode, SfntTable},
};

impl SarcArchive {
    /// Read a SARC archive collecting the files it contains.
    ///
    /// `reader` must be positioned at the magic. Files are added to the root of the
    /// tree in the order of the hash table.
    #[instrument(skip_all, err)]
    pub fn read<R: Read + Seek>(mut reader: R) -> Result<SarcArchive> {
        let start = reader.stream_position()?;
        let header = SarcHeader::parse(&mut reader)?;
        let byte_order = header.byte_order;
        debug!(?byte_order, data_offset = header.data_offset, "read header");

        // SFAT
        let sfat = SfatHeader::parse(&mut reader, byte_order)?;
        let nodes_start = reader.stream_position()?;
        let nodes = (0..sfat.node_count)
            .map(|_| SfatNode::read_options(&mut reader, byte_order, ()))
            .collect::<binrw::BinResult<Vec<_>>>()?;
        debug!(nodes = nodes.len(), "read hash table");

        // SFNT
        let data_start = start + u64::from(header.data_offset);
        let names = SfntTable::parse(&mut reader, byte_order, data_start)?;
        debug!(names = names.names.len(), "read name table");

        let mut tree = Tree::new();
        let root = tree.root();

        for (index, node) in nodes.iter().enumerate() {
            let node_offset = nodes_start + index as u64 * 16;
            let file_start = data_start + u64::from(node.data_start);

            // the first node's end is its length
            let length = if index == 0 {
                node.data_end
            } else {
                node.data_end
                    .checked_sub(node.data_start)
                    .ok_or(FormatError::InvertedRange {
                        what: "file",
                        offset: node_offset,
                        start: node.data_start.into(),
                        end: node.data_end.into(),
                    })?
            };

            let name = if node.is_file() {
                let name_offset = u64::from(node.name_offset()) * 4;
                names
                    .get(name_offset)
                    .ok_or(FormatError::MissingName { index, name_offset })?
                    .to_owned()
            } else {
                format!("{:08X}", node.hash)
            };

            let data = read_range(&mut reader, "file", file_start, u64::from(length))?;
            trace!(%name, hash = node.hash, start = node.data_start, end = node.data_end, "read file");
            tree.add_leaf(root, name, data)?;
        }

        Ok(SarcArchive {
            byte_order,
            hash_only: nodes.first().is_some_and(|node| !node.is_file()),
            header: Some(header),
            tree,
        })
    }

    /// Read a SARC archive from an in-memory buffer
    pub fn from_bytes(data: &[u8]) -> Result<SarcArchive> {
        Self::read(std::io::Cursor::new(data))
    }
}
