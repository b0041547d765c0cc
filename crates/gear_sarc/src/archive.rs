//! The SARC archive handle

use binrw::Endian;
use gear_core::Tree;

use crate::types::{SarcHeader, SARC_MAGIC};

/// Whether `data` starts with the SARC magic.
///
/// Never fails; buffers shorter than the magic are simply not SARCs.
pub fn identify(data: &[u8]) -> bool {
    data.starts_with(SARC_MAGIC)
}

/// A decoded SARC archive
///
/// Every leaf hangs directly off the root of [`SarcArchive::tree`]; a leaf named
/// `a/b.txt` is how a nested path is stored. Folders built by the caller are
/// flattened into such names when writing.
///
/// ```
/// # fn doit() -> gear_sarc::error::Result<()>
/// # {
/// use gear_sarc::SarcArchive;
///
/// let mut sarc = SarcArchive::new();
/// let root = sarc.tree.root();
/// sarc.tree.add_leaf(root, "Layout/title.bflyt", b"FLYT".to_vec())?;
///
/// let bytes = sarc.to_bytes()?;
/// assert!(gear_sarc::identify(&bytes));
///
/// let decoded = SarcArchive::from_bytes(&bytes)?;
/// assert_eq!(decoded.tree, sarc.tree);
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SarcArchive {
    /// Byte order of every multi-byte field
    pub byte_order: Endian,

    /// Whether files are known by hash alone, their names being the hash in hex
    pub hash_only: bool,

    /// Header the archive was decoded from, `None` for archives built from scratch
    pub header: Option<SarcHeader>,

    /// The files stored in the archive
    pub tree: Tree,
}

impl Default for SarcArchive {
    fn default() -> Self {
        Self {
            byte_order: Endian::Little,
            hash_only: false,
            header: None,
            tree: Tree::new(),
        }
    }
}

impl SarcArchive {
    /// An empty little endian archive with named files
    pub fn new() -> SarcArchive {
        Self::default()
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.tree.leaf_count()
    }

    /// Whether the archive holds no files
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use crate::archive::identify;

    #[test]
    fn identify_checks_magic() {
        assert!(identify(b"SARC\x00\x14\xFE\xFF"));
        assert!(!identify(b"CRAS\x00\x14"));
        assert!(!identify(b"NARC\xFE\xFF"));
        assert!(!identify(b"SAR"));
        assert!(!identify(&[]));
    }
}
