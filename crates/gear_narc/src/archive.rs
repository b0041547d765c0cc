//! The NARC archive handle

use binrw::Endian;
use gear_core::Tree;

use crate::types::{DEFAULT_BFNT_UNKNOWN, DEFAULT_VERSION, NARC_MAGIC};

/// Whether `data` starts with the NARC magic.
///
/// Never fails; buffers shorter than the magic are simply not NARCs.
pub fn identify(data: &[u8]) -> bool {
    data.starts_with(NARC_MAGIC)
}

/// A decoded NARC archive
///
/// ```
/// # fn doit() -> gear_narc::error::Result<()>
/// # {
/// use gear_narc::NarcArchive;
///
/// let mut narc = NarcArchive::new();
/// let root = narc.tree.root();
/// let folder = narc.tree.add_folder(root, "data")?;
/// narc.tree.add_leaf(folder, "hello.txt", b"Hello, World!".to_vec())?;
///
/// let bytes = narc.to_bytes()?;
/// assert!(gear_narc::identify(&bytes));
///
/// let decoded = NarcArchive::read(std::io::Cursor::new(bytes))?;
/// assert_eq!(decoded.tree, narc.tree);
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NarcArchive {
    /// Byte order of every multi-byte field
    pub byte_order: Endian,

    /// Version field of the header
    pub version: u16,

    /// Opaque BTNF header blob, written back untouched
    pub bfnt_unknown: Vec<u8>,

    /// The folders and files stored in the archive
    pub tree: Tree,
}

impl Default for NarcArchive {
    fn default() -> Self {
        Self {
            byte_order: Endian::Little,
            version: DEFAULT_VERSION,
            bfnt_unknown: DEFAULT_BFNT_UNKNOWN.to_vec(),
            tree: Tree::new(),
        }
    }
}

impl NarcArchive {
    /// An empty little endian archive
    pub fn new() -> NarcArchive {
        Self::default()
    }

    /// Number of files, folders excluded
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
        assert!(identify(b"NARC\xFE\xFF"));
        assert!(identify(b"NARC"));
        assert!(!identify(b"SARC\x00\x14"));
        assert!(!identify(b"NAR"));
        assert!(!identify(&[]));
    }
}
