//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// The input is not a well formed archive
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    /// An operation on the node tree was invalid
    #[error(transparent)]
    #[diagnostic(transparent)]
    Tree(#[from] TreeError),
}

/// The input is not an archive of the expected kind, or is structurally malformed.
///
/// Every variant carries the absolute stream offset the problem was found at.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// magic mismatch
    #[error("bad magic at {offset:#x}: expected {expected:?}, found {found:?}")]
    #[diagnostic(code(gears::format::bad_magic))]
    BadMagic {
        /// Position of the magic in the stream
        offset: u64,
        /// The magic(s) that would have been accepted
        expected: String,
        /// What was actually there
        found: String,
    },

    /// unknown byte order mark
    #[error("invalid byte order mark {found:02X?} at {offset:#x}")]
    #[diagnostic(code(gears::format::byte_order_mark))]
    InvalidByteOrderMark {
        /// Position of the mark in the stream
        offset: u64,
        /// The two raw bytes found
        found: [u8; 2],
    },

    /// header constant mismatch
    #[error("unexpected {field} at {offset:#x}: expected {expected:#x}, found {found:#x}")]
    #[diagnostic(code(gears::format::header_constant))]
    UnexpectedValue {
        /// Name of the header field
        field: &'static str,
        /// Position of the field in the stream
        offset: u64,
        /// Value required by the format
        expected: u64,
        /// Value read
        found: u64,
    },

    /// data range outside of the stream
    #[error("{what} range {start:#x}..{end:#x} is outside of the stream (length {length:#x})")]
    #[diagnostic(code(gears::format::out_of_bounds))]
    OutOfBounds {
        /// What the range describes
        what: &'static str,
        /// Absolute start of the range
        start: u64,
        /// Absolute end of the range
        end: u64,
        /// Length of the stream
        length: u64,
    },

    /// data range ends before it starts
    #[error("{what} at {offset:#x} ends at {end:#x} before it starts at {start:#x}")]
    #[diagnostic(code(gears::format::inverted_range))]
    InvertedRange {
        /// What the range describes
        what: &'static str,
        /// Position of the record holding the range
        offset: u64,
        /// Declared start
        start: u64,
        /// Declared end
        end: u64,
    },

    /// a name table reference points at nothing
    #[error("no name stored at name table offset {name_offset:#x} (entry {index})")]
    #[diagnostic(code(gears::format::missing_name))]
    MissingName {
        /// Index of the entry referencing the name
        index: usize,
        /// Byte offset into the name table
        name_offset: u64,
    },
}

/// Errors raised by [`crate::tree::Tree`] operations
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// node {0} is a leaf and cannot hold children
    #[error("node {0} is a leaf and cannot hold children")]
    NotAFolder(usize),

    /// node {0} is a folder and holds no data
    #[error("node {0} is a folder and holds no data")]
    NotALeaf(usize),

    /// node {0} does not exist in this tree
    #[error("node {0} does not exist in this tree")]
    UnknownNode(usize),

    /// a new folder was handed children it does not own
    #[error("folder {name:?} must be added empty, it was given {children} children")]
    PrefilledFolder {
        /// Name of the rejected folder
        name: String,
        /// Number of children it arrived with
        children: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
