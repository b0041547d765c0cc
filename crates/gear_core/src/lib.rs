//! Building blocks shared by the **gears** archive codecs.
//!
//! Both NARC and SARC decode into the same in-memory model: an ordered tree of named
//! nodes where every node is either a folder or a leaf holding raw bytes. This crate
//! provides that tree together with the cursor helpers the codecs use to walk and
//! back-patch their binary layouts.
//!
//! | Module         | Contents                                                          |
//! |----------------|-------------------------------------------------------------------|
//! | [`tree`]       | Arena backed [`Tree`] of folders and leaves                       |
//! | [`io`]         | Temporary seeks, alignment padding, magic checks, bounded reads   |
//! | [`error`]      | [`FormatError`](error::FormatError) and the crate error type      |
//!
//! Byte order is always decided at runtime from the archive itself, so every
//! multi-byte read and write goes through [`binrw::Endian`] rather than a fixed
//! `#[brw(little)]` attribute.

pub mod error;
pub mod io;
pub mod tree;

pub use binrw::Endian;
pub use error::{FormatError, TreeError};
pub use io::{SeekExt, TemporarySeek};
pub use tree::{Node, NodeId, NodeKind, Tree};
