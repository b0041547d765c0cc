//! This library handles reading from and creating **NARC** archives.
//!
//! # NARC Archive Format Documentation
//!
//! A NARC ("Nitro ARChive") packs a folder tree of named files into one blob made of a
//! fixed header and three sections: a file allocation table, a name table and the file
//! image. The name table handled here is a flat stream of folder/file entries rather
//! than the DS ROM directory table.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "NARC"                                            |
//! | 0x0004         | Byte order mark        | 2 bytes: `0xFFFE` in the archive's byte order              |
//! | 0x0006         | Version                | 2 bytes: normally `0x0100`                                 |
//! | 0x0008         | Total length           | 4 bytes: size of the whole archive                         |
//! | 0x000C         | Header length          | 2 bytes: always `0x10`                                     |
//! | 0x000E         | Section count          | 2 bytes: always `3`                                        |
//! | 0x0010         | BTAF section           | File allocation table                                      |
//! | ...            | BTNF section           | Name table, padded to 128 bytes                            |
//! | ...            | GMIF section           | File image                                                 |
//!
//! The mark is written as the value `0xFFFE`, so a little endian archive starts with
//! the bytes `FE FF` and a big endian one with `FF FE`. Every multi-byte field after it
//! follows that order.
//!
//! ### BTAF
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "BTAF"                                            |
//! | 0x0004         | Length                 | 4 bytes: distance to the BTNF magic                        |
//! | 0x0008         | File count             | 4 bytes: number of files (folders excluded)                |
//! | 0x000C         | Entries                | 8 bytes per file: start and end inside the file image      |
//!
//! ### BTNF
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "BTNF"                                            |
//! | 0x0004         | Length                 | 4 bytes: distance to the GMIF magic                        |
//! | 0x0008         | Header length          | 4 bytes: size of this field plus the opaque header blob   |
//! | 0x000C         | Header blob            | (Header length - 4) bytes, meaning unknown, kept verbatim  |
//! | ...            | Entries                | Variable length entries, see below                         |
//!
//! Entries are visited in depth first order:
//!
//! - `0x00` closes the current folder.
//! - `0x80 | n`, `n` name bytes, a folder id byte and `0xF0` open a folder.
//! - `n`, `n` name bytes describe a file; its data is the next BTAF entry.
//!
//! ### GMIF
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "GMIF"                                            |
//! | 0x0004         | Length                 | 4 bytes: size of the section                               |
//! | 0x0008         | Data                   | File contents, each padded to 128 bytes                    |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.narc`, `.carc`
//! - **Endianness**: chosen per archive by the byte order mark
//!

pub mod archive;
pub mod error;
pub mod read;
pub mod types;
pub mod write;

pub use archive::{identify, NarcArchive};
pub use write::NarcWriteOptions;
