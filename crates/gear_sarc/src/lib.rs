//! This library handles reading from and creating **SARC** archives.
//!
//! # SARC Archive Format Documentation
//!
//! A SARC ("SEAD ARChive") is a flat list of files addressed by a hash of their
//! name. Nested folders do not exist in the format; paths are stored with `/` in the
//! name instead.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "SARC" ("CRAS" in some older archives)            |
//! | 0x0004         | Header length          | 2 bytes: always `0x14`                                     |
//! | 0x0006         | Byte order mark        | 2 bytes: `FE FF` for big endian, `FF FE` for little endian |
//! | 0x0008         | Total length           | 4 bytes: size of the whole archive                         |
//! | 0x000C         | Data offset            | 4 bytes: where the file data region starts                 |
//! | 0x0010         | Version                | 2 bytes: normally `0x0100`                                 |
//! | 0x0012         | Reserved               | 2 bytes                                                    |
//! | 0x0014         | SFAT section           | Hash table                                                 |
//! | ...            | SFNT section           | Name table                                                 |
//! | data offset    | Data                   | File contents, aligned by content type                     |
//!
//! ### SFAT
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "SFAT"                                            |
//! | 0x0004         | Header length          | 2 bytes: `0x0C`                                            |
//! | 0x0006         | Node count             | 2 bytes                                                    |
//! | 0x0008         | Hash multiplier        | 4 bytes: `0x65`                                            |
//! | 0x000C         | Nodes                  | 16 bytes each, sorted by hash                              |
//!
//! Each node holds the name hash, the attributes, and the start and end of the file
//! relative to the data offset. The attributes pack a "has name" flag in the top
//! byte, an unknown byte, and the name's offset in the name table divided by four
//! in the low 16 bits.
//!
//! ### SFNT
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "SFNT"                                            |
//! | 0x0004         | Header length          | 2 bytes: `0x08`                                            |
//! | 0x0006         | Reserved               | 2 bytes                                                    |
//! | 0x0008         | Names                  | NUL terminated, each padded to 4 bytes                     |
//!
//! Archives whose nodes carry no names are *hash only*: files are known by their
//! hash, shown as eight uppercase hex digits.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.sarc`, `.pack`, `.bars`
//! - **Endianness**: chosen per archive by the byte order mark
//!

pub mod alignment;
pub mod archive;
pub mod error;
pub mod hash;
pub mod read;
pub mod types;
pub mod write;

pub use alignment::guess_file_alignment;
pub use archive::{identify, SarcArchive};
pub use hash::{hash_from_name, name_hash};
pub use write::SarcWriteOptions;
