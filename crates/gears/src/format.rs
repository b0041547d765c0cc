//! Format detection across the supported codecs

use std::fmt::Display;

use gear_core::Tree;
use miette::{miette, Result};

/// Archive formats the tool understands
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    Narc,
    Sarc,
}

impl Format {
    /// Pick the format from the leading bytes of a file
    pub fn detect(data: &[u8]) -> Option<Format> {
        if gear_narc::identify(data) {
            Some(Format::Narc)
        } else if gear_sarc::identify(data) {
            Some(Format::Sarc)
        } else {
            None
        }
    }

    /// Decode `data` with this format's codec and hand back its tree
    pub fn decode(self, data: &[u8]) -> Result<Tree> {
        let tree = match self {
            Format::Narc => gear_narc::NarcArchive::from_bytes(data)?.tree,
            Format::Sarc => gear_sarc::SarcArchive::from_bytes(data)?.tree,
        };
        Ok(tree)
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Narc => write!(f, "NARC"),
            Format::Sarc => write!(f, "SARC"),
        }
    }
}

/// Detect the format of `data` and decode it
pub fn decode_any(data: &[u8]) -> Result<(Format, Tree)> {
    let format = Format::detect(data).ok_or(miette!("not a NARC or SARC archive"))?;
    Ok((format, format.decode(data)?))
}
