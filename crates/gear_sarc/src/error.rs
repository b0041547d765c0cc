//! Error types that can be emitted from this library

use gear_core::error::{FormatError, TreeError};
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

    /// file is an invalid sarc archive
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    /// the node tree rejected an operation
    #[error(transparent)]
    #[diagnostic(transparent)]
    Tree(#[from] TreeError),

    /// the tree cannot be stored as a sarc archive: {0}
    #[error("the tree cannot be stored as a sarc archive: {0}")]
    #[diagnostic(code(gears::sarc::encoding_precondition))]
    EncodingPrecondition(String),
}

impl From<gear_core::error::Error> for Error {
    fn from(value: gear_core::error::Error) -> Self {
        match value {
            gear_core::error::Error::IOError(e) => Error::IOError(e),
            gear_core::error::Error::BinRWError(e) => Error::BinRWError(e),
            gear_core::error::Error::Format(e) => Error::Format(e),
            gear_core::error::Error::Tree(e) => Error::Tree(e),
        }
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
