//! Command line front end for the gears archive codecs

pub mod commands;
pub mod format;
