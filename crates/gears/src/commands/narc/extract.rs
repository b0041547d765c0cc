use clap::Args;
use gear_narc::NarcArchive;
use miette::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::commands::files::{read_input, write_tree};

#[derive(Args)]
pub struct ExtractArgs {
    /// An input NARC file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        let narc = NarcArchive::from_bytes(&data)
            .context(format!("decoding {}", self.file.display()))?;
        info!("extracting {} files", narc.len());

        write_tree(&narc.tree, &self.directory, self.overwrite)
    }
}
