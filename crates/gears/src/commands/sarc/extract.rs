use clap::Args;
use gear_sarc::SarcArchive;
use miette::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::commands::files::{read_input, write_tree};

#[derive(Args)]
pub struct ExtractArgs {
    /// An input SARC file
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
        let sarc = SarcArchive::from_bytes(&data)
            .context(format!("decoding {}", self.file.display()))?;
        info!("extracting {} files", sarc.len());

        write_tree(&sarc.tree, &self.directory, self.overwrite)
    }
}
