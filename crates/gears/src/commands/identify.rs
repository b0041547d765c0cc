use clap::Args;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::{commands::files::read_input, format::Format};

#[derive(Args)]
pub struct IdentifyArgs {
    /// Files to inspect
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

impl IdentifyArgs {
    pub fn handle(&self) -> Result<()> {
        for path in &self.files {
            let data = read_input(path)?;
            match Format::detect(&data) {
                Some(format) => println!("{}: {}", path.display(), format.green()),
                None => println!("{}: {}", path.display(), "unknown".red()),
            }
        }
        Ok(())
    }
}
