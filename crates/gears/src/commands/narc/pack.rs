use clap::Args;
use gear_core::Endian;
use gear_narc::{NarcArchive, NarcWriteOptions};
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::files::{create_output, tree_from_directory};

#[derive(Args)]
pub struct PackArgs {
    /// An input directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target NARC file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Write a big endian archive
    #[arg(long, default_value_t = false)]
    big_endian: bool,
}

impl PackArgs {
    pub fn handle(&self) -> Result<()> {
        info!("creating {}", &self.file.display());

        let mut narc = NarcArchive::new();
        narc.tree = tree_from_directory(&self.directory)?;
        if narc.is_empty() {
            return Err(miette!("directory is empty"));
        }

        let byte_order = if self.big_endian { Endian::Big } else { Endian::Little };
        let data = narc
            .write_with_options(Vec::new(), NarcWriteOptions::builder().byte_order(byte_order).build())
            .context("encoding narc file")?;

        create_output(&self.file, self.overwrite)?
            .write_all(&data)
            .into_diagnostic()
            .context("writing narc file")?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use miette::IntoDiagnostic;

    use crate::commands::narc::pack::PackArgs;

    #[test]
    fn failed_pack_leaves_no_file() -> miette::Result<()> {
        let root = std::env::temp_dir().join(format!("gears-narc-pack-{}", std::process::id()));
        let directory = root.join("input");
        let too_long = directory.join("n".repeat(0x80));
        std::fs::create_dir_all(&directory).into_diagnostic()?;
        std::fs::write(&too_long, [1]).into_diagnostic()?;

        let args = PackArgs {
            directory: directory.clone(),
            file: root.join("out.narc"),
            overwrite: false,
            big_endian: false,
        };
        let failed = args.handle();
        let exists = args.file.exists();

        std::fs::remove_file(&too_long).into_diagnostic()?;
        std::fs::write(directory.join("short.bin"), [1]).into_diagnostic()?;
        let retried = args.handle();
        let _ = std::fs::remove_dir_all(&root);

        assert!(failed.is_err());
        assert!(!exists);
        assert!(retried.is_ok());

        Ok(())
    }
}
