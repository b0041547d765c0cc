use clap::Args;
use gear_core::Endian;
use gear_sarc::{SarcArchive, SarcWriteOptions};
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::files::{create_output, tree_from_directory};

#[derive(Args)]
pub struct PackArgs {
    /// An input directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target SARC file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Write a big endian archive
    #[arg(long, default_value_t = false)]
    big_endian: bool,

    /// Store hashes only; every file name must start with its 8 digit hex hash
    #[arg(long, default_value_t = false)]
    hash_only: bool,
}

impl PackArgs {
    pub fn handle(&self) -> Result<()> {
        info!("creating {}", &self.file.display());

        let mut sarc = SarcArchive::new();
        sarc.tree = tree_from_directory(&self.directory)?;
        if sarc.is_empty() {
            return Err(miette!("directory is empty"));
        }

        let options = SarcWriteOptions::builder()
            .byte_order(if self.big_endian { Endian::Big } else { Endian::Little })
            .hash_only(self.hash_only)
            .build();
        let data = sarc
            .write_with_options(Vec::new(), options)
            .context("encoding sarc file")?;

        create_output(&self.file, self.overwrite)?
            .write_all(&data)
            .into_diagnostic()
            .context("writing sarc file")?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use miette::IntoDiagnostic;

    use crate::commands::sarc::pack::PackArgs;

    #[test]
    fn failed_pack_leaves_no_file() -> miette::Result<()> {
        let root = std::env::temp_dir().join(format!("gears-sarc-pack-{}", std::process::id()));
        let directory = root.join("input");
        std::fs::create_dir_all(&directory).into_diagnostic()?;
        std::fs::write(directory.join("not_a_hash.txt"), b"hello").into_diagnostic()?;

        let mut args = PackArgs {
            directory,
            file: root.join("out.sarc"),
            overwrite: false,
            big_endian: false,
            hash_only: true,
        };
        let failed = args.handle();
        let exists = args.file.exists();

        args.hash_only = false;
        let retried = args.handle();
        let _ = std::fs::remove_dir_all(&root);

        assert!(failed.is_err());
        assert!(!exists);
        assert!(retried.is_ok());

        Ok(())
    }
}
