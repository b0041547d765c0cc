pub mod extract;
pub mod pack;

#[derive(clap::Subcommand)]
pub enum NarcCommands {
    /// Extract a NARC file into a directory
    Extract(extract::ExtractArgs),
    /// Pack a directory into a NARC file
    Pack(pack::PackArgs),
}

impl NarcCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            NarcCommands::Extract(extract) => extract.handle(),
            NarcCommands::Pack(pack) => pack.handle(),
        }
    }
}
