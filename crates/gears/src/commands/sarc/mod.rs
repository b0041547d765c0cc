pub mod extract;
pub mod pack;

#[derive(clap::Subcommand)]
pub enum SarcCommands {
    /// Extract a SARC file into a directory
    Extract(extract::ExtractArgs),
    /// Pack a directory into a SARC file
    Pack(pack::PackArgs),
}

impl SarcCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            SarcCommands::Extract(extract) => extract.handle(),
            SarcCommands::Pack(pack) => pack.handle(),
        }
    }
}
