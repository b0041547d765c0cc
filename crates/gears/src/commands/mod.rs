pub mod files;
pub mod identify;
pub mod list;
pub mod narc;
pub mod sarc;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Print the archive format of files
    Identify(identify::IdentifyArgs),
    /// Print the folders and files inside an archive
    List(list::ListArgs),
    /// Handle NARC files
    Narc {
        #[command(subcommand)]
        command: narc::NarcCommands,
    },
    /// Handle SARC files
    Sarc {
        #[command(subcommand)]
        command: sarc::SarcCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Identify(identify) => identify.handle(),
            Commands::List(list) => list.handle(),
            Commands::Narc { command } => command.handle(),
            Commands::Sarc { command } => command.handle(),
        }
    }
}
