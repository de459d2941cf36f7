use clap::Subcommand;

/// Medium catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MediumCommands {
    /// List every medium.
    List,
    /// Get a medium by ID.
    Get { id: String },
}
