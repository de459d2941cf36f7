use clap::Subcommand;

/// Client commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ClientCommands {
    /// Get a client by ID.
    Get { id: String },
    /// A client's consultations, newest first.
    History {
        id: String,
        /// Only consultations with this medium.
        #[arg(long)]
        medium: Option<String>,
    },
}
