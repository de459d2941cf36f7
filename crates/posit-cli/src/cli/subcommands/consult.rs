use clap::Subcommand;

/// Consultation lifecycle commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConsultCommands {
    /// Request a consultation with a medium.
    Request {
        #[arg(long)]
        client: String,
        #[arg(long)]
        medium: String,
    },
    /// Accept a requested consultation.
    Accept { id: String },
    /// End an accepted consultation.
    End { id: String },
    /// Attach or replace the employee's comment.
    Comment { id: String, text: String },
    /// Get a consultation by ID.
    Get { id: String },
}
