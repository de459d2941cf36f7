use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConsultCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `positif consult`.
pub async fn handle(
    action: &ConsultCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        ConsultCommands::Request { client, medium } => {
            let outcome = service.request_consultation(client, medium).await?;
            output(&outcome, flags.format)
        }
        ConsultCommands::Accept { id } => {
            output(&service.accept_consultation(id).await?, flags.format)
        }
        ConsultCommands::End { id } => {
            output(&service.terminate_consultation(id).await?, flags.format)
        }
        ConsultCommands::Comment { id, text } => {
            output(&service.comment_consultation(id, text).await?, flags.format)
        }
        ConsultCommands::Get { id } => {
            let conversation = service
                .get_conversation(id)
                .await?
                .with_context(|| format!("conversation '{id}' not found"))?;
            output(&conversation, flags.format)
        }
    }
}
