use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MediumCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `positif medium`.
pub async fn handle(
    action: &MediumCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MediumCommands::List => output(&ctx.service.list_mediums().await?, flags.format),
        MediumCommands::Get { id } => {
            let medium = ctx
                .service
                .get_medium(id)
                .await?
                .with_context(|| format!("medium '{id}' not found"))?;
            output(&medium, flags.format)
        }
    }
}
