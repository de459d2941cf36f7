use anyhow::Context;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ClientCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `positif client`.
pub async fn handle(
    action: &ClientCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ClientCommands::Get { id } => {
            let client = ctx
                .service
                .get_client(id)
                .await?
                .with_context(|| format!("client '{id}' not found"))?;
            output(&client, flags.format)
        }
        ClientCommands::History { id, medium } => {
            let conversations = ctx
                .service
                .client_conversations(id, medium.as_deref())
                .await?;
            output(
                &json!({
                    "client_id": id,
                    "medium_id": medium,
                    "conversations": conversations,
                }),
                flags.format,
            )
        }
    }
}
