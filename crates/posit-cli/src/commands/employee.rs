use anyhow::Context;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EmployeeCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `positif employee`.
pub async fn handle(
    action: &EmployeeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EmployeeCommands::Get { id } => {
            let employee = ctx
                .service
                .get_employee(id)
                .await?
                .with_context(|| format!("employee '{id}' not found"))?;
            output(&employee, flags.format)
        }
        EmployeeCommands::Current { id } => {
            let conversation = ctx.service.employee_open_conversation(id).await?;
            output(
                &json!({
                    "employee_id": id,
                    "conversation": conversation,
                }),
                flags.format,
            )
        }
    }
}
