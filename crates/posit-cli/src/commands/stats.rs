use crate::cli::GlobalFlags;
use crate::cli::subcommands::StatsCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `positif stats`.
pub async fn handle(
    action: &StatsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        StatsCommands::ByMedium => {
            output(&service.consultation_count_by_medium().await?, flags.format)
        }
        StatsCommands::ByEmployee => {
            output(&service.consultation_count_by_employee().await?, flags.format)
        }
        StatsCommands::Share => {
            output(&service.consultation_share_by_employee().await?, flags.format)
        }
    }
}
