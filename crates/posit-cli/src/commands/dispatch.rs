use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Register(args) => commands::register::handle(args, ctx, flags).await,
        Commands::Login(args) => commands::login::handle(&args, ctx, flags).await,
        Commands::Medium { action } => commands::medium::handle(&action, ctx, flags).await,
        Commands::Client { action } => commands::client::handle(&action, ctx, flags).await,
        Commands::Employee { action } => commands::employee::handle(&action, ctx, flags).await,
        Commands::Consult { action } => commands::consult::handle(&action, ctx, flags).await,
        Commands::Predict(args) => commands::predict::handle(&args, ctx, flags).await,
        Commands::Stats { action } => commands::stats::handle(&action, ctx, flags).await,
        Commands::Init => unreachable!("init is pre-dispatched in main"),
    }
}
