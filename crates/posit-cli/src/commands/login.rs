use anyhow::bail;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoginArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `positif login`.
pub async fn handle(
    args: &LoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let Some(account) = ctx.service.authenticate(&args.email, &args.password).await? else {
        bail!("invalid email or password");
    };
    output(&account, flags.format)
}
