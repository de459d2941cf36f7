use posit_core::entities::ClientRegistration;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RegisterArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `positif register`.
pub async fn handle(
    args: RegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let registration = ClientRegistration {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password: args.password,
        phone: args.phone,
        birth_date: args.birth_date,
        postal_address: args.address,
    };
    let client = ctx.service.register(registration).await?;
    output(&client, flags.format)
}
