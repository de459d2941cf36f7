use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PredictArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `positif predict`.
///
/// A gateway failure is reported as `"predictions": null`, not as an error.
pub async fn handle(
    args: &PredictArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let predictions = ctx
        .service
        .predictions_for(&args.client, args.love, args.health, args.work)
        .await?;
    output(
        &json!({
            "client_id": args.client,
            "predictions": predictions,
        }),
        flags.format,
    )
}
