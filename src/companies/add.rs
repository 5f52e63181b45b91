use super::{add_reply, display_surface};
use crate::roster::AddOutcome;
use crate::{AppError, Context};

/// Add a company to the list
#[poise::command(slash_command, guild_only, rename = "companyadd")]
pub(crate) async fn company_add(
    ctx: Context<'_>,
    #[description = "Company name"]
    #[max_length = 100]
    name: String,
) -> Result<(), AppError> {
    let tracker = &ctx.data().tracker;
    let outcome = tracker.add_company(&name).await?;

    ctx.say(add_reply(&name, &outcome)).await?;

    if let AddOutcome::Added(_) = outcome {
        tracker.refresh_after_command(&display_surface(ctx)).await;
    }
    Ok(())
}
