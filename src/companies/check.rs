use super::check_reply;
use crate::{AppError, Context};

/// Check if a company is already in the list
#[poise::command(slash_command, guild_only, rename = "checkcompany")]
pub(crate) async fn check_company(
    ctx: Context<'_>,
    #[description = "Company name"]
    #[max_length = 100]
    name: String,
) -> Result<(), AppError> {
    let present = ctx.data().tracker.check_company(&name).await;
    ctx.say(check_reply(&name, present)).await?;
    Ok(())
}
