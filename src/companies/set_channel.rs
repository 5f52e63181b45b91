use super::{channel_set_reply, display_surface};
use crate::{AppError, Context};
use serenity::all::GuildChannel;

/// Set the channel where the company list should be displayed
#[poise::command(slash_command, guild_only, rename = "companysetchannel")]
pub(crate) async fn company_set_channel(
    ctx: Context<'_>,
    #[description = "Select a channel for the company list embed"]
    #[channel_types("Text", "News")]
    channel: GuildChannel,
) -> Result<(), AppError> {
    let tracker = &ctx.data().tracker;
    tracker.set_display_channel(channel.id).await?;

    ctx.say(channel_set_reply(channel.id)).await?;

    tracker.refresh_after_command(&display_surface(ctx)).await;
    Ok(())
}
