use crate::util::text::{bot_invite_url, invite_permissions};
use pluralizer::pluralize;
use serenity::all::{Context, EventHandler, Ready};
use serenity::async_trait;

pub(crate) struct TrackerEventHandler;

#[async_trait]
impl EventHandler for TrackerEventHandler {
    async fn ready(&self, _ctx: Context, ready_info: Ready) {
        tracing::info!(
            "ok, connected as {} (UID {})",
            ready_info.user.tag(),
            ready_info.user.id
        );
        tracing::info!("using discord API version {}", ready_info.version);
        tracing::info!(
            "invite link: {}",
            bot_invite_url(ready_info.user.id, invite_permissions(), true)
        );

        // one roster is shared by every guild the bot sits in
        if ready_info.guilds.len() > 1 {
            tracing::warn!(
                "joined {}, but the company list is shared between all of them",
                pluralize("guild", ready_info.guilds.len() as isize, true)
            );
        }
    }
}
