use super::render::RosterDisplay;
use super::sync::DisplaySurface;
use crate::AppError;
use anyhow::Context as _;
use async_trait::async_trait;
use serenity::all::{ChannelId, CreateMessage, EditMessage, Http, MessageId};
use std::sync::Arc;

/// Posts the roster embed through the bot's REST client.
pub(crate) struct SerenityDisplay {
    http: Arc<Http>,
}

impl SerenityDisplay {
    pub(crate) fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DisplaySurface for SerenityDisplay {
    async fn edit(
        &self,
        channel: ChannelId,
        message: MessageId,
        display: &RosterDisplay,
    ) -> Result<(), AppError> {
        channel
            .edit_message(
                &*self.http,
                message,
                EditMessage::new().embed(display.to_embed()),
            )
            .await
            .with_context(|| format!("edit roster message {message} in {channel}"))?;
        Ok(())
    }

    async fn send(
        &self,
        channel: ChannelId,
        display: &RosterDisplay,
    ) -> Result<MessageId, AppError> {
        let sent = channel
            .send_message(&*self.http, CreateMessage::new().embed(display.to_embed()))
            .await
            .with_context(|| format!("send roster message to {channel}"))?;
        Ok(sent.id)
    }
}
