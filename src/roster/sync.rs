use super::render::RosterDisplay;
use crate::AppError;
use async_trait::async_trait;
use serenity::all::{ChannelId, MessageId};

/// Somewhere the roster embed can be posted and edited.
#[async_trait]
pub(crate) trait DisplaySurface: Send + Sync {
    /// Replace the contents of an existing message.
    async fn edit(
        &self,
        channel: ChannelId,
        message: MessageId,
        display: &RosterDisplay,
    ) -> Result<(), AppError>;

    /// Post a new message, returning its id.
    async fn send(&self, channel: ChannelId, display: &RosterDisplay)
    -> Result<MessageId, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpsertOutcome {
    /// The tracked message was edited in place.
    Edited(MessageId),
    /// Nothing was tracked yet, so a message was sent.
    Sent(MessageId),
    /// The tracked message could not be edited and was replaced.
    Recreated { stale: MessageId, message: MessageId },
}

impl UpsertOutcome {
    pub(crate) fn message(&self) -> MessageId {
        match self {
            UpsertOutcome::Edited(id) | UpsertOutcome::Sent(id) => *id,
            UpsertOutcome::Recreated { message, .. } => *message,
        }
    }

    /// Whether the caller has to start tracking a different message.
    pub(crate) fn is_new_message(&self) -> bool {
        !matches!(self, UpsertOutcome::Edited(_))
    }
}

/// Edits the tracked message if there is one, otherwise (or if the edit fails
/// for any reason) sends a fresh one. Only a failed send is an error.
pub(crate) async fn upsert(
    surface: &dyn DisplaySurface,
    channel: ChannelId,
    tracked: Option<MessageId>,
    display: &RosterDisplay,
) -> Result<UpsertOutcome, AppError> {
    let Some(stale) = tracked else {
        let message = surface.send(channel, display).await?;
        return Ok(UpsertOutcome::Sent(message));
    };

    match surface.edit(channel, stale, display).await {
        Ok(()) => Ok(UpsertOutcome::Edited(stale)),
        Err(err) => {
            tracing::warn!(
                %channel,
                message = %stale,
                "couldn't edit roster message, sending a new one: {err:#}"
            );
            let message = surface.send(channel, display).await?;
            Ok(UpsertOutcome::Recreated { stale, message })
        }
    }
}
