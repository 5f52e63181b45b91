use crate::storage::{Snapshot, parse_snowflake};
use serenity::all::{ChannelId, MessageId};

/// Where the roster embed lives.
///
/// `Unbound` until a channel is set, then `Bound` with no message until the
/// first embed is sent, after which the message id is reused for edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum DisplayBinding {
    #[default]
    Unbound,
    Bound {
        channel: ChannelId,
        message: Option<MessageId>,
    },
}

impl DisplayBinding {
    /// Points the display at `channel`. Moving to a different channel forgets
    /// the tracked message so a new embed is sent there; re-binding the same
    /// channel keeps it.
    pub(crate) fn bind(&mut self, channel: ChannelId) {
        let message = match *self {
            DisplayBinding::Bound {
                channel: current,
                message,
            } if current == channel => message,
            _ => None,
        };
        *self = DisplayBinding::Bound { channel, message };
    }

    /// Records the id of a freshly sent embed. No-op while unbound.
    pub(crate) fn adopt(&mut self, new_message: MessageId) {
        if let DisplayBinding::Bound { message, .. } = self {
            *message = Some(new_message);
        }
    }

    pub(crate) fn channel(&self) -> Option<ChannelId> {
        match self {
            DisplayBinding::Unbound => None,
            DisplayBinding::Bound { channel, .. } => Some(*channel),
        }
    }

    pub(crate) fn message(&self) -> Option<MessageId> {
        match self {
            DisplayBinding::Unbound => None,
            DisplayBinding::Bound { message, .. } => *message,
        }
    }

    /// A stored message id without a channel is meaningless and is dropped.
    pub(crate) fn from_snapshot(snapshot: &Snapshot) -> Self {
        let Some(channel) = snapshot.channel_id.as_deref().and_then(parse_snowflake) else {
            return DisplayBinding::Unbound;
        };

        DisplayBinding::Bound {
            channel: ChannelId::new(channel.get()),
            message: snapshot
                .message_id
                .as_deref()
                .and_then(parse_snowflake)
                .map(|id| MessageId::new(id.get())),
        }
    }

    pub(crate) fn write_to(&self, snapshot: &mut Snapshot) {
        snapshot.channel_id = self.channel().map(|id| id.to_string());
        snapshot.message_id = self.message().map(|id| id.to_string());
    }
}
