use super::render::RosterDisplay;
use super::sync::DisplaySurface;
use crate::AppError;
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use serenity::all::{ChannelId, MessageId};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    next_id: u64,
    messages: BTreeMap<MessageId, (ChannelId, RosterDisplay)>,
    sends: usize,
    edits: usize,
    fail_sends: bool,
}

/// In-memory channel store standing in for Discord.
#[derive(Default)]
pub(crate) struct FakeSurface {
    inner: Mutex<Inner>,
}

impl FakeSurface {
    pub(crate) fn delete(&self, message: MessageId) {
        self.inner.lock().unwrap().messages.remove(&message);
    }

    pub(crate) fn fail_sends(&self, fail: bool) {
        self.inner.lock().unwrap().fail_sends = fail;
    }

    pub(crate) fn content(&self, message: MessageId) -> Option<RosterDisplay> {
        let inner = self.inner.lock().unwrap();
        inner.messages.get(&message).map(|(_, d)| d.clone())
    }

    pub(crate) fn live_messages(&self, channel: ChannelId) -> Vec<MessageId> {
        let inner = self.inner.lock().unwrap();
        inner
            .messages
            .iter()
            .filter(|(_, (c, _))| *c == channel)
            .map(|(id, _)| *id)
            .collect()
    }

    pub(crate) fn sends(&self) -> usize {
        self.inner.lock().unwrap().sends
    }

    pub(crate) fn edits(&self) -> usize {
        self.inner.lock().unwrap().edits
    }
}

#[async_trait]
impl DisplaySurface for FakeSurface {
    async fn edit(
        &self,
        channel: ChannelId,
        message: MessageId,
        display: &RosterDisplay,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.edits += 1;
        match inner.messages.get_mut(&message) {
            Some((c, content)) if *c == channel => {
                *content = display.clone();
                Ok(())
            }
            _ => bail!("Unknown Message"),
        }
    }

    async fn send(
        &self,
        channel: ChannelId,
        display: &RosterDisplay,
    ) -> Result<MessageId, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_sends {
            return Err(anyhow!("Missing Access"));
        }
        inner.sends += 1;
        inner.next_id += 1;
        let id = MessageId::new(1000 + inner.next_id);
        inner.messages.insert(id, (channel, display.clone()));
        Ok(id)
    }
}
