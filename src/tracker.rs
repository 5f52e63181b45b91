use crate::AppError;
use crate::roster::binding::DisplayBinding;
use crate::roster::render::render;
use crate::roster::sync::{DisplaySurface, UpsertOutcome, upsert};
use crate::roster::{AddOutcome, Roster};
use crate::storage::{Snapshot, SnapshotStore, StorageMode};
use anyhow::Context as _;
use serenity::all::ChannelId;
use tokio::sync::Mutex;

struct TrackerState {
    roster: Roster,
    binding: DisplayBinding,
}

fn snapshot(roster: &Roster, binding: &DisplayBinding) -> Snapshot {
    let mut snapshot = Snapshot {
        companies: roster.entries().to_vec(),
        ..Default::default()
    };
    binding.write_to(&mut snapshot);
    snapshot
}

/// The company list, its display binding, and where both are persisted.
///
/// Every operation holds the state lock for its whole duration, so commands
/// handled concurrently still observe each other's writes in order.
pub(crate) struct Tracker {
    state: Mutex<TrackerState>,
    store: Box<dyn SnapshotStore>,
}

impl Tracker {
    /// Restores whatever `store` holds. An unreadable snapshot is logged and
    /// the tracker starts empty; the file is left alone until the next write.
    pub(crate) fn load(store: Box<dyn SnapshotStore>) -> Self {
        let snapshot = match store.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => Snapshot::default(),
            Err(err) => {
                tracing::error!("couldn't restore saved companies, starting empty: {err}");
                Snapshot::default()
            }
        };

        let state = TrackerState {
            roster: Roster::from_entries(&snapshot.companies),
            binding: DisplayBinding::from_snapshot(&snapshot),
        };
        tracing::info!(
            mode = %store.mode(),
            companies = state.roster.len(),
            channel = ?state.binding.channel(),
            "loaded company tracker"
        );

        Self {
            state: Mutex::new(state),
            store,
        }
    }

    fn persist(&self, roster: &Roster, binding: &DisplayBinding) -> Result<(), AppError> {
        self.store
            .save(&snapshot(roster, binding))
            .context("save company tracker snapshot")
    }

    /// Adds `name` unless it is blank, too long or already listed. The add only
    /// takes effect once it has been written to the store.
    pub(crate) async fn add_company(&self, name: &str) -> Result<AddOutcome, AppError> {
        let mut state = self.state.lock().await;
        let mut roster = state.roster.clone();
        let outcome = roster.add(name);
        match &outcome {
            AddOutcome::Added(added) => {
                self.persist(&roster, &state.binding)?;
                state.roster = roster;
                tracing::info!(company = %added, total = state.roster.len(), "added company");
            }
            AddOutcome::Duplicate(existing) => {
                tracing::debug!(company = %existing, "ignoring duplicate company")
            }
            AddOutcome::Blank | AddOutcome::TooLong => {
                tracing::debug!("ignoring unusable company name")
            }
        }
        Ok(outcome)
    }

    pub(crate) async fn check_company(&self, name: &str) -> bool {
        self.state.lock().await.roster.contains(name)
    }

    /// Binds the display to `channel`. Switching to another channel drops the
    /// tracked message so the next refresh posts a new one there.
    pub(crate) async fn set_display_channel(&self, channel: ChannelId) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let mut binding = state.binding;
        binding.bind(channel);
        self.persist(&state.roster, &binding)?;
        state.binding = binding;
        tracing::info!(%channel, "display channel set");
        Ok(())
    }

    /// Brings the bound channel's embed up to date. Returns `Ok(None)` when no
    /// channel is bound.
    pub(crate) async fn refresh_display(
        &self,
        surface: &dyn DisplaySurface,
    ) -> Result<Option<UpsertOutcome>, AppError> {
        let mut state = self.state.lock().await;
        let Some(channel) = state.binding.channel() else {
            return Ok(None);
        };

        let display = render(&state.roster);
        let outcome = upsert(surface, channel, state.binding.message(), &display).await?;
        if let UpsertOutcome::Recreated { stale, .. } = outcome {
            tracing::info!(%channel, %stale, "roster message was gone, replaced it");
        }
        if outcome.is_new_message() {
            // the new message exists either way, so track it even if saving fails
            state.binding.adopt(outcome.message());
            self.persist(&state.roster, &state.binding)?;
            tracing::info!(%channel, message = %outcome.message(), "now tracking roster message");
        }
        Ok(Some(outcome))
    }

    /// Refreshes after a command has been answered. Failures are only logged;
    /// the user already has their reply.
    pub(crate) async fn refresh_after_command(&self, surface: &dyn DisplaySurface) {
        if let Err(err) = self.refresh_display(surface).await {
            tracing::error!("couldn't update the company list message: {err:#}");
        }
    }

    /// One refresh attempt at startup against the restored channel.
    pub(crate) async fn restore_display(&self, surface: &dyn DisplaySurface) {
        match self.refresh_display(surface).await {
            Ok(Some(outcome)) => {
                tracing::info!(message = %outcome.message(), "restored company list embed")
            }
            Ok(None) => tracing::info!("no display channel set, nothing to restore"),
            Err(err) => tracing::error!("failed to restore company list embed: {err:#}"),
        }
    }

    pub(crate) fn storage_mode(&self) -> StorageMode {
        self.store.mode()
    }

    #[cfg(test)]
    async fn companies(&self) -> Vec<String> {
        self.state.lock().await.roster.entries().to_vec()
    }

    #[cfg(test)]
    async fn display_channel(&self) -> Option<ChannelId> {
        self.state.lock().await.binding.channel()
    }

    #[cfg(test)]
    async fn binding(&self) -> DisplayBinding {
        self.state.lock().await.binding
    }
}
