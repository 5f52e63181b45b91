use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{fs, io};

/// On-disk shape of the tracker state. Field names and the string encoding of
/// snowflakes match `companies.json` as written by earlier versions of the bot.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snapshot {
    #[serde(default)]
    pub(crate) companies: Vec<String>,
    #[serde(default)]
    pub(crate) channel_id: Option<String>,
    #[serde(default)]
    pub(crate) message_id: Option<String>,
}

/// Parses a stored snowflake, rejecting zero and anything non-numeric.
pub(crate) fn parse_snowflake(raw: &str) -> Option<NonZeroU64> {
    raw.trim().parse::<NonZeroU64>().ok()
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum StorageError {
    #[error("could not read snapshot at {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write snapshot to {}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("snapshot at {} is not valid JSON", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not encode snapshot")]
    Encode(#[from] serde_json::Error),
}

pub(crate) trait SnapshotStore: Send + Sync {
    /// `Ok(None)` means there is nothing to restore.
    fn load(&self) -> Result<Option<Snapshot>, StorageError>;

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;

    fn mode(&self) -> StorageMode;
}

/// Writes the whole snapshot as pretty JSON on every save.
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let encoded = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, encoded).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn mode(&self) -> StorageMode {
        StorageMode::Persistent
    }
}

/// Keeps nothing; state lives only as long as the process.
pub(crate) struct EphemeralStore;

impl SnapshotStore for EphemeralStore {
    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        Ok(None)
    }

    fn save(&self, _snapshot: &Snapshot) -> Result<(), StorageError> {
        Ok(())
    }

    fn mode(&self) -> StorageMode {
        StorageMode::Ephemeral
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum StorageMode {
    #[default]
    Persistent,
    Ephemeral,
}

impl StorageMode {
    pub(crate) fn open(self, path: &Path) -> Box<dyn SnapshotStore> {
        match self {
            StorageMode::Persistent => Box::new(FileStore::new(path)),
            StorageMode::Ephemeral => Box::new(EphemeralStore),
        }
    }
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "persistent" | "file" => Ok(StorageMode::Persistent),
            "ephemeral" | "memory" => Ok(StorageMode::Ephemeral),
            other => Err(format!(
                "unknown storage mode {other:?}, expected \"persistent\" or \"ephemeral\""
            )),
        }
    }
}

impl Display for StorageMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StorageMode::Persistent => "persistent",
            StorageMode::Ephemeral => "ephemeral",
        })
    }
}
