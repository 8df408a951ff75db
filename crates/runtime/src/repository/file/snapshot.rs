//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use playground_core::{PlaygroundId, PlaygroundSnapshot};
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, Result, SnapshotRepository};

/// On-disk encoding of snapshot files.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SnapshotFormat {
    /// Compact binary (bincode 1.x).
    #[default]
    Bincode,
    /// Pretty-printed JSON, for inspection.
    Json,
}

impl SnapshotFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Bincode => "bin",
            Self::Json => "json",
        }
    }

    fn encode(self, snapshot: &PlaygroundSnapshot) -> Result<Vec<u8>> {
        match self {
            Self::Bincode => bincode::serialize(snapshot)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            Self::Json => serde_json::to_vec_pretty(snapshot)
                .map_err(|e| RepositoryError::Json(e.to_string())),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<PlaygroundSnapshot> {
        match self {
            Self::Bincode => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            Self::Json => {
                serde_json::from_slice(bytes).map_err(|e| RepositoryError::Json(e.to_string()))
            }
        }
    }
}

/// File-based implementation of SnapshotRepository.
///
/// # File Format
///
/// Snapshots are stored as `playground_{id}_turn_{turn}.bin` (bincode) or
/// `playground_{id}_turn_{turn}.json`. Writes go to a temporary file first and
/// are renamed into place, so readers never observe a partial snapshot.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
    format: SnapshotFormat,
}

impl FileSnapshotRepository {
    /// Create a bincode repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_format(base_dir, SnapshotFormat::default())
    }

    pub fn with_format(base_dir: impl AsRef<Path>, format: SnapshotFormat) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir, format })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    fn prefix(id: PlaygroundId) -> String {
        format!("playground_{}_turn_", id.0)
    }

    /// Get the path to a snapshot file.
    fn snapshot_path(&self, id: PlaygroundId, turn: u64) -> PathBuf {
        self.base_dir.join(format!(
            "{}{}.{}",
            Self::prefix(id),
            turn,
            self.format.extension()
        ))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, snapshot: &PlaygroundSnapshot) -> Result<()> {
        let path = self.snapshot_path(snapshot.id, snapshot.turn);
        let temp_path = path.with_extension(format!("{}.tmp", self.format.extension()));

        let bytes = self.format.encode(snapshot)?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved {}[turn {}] to {}",
            snapshot.id,
            snapshot.turn,
            path.display()
        );

        Ok(())
    }

    fn load(&self, id: PlaygroundId, turn: u64) -> Result<Option<PlaygroundSnapshot>> {
        let path = self.snapshot_path(id, turn);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let snapshot = self.format.decode(&bytes)?;
        if snapshot.id != id || snapshot.turn != turn {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds {}[turn {}]",
                path.display(),
                snapshot.id,
                snapshot.turn
            )));
        }

        tracing::debug!("Loaded {}[turn {}] from {}", id, turn, path.display());

        Ok(Some(snapshot))
    }

    fn exists(&self, id: PlaygroundId, turn: u64) -> bool {
        self.snapshot_path(id, turn).exists()
    }

    fn delete(&self, id: PlaygroundId, turn: u64) -> Result<()> {
        let path = self.snapshot_path(id, turn);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted {}[turn {}]", id, turn);
        }

        Ok(())
    }

    fn list_turns(&self, id: PlaygroundId) -> Result<Vec<u64>> {
        let prefix = Self::prefix(id);
        let suffix = format!(".{}", self.format.extension());
        let mut turns = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(turn_str) = filename
                    .strip_prefix(prefix.as_str())
                    .and_then(|s| s.strip_suffix(suffix.as_str()))
                && let Ok(turn) = turn_str.parse::<u64>()
            {
                turns.push(turn);
            }
        }

        turns.sort_unstable();
        Ok(turns)
    }
}
