//! Runtime configuration and its environment loader.

use std::env;
use std::path::PathBuf;

use playground_core::PlaygroundParams;

use crate::repository::SnapshotFormat;

/// Settings for running episodes.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Construction parameters of each episode's playground.
    pub params: PlaygroundParams,
    /// Turn cap per episode; the core itself has none.
    pub max_turns: u64,
    pub episodes: u32,
    /// Where final snapshots go. `None` disables persistence.
    pub snapshot_dir: Option<PathBuf>,
    pub snapshot_format: SnapshotFormat,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            params: PlaygroundParams::default(),
            max_turns: 200,
            episodes: 1,
            snapshot_dir: None,
            snapshot_format: SnapshotFormat::default(),
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PLAYGROUND_WIDTH` / `PLAYGROUND_HEIGHT` - Map size (default: 31)
    /// - `PLAYGROUND_BLOCKS_PERCENT` - Block density (default: 10)
    /// - `PLAYGROUND_ENEMIES_PERCENT` - Enemy density (default: 1)
    /// - `PLAYGROUND_SEED` - Placement and policy seed (default: 0)
    /// - `PLAYGROUND_MAX_TURNS` - Turn cap per episode (default: 200)
    /// - `PLAYGROUND_EPISODES` - Episodes to run (default: 1)
    /// - `PLAYGROUND_SNAPSHOT_DIR` - Save final snapshots here (default: unset)
    /// - `PLAYGROUND_SNAPSHOT_FORMAT` - `bincode` or `json` (default: bincode)
    ///
    /// Unparsable values are ignored. Range checks happen when a playground is
    /// built, not here.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Playground parameters
        if let Some(width) = read_env::<u32>("PLAYGROUND_WIDTH") {
            config.params.width = width;
        }
        if let Some(height) = read_env::<u32>("PLAYGROUND_HEIGHT") {
            config.params.height = height;
        }
        if let Some(percent) = read_env::<u32>("PLAYGROUND_BLOCKS_PERCENT") {
            config.params.blocks_percent = percent;
        }
        if let Some(percent) = read_env::<u32>("PLAYGROUND_ENEMIES_PERCENT") {
            config.params.enemies_percent = percent;
        }
        if let Some(seed) = read_env::<u64>("PLAYGROUND_SEED") {
            config.params.seed = seed;
        }

        // Episode control
        if let Some(max_turns) = read_env::<u64>("PLAYGROUND_MAX_TURNS") {
            config.max_turns = max_turns.max(1);
        }
        if let Some(episodes) = read_env::<u32>("PLAYGROUND_EPISODES") {
            config.episodes = episodes.max(1);
        }

        // Persistence
        if let Some(dir) = env::var_os("PLAYGROUND_SNAPSHOT_DIR").filter(|dir| !dir.is_empty()) {
            config.snapshot_dir = Some(PathBuf::from(dir));
        }
        if let Some(format) = read_env::<SnapshotFormat>("PLAYGROUND_SNAPSHOT_FORMAT") {
            config.snapshot_format = format;
        }

        config
    }

    /// Parameters for the `episode`-th run: same layout settings, distinct seed.
    pub fn episode_params(&self, episode: u32) -> PlaygroundParams {
        self.params
            .with_seed(self.params.seed.wrapping_add(u64::from(episode)))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
