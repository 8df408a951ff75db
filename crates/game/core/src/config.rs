use crate::state::AgentStats;

/// Playground limits and tunable defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaygroundConfig;

impl PlaygroundConfig {
    // ===== construction limits =====
    pub const MIN_MAP_SIZE: u32 = 3;
    pub const MAX_MAP_SIZE: u32 = 500;
    pub const MAX_BLOCKS_PERCENT: u32 = 80;
    pub const MAX_ENEMIES_PERCENT: u32 = 30;
    /// Upper bound on blocks% + enemies%.
    pub const MAX_OCCUPIED_PERCENT: u32 = 80;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAP_SIZE: u32 = 31;
    pub const DEFAULT_BLOCKS_PERCENT: u32 = 10;
    pub const DEFAULT_ENEMIES_PERCENT: u32 = 1;
    pub const DEFAULT_HERO_STATS: AgentStats = AgentStats::new(1, 5, 10);
    pub const DEFAULT_ENEMY_STATS: AgentStats = AgentStats::new(1, 4, 8);
}

/// Construction parameters for a standard playground.
///
/// Validated as a whole by
/// [`validate_params`](crate::builder::validate_params) before anything is
/// allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaygroundParams {
    pub width: u32,
    pub height: u32,
    pub blocks_percent: u32,
    pub enemies_percent: u32,
    pub hero: AgentStats,
    pub enemy: AgentStats,
    /// Seed of the placement generator; equal seeds give equal layouts.
    pub seed: u64,
}

impl PlaygroundParams {
    pub fn new(width: u32, height: u32, blocks_percent: u32, enemies_percent: u32) -> Self {
        Self {
            width,
            height,
            blocks_percent,
            enemies_percent,
            ..Self::default()
        }
    }

    pub fn with_hero(mut self, hero: AgentStats) -> Self {
        self.hero = hero;
        self
    }

    pub fn with_enemy(mut self, enemy: AgentStats) -> Self {
        self.enemy = enemy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn area(&self) -> u32 {
        self.width.saturating_mul(self.height)
    }

    /// `round(area × blocks% / 100)`.
    pub fn block_count(&self) -> u32 {
        percent_of(self.area(), self.blocks_percent)
    }

    /// `round(area × enemies% / 100)`.
    pub fn enemy_count(&self) -> u32 {
        percent_of(self.area(), self.enemies_percent)
    }
}

impl Default for PlaygroundParams {
    fn default() -> Self {
        Self {
            width: PlaygroundConfig::DEFAULT_MAP_SIZE,
            height: PlaygroundConfig::DEFAULT_MAP_SIZE,
            blocks_percent: PlaygroundConfig::DEFAULT_BLOCKS_PERCENT,
            enemies_percent: PlaygroundConfig::DEFAULT_ENEMIES_PERCENT,
            hero: PlaygroundConfig::DEFAULT_HERO_STATS,
            enemy: PlaygroundConfig::DEFAULT_ENEMY_STATS,
            seed: 0,
        }
    }
}

/// Percentage of `total`, rounded half up.
pub fn percent_of(total: u32, percent: u32) -> u32 {
    ((u64::from(total) * u64::from(percent) + 50) / 100) as u32
}
