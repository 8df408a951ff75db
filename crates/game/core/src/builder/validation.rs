//! Stateless construction validators.
//!
//! Every check is a pure function over explicit parameters. The factory runs
//! all of them before allocating a grid, so a rejected request leaves nothing
//! behind.

use crate::config::{PlaygroundConfig, PlaygroundParams};
use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::state::{AgentStats, ObjectId, ObjectKind};

/// Axis named in size errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Dimension {
    Width,
    Height,
}

/// Which agent statistic was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AgentStat {
    Speed,
    Stamina,
}

/// Invalid construction parameters or misuse of the one-time setup calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("map {dimension} {value} is outside [{min}, {max}]")]
    MapSizeOutOfRange {
        dimension: Dimension,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("blocks percentage {value} exceeds {max}")]
    BlocksPercentOutOfRange { value: u32, max: u32 },

    #[error("enemies percentage {value} exceeds {max}")]
    EnemiesPercentOutOfRange { value: u32, max: u32 },

    #[error("blocks ({blocks}%) plus enemies ({enemies}%) exceed {max}%")]
    OccupiedPercentOutOfRange { blocks: u32, enemies: u32, max: u32 },

    #[error("{role} {stat} must be positive")]
    NonPositiveAgentStat { role: ObjectKind, stat: AgentStat },

    #[error("{required} objects need placing but only {available} interior cells are free")]
    NotEnoughFreeCells { required: u32, available: u32 },

    #[error("hero already placed as {existing}")]
    HeroAlreadyPlaced { existing: ObjectId },

    #[error("exit already placed as {existing}")]
    ExitAlreadyPlaced { existing: ObjectId },
}

impl GameError for ConfigurationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapSizeOutOfRange { .. } => "CONFIG_MAP_SIZE_OUT_OF_RANGE",
            Self::BlocksPercentOutOfRange { .. } => "CONFIG_BLOCKS_PERCENT_OUT_OF_RANGE",
            Self::EnemiesPercentOutOfRange { .. } => "CONFIG_ENEMIES_PERCENT_OUT_OF_RANGE",
            Self::OccupiedPercentOutOfRange { .. } => "CONFIG_OCCUPIED_PERCENT_OUT_OF_RANGE",
            Self::NonPositiveAgentStat { .. } => "CONFIG_NON_POSITIVE_AGENT_STAT",
            Self::NotEnoughFreeCells { .. } => "CONFIG_NOT_ENOUGH_FREE_CELLS",
            Self::HeroAlreadyPlaced { .. } => "CONFIG_HERO_ALREADY_PLACED",
            Self::ExitAlreadyPlaced { .. } => "CONFIG_EXIT_ALREADY_PLACED",
        }
    }
}

pub fn validate_dimensions(width: u32, height: u32) -> Result<(), ConfigurationError> {
    for (dimension, value) in [(Dimension::Width, width), (Dimension::Height, height)] {
        if !(PlaygroundConfig::MIN_MAP_SIZE..=PlaygroundConfig::MAX_MAP_SIZE).contains(&value) {
            return Err(ConfigurationError::MapSizeOutOfRange {
                dimension,
                value,
                min: PlaygroundConfig::MIN_MAP_SIZE,
                max: PlaygroundConfig::MAX_MAP_SIZE,
            });
        }
    }
    Ok(())
}

pub fn validate_percentages(
    blocks_percent: u32,
    enemies_percent: u32,
) -> Result<(), ConfigurationError> {
    if blocks_percent > PlaygroundConfig::MAX_BLOCKS_PERCENT {
        return Err(ConfigurationError::BlocksPercentOutOfRange {
            value: blocks_percent,
            max: PlaygroundConfig::MAX_BLOCKS_PERCENT,
        });
    }
    if enemies_percent > PlaygroundConfig::MAX_ENEMIES_PERCENT {
        return Err(ConfigurationError::EnemiesPercentOutOfRange {
            value: enemies_percent,
            max: PlaygroundConfig::MAX_ENEMIES_PERCENT,
        });
    }
    if blocks_percent + enemies_percent > PlaygroundConfig::MAX_OCCUPIED_PERCENT {
        return Err(ConfigurationError::OccupiedPercentOutOfRange {
            blocks: blocks_percent,
            enemies: enemies_percent,
            max: PlaygroundConfig::MAX_OCCUPIED_PERCENT,
        });
    }
    Ok(())
}

/// Speed and stamina must be positive; any sight range is accepted.
pub fn validate_agent_stats(role: ObjectKind, stats: AgentStats) -> Result<(), ConfigurationError> {
    if stats.speed == 0 {
        return Err(ConfigurationError::NonPositiveAgentStat {
            role,
            stat: AgentStat::Speed,
        });
    }
    if stats.stamina == 0 {
        return Err(ConfigurationError::NonPositiveAgentStat {
            role,
            stat: AgentStat::Stamina,
        });
    }
    Ok(())
}

/// Checks that blocks, enemies, hero and exit fit in the non-border cells.
pub fn validate_capacity(
    width: u32,
    height: u32,
    blocks: u32,
    enemies: u32,
) -> Result<(), ConfigurationError> {
    let interior = width.saturating_sub(2) * height.saturating_sub(2);
    let required = blocks + enemies + 2;
    if required > interior {
        return Err(ConfigurationError::NotEnoughFreeCells {
            required,
            available: interior,
        });
    }
    Ok(())
}

/// Runs every construction check in order, failing on the first violation.
pub fn validate_params(params: &PlaygroundParams) -> Result<(), ConfigurationError> {
    validate_dimensions(params.width, params.height)?;
    validate_percentages(params.blocks_percent, params.enemies_percent)?;
    validate_agent_stats(ObjectKind::Hero, params.hero)?;
    if params.enemy_count() > 0 {
        validate_agent_stats(ObjectKind::Enemy, params.enemy)?;
    }
    validate_capacity(
        params.width,
        params.height,
        params.block_count(),
        params.enemy_count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_outside_limits_are_rejected() {
        assert!(validate_dimensions(3, 500).is_ok());
        assert_eq!(
            validate_dimensions(2, 10),
            Err(ConfigurationError::MapSizeOutOfRange {
                dimension: Dimension::Width,
                value: 2,
                min: 3,
                max: 500,
            })
        );
        assert!(matches!(
            validate_dimensions(10, 501),
            Err(ConfigurationError::MapSizeOutOfRange {
                dimension: Dimension::Height,
                ..
            })
        ));
    }

    #[test]
    fn percentages_are_bounded_individually_and_together() {
        assert!(validate_percentages(80, 0).is_ok());
        assert!(validate_percentages(50, 30).is_ok());
        assert!(matches!(
            validate_percentages(81, 0),
            Err(ConfigurationError::BlocksPercentOutOfRange { .. })
        ));
        assert!(matches!(
            validate_percentages(0, 31),
            Err(ConfigurationError::EnemiesPercentOutOfRange { .. })
        ));
        assert!(matches!(
            validate_percentages(60, 21),
            Err(ConfigurationError::OccupiedPercentOutOfRange { .. })
        ));
    }

    #[test]
    fn agent_stats_need_speed_and_stamina() {
        assert!(validate_agent_stats(ObjectKind::Hero, AgentStats::new(1, 0, 1)).is_ok());
        assert_eq!(
            validate_agent_stats(ObjectKind::Enemy, AgentStats::new(0, 3, 3)),
            Err(ConfigurationError::NonPositiveAgentStat {
                role: ObjectKind::Enemy,
                stat: AgentStat::Speed,
            })
        );
    }

    #[test]
    fn capacity_accounts_for_border_hero_and_exit() {
        assert!(validate_capacity(4, 4, 2, 0).is_ok());
        assert_eq!(
            validate_capacity(3, 3, 0, 0),
            Err(ConfigurationError::NotEnoughFreeCells {
                required: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn params_error_message_names_the_axis() {
        let err = validate_params(&PlaygroundParams::new(2, 31, 10, 0)).unwrap_err();
        assert_eq!(err.to_string(), "map width 2 is outside [3, 500]");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
