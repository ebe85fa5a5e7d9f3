//! Session configuration
//!
//! Everything a game needs to know up front. Values are parsed by the
//! binary; this module only owns the defaults and the sanity checks.

use std::time::Duration;

use thiserror::Error;

use crate::types::*;

/// Lifetime and spawn chance of one temporal item kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSettings {
    /// Seconds the item stays on the field
    pub duration_secs: u64,
    /// 1-in-N chance of spawning each time food is eaten
    pub one_in: u32,
}

impl ItemSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub height: u16,
    pub width: u16,
    pub permill_obstacles: u16,
    pub starting_delay_ms: u32,
    pub minimum_delay_ms: u32,
    pub step_delay_ms: u32,
    pub shortener: ItemSettings,
    pub decelerator: ItemSettings,
    pub bonus_points: ItemSettings,
    pub score_step_map_change: u32,
    pub map_change: bool,
    pub two_players: bool,
}

/// Configuration values the session cannot run with
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("field must be at least {min}x{min}, got {height}x{width}")]
    FieldTooSmall { height: u16, width: u16, min: u16 },
    #[error("obstacle density {0} exceeds 1000 permill")]
    TooManyObstacles(u16),
    #[error("minimum delay {minimum}ms is above the starting delay {starting}ms")]
    DelayOrder { minimum: u32, starting: u32 },
    #[error("{kind} probability must be 1 in at least 1")]
    ZeroProbability { kind: &'static str },
    #[error("score step between map changes must be positive")]
    ZeroMapChangeStep,
}

impl GameConfig {
    /// Settings for one item kind
    pub fn item(&self, kind: ItemKind) -> ItemSettings {
        match kind {
            ItemKind::Shortener => self.shortener,
            ItemKind::Decelerator => self.decelerator,
            ItemKind::BonusPoints => self.bonus_points,
        }
    }

    pub fn players(&self) -> &'static [PlayerId] {
        if self.two_players {
            &[PlayerId::One, PlayerId::Two]
        } else {
            &[PlayerId::One]
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height < MIN_FIELD_SIDE || self.width < MIN_FIELD_SIDE {
            return Err(ConfigError::FieldTooSmall {
                height: self.height,
                width: self.width,
                min: MIN_FIELD_SIDE,
            });
        }
        if self.permill_obstacles > 1000 {
            return Err(ConfigError::TooManyObstacles(self.permill_obstacles));
        }
        if self.minimum_delay_ms > self.starting_delay_ms {
            return Err(ConfigError::DelayOrder {
                minimum: self.minimum_delay_ms,
                starting: self.starting_delay_ms,
            });
        }
        for kind in ItemKind::ALL {
            if self.item(kind).one_in == 0 {
                return Err(ConfigError::ZeroProbability {
                    kind: kind.as_str(),
                });
            }
        }
        if self.map_change && self.score_step_map_change == 0 {
            return Err(ConfigError::ZeroMapChangeStep);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            permill_obstacles: DEFAULT_PERMILL_OBSTACLES,
            starting_delay_ms: DEFAULT_STARTING_DELAY_MS,
            minimum_delay_ms: DEFAULT_MINIMUM_DELAY_MS,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            shortener: ItemSettings {
                duration_secs: DEFAULT_DURATION_SHORTENER_SECS,
                one_in: DEFAULT_PROBABILITY_SHORTENER,
            },
            decelerator: ItemSettings {
                duration_secs: DEFAULT_DURATION_DECELERATOR_SECS,
                one_in: DEFAULT_PROBABILITY_DECELERATOR,
            },
            bonus_points: ItemSettings {
                duration_secs: DEFAULT_DURATION_EXTRA_POINTS_SECS,
                one_in: DEFAULT_PROBABILITY_EXTRA_POINTS,
            },
            score_step_map_change: DEFAULT_SCORE_STEP_MAP_CHANGE,
            map_change: true,
            two_players: false,
        }
    }
}
