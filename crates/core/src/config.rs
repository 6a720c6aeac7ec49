//! Engine configuration.
//!
//! Every knob has a default matching the standard game, so an empty JSON
//! object (`{}`) is a valid config. Validation happens once, before the
//! engine is built; a config that passes `validate()` cannot make a tick fail.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    BASE_GRAVITY_MS, BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_FLOOR_MS, GRAVITY_STEP_MS, LINES_PER_LEVEL,
    LINE_SCORES, MAX_BOARD_DIM,
};

/// Which random piece source the engine builds from the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomizerKind {
    /// Shuffled bags of all seven kinds.
    #[default]
    Bag,
    /// Independent uniform draws.
    Uniform,
}

/// Gravity interval as a function of level: `max(floor, base - level * step)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GravityConfig {
    pub base_ms: u32,
    pub step_ms: u32,
    pub floor_ms: u32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            base_ms: BASE_GRAVITY_MS,
            step_ms: GRAVITY_STEP_MS,
            floor_ms: GRAVITY_FLOOR_MS,
        }
    }
}

impl GravityConfig {
    /// Gravity interval for `level`. Never below `floor_ms`.
    pub fn interval_ms(&self, level: u32) -> u32 {
        self.base_ms
            .saturating_sub(level.saturating_mul(self.step_ms))
            .max(self.floor_ms)
    }
}

/// What advances the level counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionRule {
    /// One level per `per_level` cleared lines.
    Lines { per_level: u32 },
    /// One level per `every_ms` of played time.
    Elapsed { every_ms: u32 },
}

impl Default for ProgressionRule {
    fn default() -> Self {
        ProgressionRule::Lines {
            per_level: LINES_PER_LEVEL,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Columns. Signed so that a negative value in a config file is reported
    /// as a dimension error rather than a parse error.
    pub width: i32,
    /// Rows.
    pub height: i32,
    pub seed: u32,
    pub randomizer: RandomizerKind,
    pub gravity: GravityConfig,
    pub progression: ProgressionRule,
    /// Points per lines-cleared count (index 0..=4), scaled by `level + 1`.
    pub line_scores: [u32; 5],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH as i32,
            height: BOARD_HEIGHT as i32,
            seed: 1,
            randomizer: RandomizerKind::default(),
            gravity: GravityConfig::default(),
            progression: ProgressionRule::default(),
            line_scores: LINE_SCORES,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_core::EngineConfig;
    ///
    /// let cfg = EngineConfig::from_json_str(r#"{ "seed": 7, "randomizer": "uniform" }"#).unwrap();
    /// assert_eq!(cfg.seed, 7);
    /// assert_eq!(cfg.width, 10);
    ///
    /// assert!(EngineConfig::from_json_str(r#"{ "width": 0 }"#).is_err());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run.
    ///
    /// The board-width-versus-piece check needs the shape table and is done
    /// by the driver at construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let max = MAX_BOARD_DIM as i32;
        if self.width > max || self.height > max {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
                max,
            });
        }

        let g = self.gravity;
        if g.floor_ms == 0 || g.floor_ms > g.base_ms {
            return Err(ConfigError::InvalidGravity {
                base_ms: g.base_ms,
                floor_ms: g.floor_ms,
            });
        }
        if g.step_ms == 0 {
            return Err(ConfigError::InvalidGravityStep);
        }

        match self.progression {
            ProgressionRule::Lines { per_level: 0 } | ProgressionRule::Elapsed { every_ms: 0 } => {
                return Err(ConfigError::InvalidProgression);
            }
            _ => {}
        }

        let s = self.line_scores;
        let non_decreasing = s.windows(2).all(|w| w[0] <= w[1]);
        let convex = (2..=4u32).all(|n| s[n as usize] > s[1].saturating_mul(n));
        if !non_decreasing || !convex {
            return Err(ConfigError::ScoringNotConvex(s));
        }

        Ok(())
    }

    /// Board dimensions as `(columns, rows)`. Only meaningful after `validate()`.
    pub fn board_dims(&self) -> (usize, usize) {
        (self.width.max(0) as usize, self.height.max(0) as usize)
    }
}
