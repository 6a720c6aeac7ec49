//! Scoring module - line clear points, drop bonuses and level progression
//!
//! Line clears are scored from a tiered table scaled by `level + 1`. The
//! table is convex: a four-line clear pays more than four single clears at
//! the same level, so stacking for multi-line clears is always worth it.
//!
//! Gravity speeds up by a fixed step per level and bottoms out at a floor.

use tracing::debug;

use crate::config::{EngineConfig, GravityConfig, ProgressionRule};
use crate::types::{HARD_DROP_POINTS, SOFT_DROP_POINTS};

/// Calculate line clear score
/// lines: number of lines cleared (0-4)
/// level: current level (0-based)
pub fn line_clear_score(table: &[u32; 5], lines: usize, level: u32) -> u32 {
    match table.get(lines) {
        Some(&base) => base.saturating_mul(level.saturating_add(1)),
        None => 0,
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Score, level and gravity state for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    gravity: GravityConfig,
    rule: ProgressionRule,
    line_scores: [u32; 5],
    score: u32,
    level: u32,
    lines: u32,
    /// Played time not yet converted into levels (elapsed rule only).
    elapsed_ms: u32,
    interval_ms: u32,
}

impl Progression {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            gravity: config.gravity,
            rule: config.progression,
            line_scores: config.line_scores,
            score: 0,
            level: 0,
            lines: 0,
            elapsed_ms: 0,
            interval_ms: config.gravity.interval_ms(0),
        }
    }

    /// Back to level 0 with no score.
    pub fn reset(&mut self) {
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.elapsed_ms = 0;
        self.interval_ms = self.gravity.interval_ms(0);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current time per automatic downward step.
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Record the lines cleared by one lock and return the points awarded.
    ///
    /// Points use the level in effect before the clear.
    pub fn record_clear(&mut self, lines: usize) -> u32 {
        if lines == 0 {
            return 0;
        }

        let points = line_clear_score(&self.line_scores, lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines as u32);

        if let ProgressionRule::Lines { per_level } = self.rule {
            self.raise_level_to(self.lines / per_level.max(1));
        }

        points
    }

    /// Add drop bonus points for `cells` rows travelled.
    pub fn record_drop(&mut self, cells: u32, is_hard_drop: bool) -> u32 {
        let points = drop_score(cells, is_hard_drop);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Account for played time. Returns true if the level went up.
    pub fn advance_time(&mut self, elapsed_ms: u32) -> bool {
        let ProgressionRule::Elapsed { every_ms } = self.rule else {
            return false;
        };
        let every_ms = every_ms.max(1);

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let gained = self.elapsed_ms / every_ms;
        if gained == 0 {
            return false;
        }
        self.elapsed_ms %= every_ms;
        self.raise_level_to(self.level.saturating_add(gained));
        true
    }

    fn raise_level_to(&mut self, level: u32) {
        if level <= self.level {
            return;
        }
        self.level = level;
        self.interval_ms = self.gravity.interval_ms(level);
        debug!(
            level = self.level,
            interval_ms = self.interval_ms,
            "level up"
        );
    }
}
