//! Game loop driver - owns the board and the active piece
//!
//! One [`Game::tick`] applies the commands collected since the previous tick,
//! then advances gravity:
//!
//! 1. Commands run in the fixed order of [`Command::ALL`], at most one of each
//!    kind. Every move or rotation is checked with the collision validator and
//!    either applied whole or rejected.
//! 2. Elapsed time accumulates towards the gravity interval. When it is
//!    reached the accumulator resets and the piece tries one step down.
//! 3. A downward step that fails locks the piece: merge, clear full rows,
//!    score, then spawn the next piece.
//! 4. A spawned piece that does not fit ends the game.
//!
//! If a command locks the piece, the rest of that tick (remaining commands
//! and the gravity step) is skipped.

use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::collision::{drop_distance, is_valid_placement};
use crate::config::EngineConfig;
use crate::error::{ConfigError, GameError};
use crate::lock::merge_piece;
use crate::pieces::{Piece, ShapeTable};
use crate::rng::{PieceSource, Randomizer};
use crate::scoring::Progression;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot, Phase};
use crate::types::{Command, InputFrame, PieceKind, Rotation};

/// A piece was merged into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u8,
    /// Line clear points awarded for this lock (drop bonuses excluded).
    pub score_delta: u32,
    /// Part of the piece was still above the board; the game is over.
    pub overflow: bool,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub accepted: u8,
    pub rejected: u8,
    /// The gravity interval elapsed and a downward step was attempted.
    pub gravity_step: bool,
    pub lock: Option<LockEvent>,
}

/// Complete game: board, active piece, piece source and progression.
#[derive(Debug, Clone)]
pub struct Game<S: PieceSource = Randomizer> {
    config: EngineConfig,
    shapes: Arc<ShapeTable>,
    board: Board,
    active: Option<Piece>,
    next: PieceKind,
    source: S,
    progression: Progression,
    /// Time accumulated towards the next gravity step.
    gravity_ms: u32,
    phase: Phase,
    last_lock: Option<LockEvent>,
}

impl Game<Randomizer> {
    /// Build a game whose pieces come from the randomizer named in `config`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let source = Randomizer::new(config.randomizer, config.seed);
        Self::with_source(config, source)
    }
}

impl<S: PieceSource> Game<S> {
    /// Build a game drawing pieces from `source`, with the standard shapes.
    pub fn with_source(config: EngineConfig, source: S) -> Result<Self, ConfigError> {
        let shapes = Arc::new(ShapeTable::standard()?);
        Self::with_shapes(config, shapes, source)
    }

    /// Build a game on a shared shape table.
    pub fn with_shapes(
        config: EngineConfig,
        shapes: Arc<ShapeTable>,
        source: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let required = shapes.max_box_size();
        if config.width < required {
            return Err(ConfigError::BoardTooNarrow {
                width: config.width,
                required,
            });
        }
        // Every piece must fit the well in every orientation.
        if config.height < required {
            return Err(ConfigError::BoardTooShallow {
                height: config.height,
                required,
            });
        }

        let (width, height) = config.board_dims();
        let board = Board::new(width, height)?;
        let progression = Progression::new(&config);

        let mut game = Self {
            config,
            shapes,
            board,
            active: None,
            next: PieceKind::I,
            source,
            progression,
            gravity_ms: 0,
            phase: Phase::Spawning,
            last_lock: None,
        };
        game.reset();
        Ok(game)
    }

    /// Start over: empty board, level 0, no score, a fresh piece in play.
    ///
    /// The piece source keeps its position; it is not reseeded.
    pub fn reset(&mut self) {
        self.board.clear();
        self.progression.reset();
        self.gravity_ms = 0;
        self.active = None;
        self.last_lock = None;
        self.next = self.source.next_kind();

        info!(
            width = self.board.width(),
            height = self.board.height(),
            "game reset"
        );
        self.spawn();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn shapes(&self) -> &Arc<ShapeTable> {
        &self.shapes
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines()
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        self.progression.interval_ms()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Most recent lock since the last reset.
    pub fn last_lock(&self) -> Option<LockEvent> {
        self.last_lock
    }

    /// Anchor row a hard drop would rest the active piece at.
    pub fn ghost_row(&self) -> Option<i32> {
        let piece = self.active?;
        Some(piece.row + drop_distance(&piece, &self.shapes, &self.board))
    }

    /// Advance the game by `elapsed_ms` with the commands in `input`.
    pub fn tick(&mut self, elapsed_ms: u32, input: InputFrame) -> Result<TickReport, GameError> {
        if self.phase == Phase::GameOver {
            return Err(GameError::GameOver);
        }

        let mut report = TickReport::default();

        // Played time counts whether or not gravity runs this tick.
        self.progression.advance_time(elapsed_ms);

        for command in input.iter() {
            let accepted = match command {
                Command::MoveLeft => self.try_shift(-1),
                Command::MoveRight => self.try_shift(1),
                Command::RotateCw => self.try_rotate(true),
                Command::RotateCcw => self.try_rotate(false),
                Command::SoftDrop => self.soft_drop(&mut report),
                Command::HardDrop => self.hard_drop(&mut report),
                Command::Quit => continue,
            };

            if accepted {
                report.accepted += 1;
            } else {
                report.rejected += 1;
                trace!(command = command.as_str(), "command rejected");
            }

            if report.lock.is_some() {
                return Ok(report);
            }
        }

        self.gravity_ms = self.gravity_ms.saturating_add(elapsed_ms);
        if self.gravity_ms >= self.progression.interval_ms() {
            self.gravity_ms = 0;
            report.gravity_step = true;
            if !self.step_down() {
                self.lock_active(&mut report);
            }
        }

        Ok(report)
    }

    /// Replace the active piece with `candidate` if it fits.
    fn try_place(&mut self, candidate: Piece) -> bool {
        if is_valid_placement(&candidate, &self.shapes, &self.board) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    fn try_shift(&mut self, dcol: i32) -> bool {
        match self.active {
            Some(piece) => self.try_place(piece.shifted(dcol, 0)),
            None => false,
        }
    }

    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        // Single-state kinds have nothing to rotate to.
        if self.shapes.rotation_count(piece.kind) <= 1 {
            return false;
        }

        let rotated = if clockwise {
            piece.rotated_cw(&self.shapes)
        } else {
            piece.rotated_ccw(&self.shapes)
        };
        self.try_place(rotated)
    }

    /// One row down. Shared by soft drop, hard drop and gravity.
    fn step_down(&mut self) -> bool {
        match self.active {
            Some(piece) => self.try_place(piece.shifted(0, 1)),
            None => false,
        }
    }

    /// A blocked soft drop is rejected and locks the piece.
    fn soft_drop(&mut self, report: &mut TickReport) -> bool {
        if self.step_down() {
            self.progression.record_drop(1, false);
            true
        } else {
            self.lock_active(report);
            false
        }
    }

    fn hard_drop(&mut self, report: &mut TickReport) -> bool {
        if self.active.is_none() {
            return false;
        }

        let mut rows = 0;
        while self.step_down() {
            rows += 1;
        }
        self.progression.record_drop(rows, true);
        self.lock_active(report);
        true
    }

    /// Lock & merge, clear rows, score, then spawn or end the game.
    fn lock_active(&mut self, report: &mut TickReport) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.phase = Phase::Locking;
        let merge = merge_piece(&mut self.board, &piece, &self.shapes);

        self.phase = Phase::Clearing;
        let lines = self.board.clear_full_rows();
        let score_delta = self.progression.record_clear(lines);
        if lines > 0 {
            debug!(
                lines,
                score = self.progression.score(),
                total_lines = self.progression.lines(),
                "lines cleared"
            );
        }

        let event = LockEvent {
            kind: piece.kind,
            lines_cleared: lines as u8,
            score_delta,
            overflow: merge.overflow,
        };
        report.lock = Some(event);
        self.last_lock = Some(event);
        self.gravity_ms = 0;

        if merge.overflow {
            self.end_game("locked above the board");
        } else {
            self.spawn();
        }
    }

    /// Put the queued kind into play and draw a new one.
    fn spawn(&mut self) {
        self.phase = Phase::Spawning;

        let kind = self.next;
        self.next = self.source.next_kind();
        let piece = Piece::spawn(kind, &self.shapes, self.board.width());

        if self.try_place(piece) {
            debug!(
                kind = kind.as_str(),
                col = piece.col,
                row = piece.row,
                next = self.next.as_str(),
                "piece spawned"
            );
            self.phase = Phase::Falling;
        } else {
            self.end_game("spawn blocked");
        }
    }

    fn end_game(&mut self, cause: &'static str) {
        self.active = None;
        self.phase = Phase::GameOver;
        info!(
            cause,
            score = self.progression.score(),
            level = self.progression.level(),
            lines = self.progression.lines(),
            "game over"
        );
    }

    /// Fill `out` with the current state, reusing its board buffer.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_color_ids(&mut out.board);

        out.active = self.active.map(|piece| ActiveSnapshot {
            kind: piece.kind,
            rotation: piece.rotation,
            col: piece.col,
            row: piece.row,
            cells: piece.cells(&self.shapes),
        });
        out.ghost_row = self.ghost_row();
        out.next = NextSnapshot {
            kind: self.next,
            shape: *self.shapes.shape(self.next, Rotation::SPAWN),
        };

        out.score = self.progression.score();
        out.level = self.progression.level();
        out.lines = self.progression.lines();
        out.gravity_interval_ms = self.progression.interval_ms();
        out.phase = self.phase;
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
