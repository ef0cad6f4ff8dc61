//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, bag, and scoring.
//! It handles gravity ticks, player movement, locking, line clears, and the
//! Running / Paused / GameOver lifecycle. It owns no clock: the caller invokes
//! [`GameState::tick`] at the period reported by [`GameState::gravity_period_ms`].

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::board::{Board, U8Grid};
use crate::collision::{collides, merge};
use crate::pieces::Piece;
use crate::rng::{Bag, RandomSource, SimpleRng};
use crate::scoring::{gravity_period_ms, level_for_lines, line_clear_score};
use crate::snapshot::GameSnapshot;
use crate::types::{Command, LockEvent, Phase, FAST_GRAVITY_MS};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    /// Falling piece. After game over this is the last piece that locked;
    /// its coordinates predate any clear, so it is not overlaid.
    active: Piece,
    bag: Bag<R>,
    phase: Phase,
    score: u32,
    lines: u32,
    level: u32,
    soft_drop: bool,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Pieces spawned in the current episode, including the first.
    pieces_spawned: u32,
    /// Last lock/line-clear event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game drawing pieces with `rng`
    pub fn with_rng(rng: R) -> Self {
        Self::with_board(rng, Board::new())
    }

    /// Start a game on a prepared field.
    ///
    /// If the first piece cannot be placed the game begins in `GameOver`.
    pub fn with_board(rng: R, board: Board) -> Self {
        let mut bag = Bag::new(rng);
        let active = Piece::new(bag.draw());
        let phase = if collides(&board, &active, 0, 0) {
            Phase::GameOver
        } else {
            Phase::Running
        };

        Self {
            board,
            active,
            bag,
            phase,
            score: 0,
            lines: 0,
            level: 0,
            soft_drop: false,
            episode_id: 0,
            pieces_spawned: 1,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
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

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_drop
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    /// Locked cells only; see [`GameState::visible_board`] for the overlay
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bag(&self) -> &Bag<R> {
        &self.bag
    }

    /// Current gravity period: the fast period while soft drop is held,
    /// otherwise the level period
    pub fn gravity_period_ms(&self) -> u32 {
        if self.soft_drop {
            FAST_GRAVITY_MS
        } else {
            gravity_period_ms(self.level)
        }
    }

    pub fn gravity_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.gravity_period_ms()))
    }

    /// Board cell ids with the active piece drawn on top.
    ///
    /// Computed on demand; the stored board is not touched. Once the game is
    /// over only the locked cells are shown.
    pub fn visible_board(&self) -> U8Grid {
        let mut grid = self.board.to_u8_grid();
        self.overlay_active(&mut grid);
        grid
    }

    fn overlay_active(&self, grid: &mut U8Grid) {
        if self.phase == Phase::GameOver {
            return;
        }
        let id = self.active.id();
        for (x, y) in self.active.minos() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
                    *cell = id;
                }
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        self.overlay_active(&mut out.board);

        out.active = (self.phase != Phase::GameOver).then(|| self.active.into());
        out.phase = self.phase;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.episode_id = self.episode_id;
        out.gravity_ms = self.gravity_period_ms();
        out.soft_drop = self.soft_drop;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Gravity tick: move the piece down one row, or lock it if it cannot move.
    ///
    /// Returns false when the tick was ignored (paused or game over).
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        if !collides(&self.board, &self.active, 0, 1) {
            self.active.y += 1;
        } else {
            self.lock_piece();
        }
        true
    }

    /// Lock the active piece onto the board, clear lines, score, and respawn
    fn lock_piece(&mut self) {
        let piece = self.active;

        let (board, cleared) = merge(&self.board, &piece).clear_lines();
        self.board = board;

        let mut awarded = 0;
        if cleared > 0 {
            awarded = match line_clear_score(cleared, self.level) {
                Some(points) => points,
                None => {
                    warn!(lines = cleared, "unsupported simultaneous line clear, no points awarded");
                    0
                }
            };
            self.score = self.score.saturating_add(awarded);
            self.lines = self.lines.saturating_add(cleared as u32);

            let level = level_for_lines(self.lines);
            if level != self.level {
                info!(level, lines = self.lines, "level up");
            }
            self.level = level;
        }

        debug!(
            kind = %piece.kind,
            x = piece.x,
            y = piece.y,
            lines = cleared,
            score = self.score,
            "locked piece"
        );

        // Locking with any cell above the field ends the game outright
        let topped_out = if piece.is_above_field() {
            self.end_game("piece locked above the field");
            true
        } else {
            !self.spawn_piece()
        };

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            score_awarded: awarded,
            level: self.level,
            game_over: topped_out,
        });
    }

    /// Spawn the next piece from the bag.
    ///
    /// If it does not fit the game ends and the new piece is discarded.
    fn spawn_piece(&mut self) -> bool {
        let next = Piece::new(self.bag.draw());
        if collides(&self.board, &next, 0, 0) {
            self.end_game("spawn position blocked");
            return false;
        }

        self.active = next;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!(kind = %next.kind, x = next.x, "spawned piece");
        true
    }

    fn end_game(&mut self, reason: &str) {
        self.phase = Phase::GameOver;
        self.soft_drop = false;
        info!(reason, score = self.score, lines = self.lines, level = self.level, "game over");
    }

    /// Take and clear the last lock/line-clear event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Try to shift the active piece horizontally
    fn try_shift(&mut self, dx: i8) -> bool {
        if self.phase != Phase::Running || collides(&self.board, &self.active, dx, 0) {
            return false;
        }
        self.active.x += dx;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    /// Start holding soft drop.
    ///
    /// Switches to the fast gravity period and nudges the piece down one row
    /// when that row is free. Never locks; locking stays with [`GameState::tick`].
    pub fn soft_drop_start(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let was_dropping = self.soft_drop;
        self.soft_drop = true;

        let nudged = !collides(&self.board, &self.active, 0, 1);
        if nudged {
            self.active.y += 1;
        }
        nudged || !was_dropping
    }

    /// Release soft drop. Accepted in every phase so the flag cannot stick.
    pub fn soft_drop_stop(&mut self) -> bool {
        std::mem::replace(&mut self.soft_drop, false)
    }

    /// Toggle pause; no effect after game over
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::GameOver => return false,
        };
        debug!(phase = self.phase.as_str(), "pause toggled");
        true
    }

    /// Start over: empty board, fresh bag, zeroed progression, `Running`.
    pub fn reset(&mut self) {
        self.bag.reset();
        self.board = Board::new();
        self.active = Piece::new(self.bag.draw());
        self.phase = Phase::Running;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.soft_drop = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.pieces_spawned = 1;
        self.last_event = None;
        info!(episode = self.episode_id, "game reset");
    }

    /// Apply a player command. Returns whether anything changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDropStart => self.soft_drop_start(),
            Command::SoftDropStop => self.soft_drop_stop(),
            Command::PauseToggle => self.toggle_pause(),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
