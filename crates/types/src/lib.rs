//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no game logic, making them usable by the
//! rules engine, a renderer, or an input-binding layer alike.
//!
//! # Board Dimensions
//!
//! Classic playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Gravity Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_GRAVITY_MS` | 800 | Gravity period at level 0 |
//! | `GRAVITY_STEP_MS` | 60 | Period reduction per level |
//! | `MIN_GRAVITY_MS` | 100 | Floor so high levels stay playable |
//! | `FAST_GRAVITY_MS` | 60 | Period while soft drop is held |
//!
//! # Cell Encoding
//!
//! Renderers receive the board as `u8` values: `0` is empty, `1..=7` is the id
//! of the piece kind that locked the cell (O=1, I=2, T=3, S=4, Z=5, J=6, L=7).
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Parse from string (case-insensitive)
//! let parsed: PieceKind = "t".parse().unwrap();
//! assert_eq!(parsed, PieceKind::T);
//! assert_eq!(parsed.id(), 3);
//!
//! // Round-trip a cell id
//! assert_eq!(PieceKind::try_from(1), Ok(PieceKind::O));
//!
//! // Parse a player command
//! let command: Command = "moveLeft".parse().unwrap();
//! assert_eq!(command, Command::MoveLeft);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity period at level 0
pub const BASE_GRAVITY_MS: u32 = 800;

/// Gravity period reduction per level
pub const GRAVITY_STEP_MS: u32 = 60;

/// Gravity period never drops below this
pub const MIN_GRAVITY_MS: u32 = 100;

/// Gravity period while soft drop is held, regardless of level
pub const FAST_GRAVITY_MS: u32 = 60;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table
///
/// Base points for clearing N lines simultaneously:
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Points are multiplied by (level + 1). Index 0 is unused; a single piece
/// cannot clear more than four rows, so there is no entry past 4.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Widest piece in the catalog (the I piece)
pub const MAX_PIECE_WIDTH: u8 = 4;

// Malformed rule constants fail the build.
const _: () = assert!(BOARD_WIDTH >= MAX_PIECE_WIDTH, "board narrower than the I piece");
const _: () = assert!(BOARD_HEIGHT >= 2, "board too short to spawn a piece");
const _: () = assert!(BOARD_WIDTH <= 64 && BOARD_HEIGHT <= 64, "board exceeds i8 coordinates");
const _: () = assert!(LINES_PER_LEVEL > 0, "lines per level must be positive");
const _: () = assert!(FAST_GRAVITY_MS > 0, "fast gravity period must be positive");
const _: () = assert!(MIN_GRAVITY_MS > 0, "minimum gravity period must be positive");
const _: () = assert!(MIN_GRAVITY_MS <= BASE_GRAVITY_MS, "minimum period above base period");

/// Errors produced when converting external input into engine types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown piece kind: {0:?}")]
    UnknownPieceKind(String),
    #[error("unknown piece id: {0} (expected 1..=7)")]
    UnknownPieceId(u8),
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
}

/// The seven tetromino piece kinds
///
/// Each kind carries the numeric id stored in locked board cells:
/// - **O** (1): 2x2 square
/// - **I** (2): horizontal bar
/// - **T** (3): T-shaped
/// - **S** (4): S-shaped
/// - **Z** (5): Z-shaped (mirror of S)
/// - **J** (6): J-shaped
/// - **L** (7): L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    O,
    I,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Numeric id used in the board's cell encoding (1..=7)
    pub fn id(self) -> u8 {
        match self {
            PieceKind::O => 1,
            PieceKind::I => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Convert to lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_str(), "i");
    /// assert_eq!(PieceKind::O.as_str(), "o");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl FromStr for PieceKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "o" => Ok(PieceKind::O),
            "i" => Ok(PieceKind::I),
            "t" => Ok(PieceKind::T),
            "s" => Ok(PieceKind::S),
            "z" => Ok(PieceKind::Z),
            "j" => Ok(PieceKind::J),
            "l" => Ok(PieceKind::L),
            _ => Err(ParseError::UnknownPieceKind(s.to_string())),
        }
    }
}

impl TryFrom<u8> for PieceKind {
    type Error = ParseError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or(ParseError::UnknownPieceId(id))
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell, remembering which kind locked it
pub type Cell = Option<PieceKind>;

/// Encode a cell as its renderer-facing `u8` value (0 for empty)
#[inline]
pub fn cell_id(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::id)
}

/// Game phase
///
/// Governs which transitions are accepted:
/// - **Running**: gravity ticks and movement apply
/// - **Paused**: everything except pause toggle, soft drop release and reset is ignored
/// - **GameOver**: terminal until reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Running,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Commands accepted from the input-binding layer
///
/// Each command is a silent no-op when issued in a phase where it has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Begin holding soft drop (fast gravity)
    SoftDropStart,
    /// Release soft drop (level gravity)
    SoftDropStop,
    /// Toggle between running and paused
    PauseToggle,
    /// Start over from an empty board
    Reset,
}

impl Command {
    /// Convert to camelCase string
    pub fn as_str(self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDropStart => "softDropStart",
            Command::SoftDropStop => "softDropStop",
            Command::PauseToggle => "pauseToggle",
            Command::Reset => "reset",
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    /// Parse a command name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!("softDropStart".parse(), Ok(Command::SoftDropStart));
    /// assert_eq!("RESET".parse(), Ok(Command::Reset));
    /// assert!("hardDrop".parse::<Command>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "moveleft" => Ok(Command::MoveLeft),
            "moveright" => Ok(Command::MoveRight),
            "softdropstart" => Ok(Command::SoftDropStart),
            "softdropstop" => Ok(Command::SoftDropStop),
            "pausetoggle" => Ok(Command::PauseToggle),
            "reset" => Ok(Command::Reset),
            _ => Err(ParseError::UnknownCommand(s.to_string())),
        }
    }
}

/// Event emitted after a piece locks.
///
/// Consumed through `GameState::take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_awarded: u32,
    pub level: u32,
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_rule_defaults() {
        assert_eq!(BASE_GRAVITY_MS, 800);
        assert_eq!(GRAVITY_STEP_MS, 60);
        assert_eq!(MIN_GRAVITY_MS, 100);
        assert_eq!(FAST_GRAVITY_MS, 60);
        assert_eq!(LINES_PER_LEVEL, 10);
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn piece_ids_are_one_through_seven() {
        let ids: Vec<u8> = PieceKind::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn piece_id_round_trips() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::try_from(kind.id()), Ok(kind));
        }
        assert_eq!(PieceKind::try_from(0), Err(ParseError::UnknownPieceId(0)));
        assert_eq!(PieceKind::try_from(8), Err(ParseError::UnknownPieceId(8)));
    }

    #[test]
    fn piece_kind_parse_is_case_insensitive() {
        assert_eq!("L".parse::<PieceKind>(), Ok(PieceKind::L));
        assert_eq!("z".parse::<PieceKind>(), Ok(PieceKind::Z));
        assert!(matches!(
            "x".parse::<PieceKind>(),
            Err(ParseError::UnknownPieceKind(_))
        ));
    }

    #[test]
    fn command_names_round_trip() {
        for command in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDropStart,
            Command::SoftDropStop,
            Command::PauseToggle,
            Command::Reset,
        ] {
            assert_eq!(command.as_str().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn cell_id_encodes_empty_as_zero() {
        assert_eq!(cell_id(None), 0);
        assert_eq!(cell_id(Some(PieceKind::L)), 7);
    }

    #[test]
    fn parse_error_messages() {
        assert_eq!(
            ParseError::UnknownPieceId(9).to_string(),
            "unknown piece id: 9 (expected 1..=7)"
        );
        assert_eq!(
            ParseError::UnknownCommand("jump".into()).to_string(),
            "unknown command: \"jump\""
        );
    }
}
