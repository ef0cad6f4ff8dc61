use serde::{Deserialize, Serialize};

use crate::board::{U8Grid, COLS, ROWS};
use crate::pieces::Piece;
use crate::types::{PieceKind, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
        }
    }
}

/// What a renderer needs to draw one frame.
///
/// `board` already has the active piece overlaid using the same 0..=7 cell
/// encoding as locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: U8Grid,
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub episode_id: u32,
    pub gravity_ms: u32,
    pub soft_drop: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; COLS]; ROWS];
        self.active = None;
        self.phase = Phase::Running;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.episode_id = 0;
        self.gravity_ms = 0;
        self.soft_drop = false;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Render the board as text, one line per row (`.` empty, piece letter otherwise)
    pub fn board_text(&self) -> String {
        let mut out = String::with_capacity(ROWS * (COLS + 1));
        for row in &self.board {
            for &id in row {
                match PieceKind::try_from(id) {
                    Ok(kind) => out.push_str(&kind.to_string()),
                    Err(_) => out.push('.'),
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; COLS]; ROWS],
            active: None,
            phase: Phase::Running,
            score: 0,
            lines: 0,
            level: 0,
            episode_id: 0,
            gravity_ms: 0,
            soft_drop: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_snapshot_from_piece() {
        let piece = Piece::at(PieceKind::S, 2, -1);
        let snap = ActiveSnapshot::from(piece);
        assert_eq!((snap.kind, snap.x, snap.y), (PieceKind::S, 2, -1));
    }

    #[test]
    fn test_clear_restores_default() {
        let mut snap = GameSnapshot {
            score: 900,
            phase: Phase::GameOver,
            soft_drop: true,
            ..GameSnapshot::default()
        };
        snap.board[19][0] = 4;
        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(GameSnapshot::default()).unwrap();
        for key in ["board", "active", "phase", "score", "lines", "level", "episode_id", "gravity_ms", "soft_drop"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["active"].is_null());
    }

    #[test]
    fn test_empty_board_text() {
        let text = GameSnapshot::default().board_text();
        assert!(text.lines().all(|line| line == ".........."));
    }
}
