//! Collision module - wall, floor and locked-cell tests, plus piece merging

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Check whether `piece`, offset by (dx, dy), hits a wall, the floor or a locked cell.
///
/// Every filled cell is checked against the side walls and the floor. Cells
/// above the field (y < 0) still respect the side walls but are never tested
/// against locked cells, so a piece may hang partly over the top.
pub fn collides(board: &Board, piece: &Piece, dx: i8, dy: i8) -> bool {
    piece.minos().any(|(x, y)| {
        let (nx, ny) = (x.saturating_add(dx), y.saturating_add(dy));
        if nx < 0 || nx >= BOARD_WIDTH as i8 || ny >= BOARD_HEIGHT as i8 {
            return true;
        }
        ny >= 0 && board.is_occupied(nx, ny)
    })
}

/// Copy `board` and stamp the piece's id into every in-field cell it covers.
///
/// The input board is never modified. Cells above the field are dropped.
pub fn merge(board: &Board, piece: &Piece) -> Board {
    let mut next = board.clone();
    stamp(&mut next, piece);
    next
}

/// Write the piece's cells into `board` in place, returning how many landed in the field
pub(crate) fn stamp(board: &mut Board, piece: &Piece) -> usize {
    piece
        .minos()
        .filter(|&(x, y)| board.set(x, y, Some(piece.kind)))
        .count()
}
