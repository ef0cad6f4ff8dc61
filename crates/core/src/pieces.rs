//! Pieces module - Tetromino shape catalog and spawn placement
//!
//! Shapes are stored as small occupancy matrices in their spawn orientation.
//! Rotation is not part of these rules, so a piece's shape never changes; only
//! its anchor moves.

use crate::types::{PieceKind, BOARD_WIDTH};

/// Occupancy matrix, rows top to bottom, 1 = filled
pub type ShapeMatrix = &'static [&'static [u8]];

const O_SHAPE: ShapeMatrix = &[&[1, 1], &[1, 1]];
const I_SHAPE: ShapeMatrix = &[&[1, 1, 1, 1]];
const T_SHAPE: ShapeMatrix = &[&[0, 1, 0], &[1, 1, 1]];
const S_SHAPE: ShapeMatrix = &[&[0, 1, 1], &[1, 1, 0]];
const Z_SHAPE: ShapeMatrix = &[&[1, 1, 0], &[0, 1, 1]];
const J_SHAPE: ShapeMatrix = &[&[1, 0, 0], &[1, 1, 1]];
const L_SHAPE: ShapeMatrix = &[&[0, 0, 1], &[1, 1, 1]];

/// Spawn-orientation shape of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: ShapeMatrix,
}

impl Shape {
    pub fn rows(&self) -> ShapeMatrix {
        self.rows
    }

    /// Width of the bounding box in cells
    pub fn width(&self) -> u8 {
        self.rows.first().map_or(0, |row| row.len() as u8)
    }

    /// Height of the bounding box in cells
    pub fn height(&self) -> u8 {
        self.rows.len() as u8
    }

    /// Offsets (dx, dy) of every filled cell relative to the top-left anchor
    pub fn minos(self) -> impl Iterator<Item = (i8, i8)> {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled != 0)
                .map(move |(dx, _)| (dx as i8, dy as i8))
        })
    }
}

/// Look up the static shape for a piece kind
pub fn shape_of(kind: PieceKind) -> Shape {
    let rows = match kind {
        PieceKind::O => O_SHAPE,
        PieceKind::I => I_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    };
    Shape { rows }
}

/// Spawn anchor for a shape: centered horizontally, top row.
///
/// `x = COLS / 2 - ceil(width / 2)`, so even-width boards bias odd-width pieces
/// one column left.
pub fn spawn_position(shape: Shape) -> (i8, i8) {
    let half_board = (BOARD_WIDTH / 2) as i8;
    let half_shape = shape.width().div_ceil(2) as i8;
    (half_board - half_shape, 0)
}

/// Active falling piece
///
/// `y` may be negative while part of the piece is above the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a new piece of `kind` at its spawn position
    pub fn new(kind: PieceKind) -> Self {
        let shape = shape_of(kind);
        let (x, y) = spawn_position(shape);
        Self { kind, shape, x, y }
    }

    /// Create a piece of `kind` anchored at (x, y)
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            shape: shape_of(kind),
            x,
            y,
        }
    }

    /// Cell id written into the board when this piece locks
    pub fn id(&self) -> u8 {
        self.kind.id()
    }

    /// Absolute board coordinates of every filled cell
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape
            .minos()
            .map(move |(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// True if any filled cell sits above row 0
    pub fn is_above_field(&self) -> bool {
        self.minos().any(|(_, y)| y < 0)
    }
}
