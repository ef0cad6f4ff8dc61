//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or hold the kind of
//! the piece that locked there. Uses a flat array for cache locality; cloning a
//! board copies every cell, so two boards never share rows.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use crate::types::{cell_id, Cell, ParseError, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Board width as an index type
pub const COLS: usize = BOARD_WIDTH as usize;

/// Board height as an index type
pub const ROWS: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = COLS * ROWS;

/// Renderer-facing grid of cell ids (0 = empty, 1..=7 = piece id)
pub type U8Grid = [[u8; COLS]; ROWS];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Borrow one row, top row first
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= ROWS {
            return None;
        }
        let start = y * COLS;
        Some(&self.cells[start..start + COLS])
    }

    /// Iterate over rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLS)
    }

    /// Number of full rows
    pub fn full_row_count(&self) -> usize {
        (0..ROWS).filter(|&y| self.is_row_full(y)).count()
    }

    /// Clear all full rows in place and return how many were removed.
    ///
    /// Rows that survive keep their relative order and settle at the bottom;
    /// the vacated rows at the top are emptied. Non-contiguous full rows are
    /// removed in the same pass.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_y = ROWS;

        // Scan from bottom to top
        for read_y in (0..ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * COLS;
                    self.cells
                        .copy_within(src_start..src_start + COLS, write_y * COLS);
                }
            }
        }

        // Everything above the last written row is fresh
        for cell in &mut self.cells[..write_y * COLS] {
            *cell = None;
        }

        cleared
    }

    /// Clear full rows without touching `self`.
    ///
    /// Returns the compacted board and the number of rows removed. When no row
    /// is full the returned board equals `self`.
    pub fn clear_lines(&self) -> (Board, usize) {
        let mut next = self.clone();
        let cleared = next.clear_full_rows();
        (next, cleared)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Fill a whole row with `kind`, leaving the listed columns empty
    pub fn fill_row_except(&mut self, y: usize, holes: &[usize], kind: PieceKind) -> bool {
        if y >= ROWS {
            return false;
        }
        for x in 0..COLS {
            self.cells[y * COLS + x] = if holes.contains(&x) { None } else { Some(kind) };
        }
        true
    }

    /// Write cell ids into `out` without allocating
    pub fn write_u8_grid(&self, out: &mut U8Grid) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = cell_id(*s);
            }
        }
    }

    /// Cell ids as a 2D grid
    pub fn to_u8_grid(&self) -> U8Grid {
        let mut grid = [[0u8; COLS]; ROWS];
        self.write_u8_grid(&mut grid);
        grid
    }

    /// Build a board from cell ids, rejecting anything outside 0..=7
    pub fn from_u8_grid(grid: &U8Grid) -> Result<Self, ParseError> {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                if id != 0 {
                    board.cells[y * COLS + x] = Some(PieceKind::try_from(id)?);
                }
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
        assert_eq!(Board::index(0, -1), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();

        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::T));

        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

        assert_eq!(board.cells[0], Some(PieceKind::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_clear_full_rows_keeps_survivor_order() {
        let mut board = Board::new();
        board.fill_row_except(19, &[], PieceKind::I);
        board.set(2, 18, Some(PieceKind::T));
        board.fill_row_except(17, &[], PieceKind::J);
        board.set(7, 16, Some(PieceKind::S));

        assert_eq!(board.clear_full_rows(), 2);

        assert_eq!(board.get(2, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(7, 18), Some(Some(PieceKind::S)));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_clear_lines_leaves_source_untouched() {
        let mut board = Board::new();
        board.fill_row_except(19, &[], PieceKind::O);
        let before = board.clone();

        let (after, cleared) = board.clear_lines();

        assert_eq!(cleared, 1);
        assert_eq!(board, before);
        assert!(after.is_empty());
    }

    #[test]
    fn test_u8_grid_roundtrip() {
        let mut board = Board::new();
        board.set(3, 5, Some(PieceKind::O));
        board.set(9, 19, Some(PieceKind::L));

        let grid = board.to_u8_grid();
        assert_eq!(grid[5][3], 1);
        assert_eq!(grid[19][9], 7);
        assert_eq!(Board::from_u8_grid(&grid), Ok(board));
    }

    #[test]
    fn test_from_u8_grid_rejects_unknown_ids() {
        let mut grid = [[0u8; COLS]; ROWS];
        grid[0][0] = 8;
        assert_eq!(
            Board::from_u8_grid(&grid),
            Err(ParseError::UnknownPieceId(8))
        );
    }
}
