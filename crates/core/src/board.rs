//! Board module - manages the game grid
//!
//! The board is a 6x12 grid where each cell holds a [`Color`] (possibly `Empty`).
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..5 (left to right), y ranges 0..11 (top to bottom)

use std::fmt;

use crate::error::EngineError;
use crate::types::{Color, Pos, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH};

/// The game board - 6 columns x 12 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Color; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Color::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    pub(crate) fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Check if position lies on the board
    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_some()
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Color> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Get cell at position (x, y), treating out-of-bounds as a contract violation
    pub fn cell_at(&self, x: i8, y: i8) -> Result<Color, EngineError> {
        self.get(x, y).ok_or(EngineError::OutOfBounds { x, y })
    }

    /// True iff the cell is on the board and empty.
    ///
    /// Out-of-bounds counts as not placeable.
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Color::Empty))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c.is_piece())
    }

    /// Write a cell unconditionally. Emptiness is the caller's concern.
    pub fn set_cell(&mut self, x: i8, y: i8, color: Color) -> Result<(), EngineError> {
        let idx = Self::index(x, y).ok_or(EngineError::OutOfBounds { x, y })?;
        self.cells[idx] = color;
        Ok(())
    }

    /// Set every listed cell to `Empty`.
    ///
    /// All positions are checked before anything is written, so an
    /// out-of-bounds entry leaves the board untouched.
    pub fn clear_cells(&mut self, positions: &[Pos]) -> Result<(), EngineError> {
        if let Some(&(x, y)) = positions.iter().find(|&&(x, y)| !self.in_bounds(x, y)) {
            return Err(EngineError::OutOfBounds { x, y });
        }
        for &(x, y) in positions {
            if let Some(idx) = Self::index(x, y) {
                self.cells[idx] = Color::Empty;
            }
        }
        Ok(())
    }

    /// Write by column/row without bounds translation (crate-internal hot path)
    #[inline(always)]
    pub(crate) fn put(&mut self, x: usize, y: usize, color: Color) {
        self.cells[y * BOARD_WIDTH as usize + x] = color;
    }

    /// Read by column/row without bounds translation (crate-internal hot path)
    #[inline(always)]
    pub(crate) fn at(&self, x: usize, y: usize) -> Color {
        self.cells[y * BOARD_WIDTH as usize + x]
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_piece()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [Color::Empty; BOARD_SIZE];
    }

    /// Write color codes into a fixed-size grid (for snapshots).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.at(x, y).code();
            }
        }
    }

    /// Build a board from text rows using [`Color::as_char`] glyphs.
    ///
    /// Rows are bottom-aligned: passing three rows fills y = 9..=11 and
    /// leaves everything above empty. Returns `None` for more than 12 rows,
    /// a row that is not exactly 6 glyphs wide, or an unknown glyph.
    ///
    /// ```
    /// use puyo_engine_core::Board;
    /// use puyo_engine_types::Color;
    ///
    /// let board = Board::from_rows(&["R.....", "RRB..."]).unwrap();
    /// assert_eq!(board.get(0, 10), Some(Color::Red));
    /// assert_eq!(board.get(2, 11), Some(Color::Blue));
    /// assert_eq!(board.filled_count(), 4);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        if rows.len() > BOARD_HEIGHT as usize {
            return None;
        }

        let mut board = Self::new();
        let top = BOARD_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            let mut width = 0usize;
            for (x, ch) in row.chars().enumerate() {
                if x >= BOARD_WIDTH as usize {
                    return None;
                }
                board.put(x, top + i, Color::from_char(ch)?);
                width += 1;
            }
            if width != BOARD_WIDTH as usize {
                return None;
            }
        }
        Some(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_HEIGHT as usize {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..BOARD_WIDTH as usize {
                write!(f, "{}", self.at(x, y).as_char())?;
            }
        }
        Ok(())
    }
}
