//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or filled
//! with the kind of the piece that locked there. Storage is a flat row-major
//! vector allocated once; no operation after construction allocates.
//!
//! Coordinates: `(col, row)`, col grows to the right and row grows downward.
//! Negative rows are above the visible board: they are legal query positions
//! and always read as empty, but nothing can be written there.

use crate::error::ConfigError;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board. Zero-sized dimensions are rejected.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: width as i32,
                height: height as i32,
            });
        }
        Ok(Self::with_dims(width, height))
    }

    fn with_dims(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if !self.contains(col, row) {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(col, row)` is a cell of the visible grid.
    #[inline]
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && (col as usize) < self.width && row >= 0 && (row as usize) < self.height
    }

    /// Get cell at position (col, row). Returns None if outside the grid.
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Whether a locked cell sits at `(col, row)`.
    ///
    /// Positions above the board (`row < 0`) are always empty. Positions
    /// left, right or below the grid hold nothing either; bounds are the
    /// collision validator's concern.
    #[inline]
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Fill a cell. Returns false if out of bounds.
    pub fn set_cell(&mut self, col: i32, row: i32, kind: PieceKind) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = Some(kind);
                true
            }
            None => false,
        }
    }

    /// Empty a cell. Returns false if out of bounds.
    pub fn clear_cell(&mut self, col: i32, row: i32) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = None;
                true
            }
            None => false,
        }
    }

    fn row_slice(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Check if a row is completely filled
    pub fn row_is_full(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        self.row_slice(row).iter().all(|cell| cell.is_some())
    }

    /// Remove a row: every row above it shifts down by one and an empty row
    /// appears at index 0. Returns false if `row` is out of range.
    pub fn remove_row(&mut self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }

        let width = self.width;
        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..row * width, width);
        self.cells[..width].fill(None);
        true
    }

    /// Remove every full row, scanning bottom to top, and return how many
    /// were removed.
    ///
    /// After a removal the same index is examined again, since it now holds
    /// the row that used to sit above it. Non-contiguous full rows are all
    /// removed and the remaining rows keep their relative order.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = self.height;

        while row > 0 {
            let r = row - 1;
            if self.row_is_full(r) {
                self.remove_row(r);
                cleared += 1;
            } else {
                row -= 1;
            }
        }

        cleared
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write row-major color ids (0 = empty) into `out`, reusing its allocation.
    pub fn write_color_ids(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|c| c.map_or(0, PieceKind::color_id)));
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::with_dims(BOARD_WIDTH, BOARD_HEIGHT)
    }
}
