//! Board module - manages the game grid
//!
//! The board is a 10x22 grid: two hidden header rows on top of the 20 visible
//! rows. Each cell can be empty or filled with a piece kind.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21
//! (top to bottom). Rows `0..HEADER_ROWS` are the header.

use arrayvec::ArrayVec;

use crate::shape::Shape;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, HEADER_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    /// Rows removed by the most recent `clear_all_rows`
    completed_rows: u32,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            completed_rows: 0,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
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

    /// Check if a single cell is free for a mino
    ///
    /// Cells above the top row are open sky; walls and floor are solid.
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Every mino of the shape is inside the walls and floor and not overlapping locked cells
    pub fn is_valid_position(&self, shape: &Shape) -> bool {
        shape.cells().iter().all(|&(x, y)| self.is_free(x, y))
    }

    /// Any mino of the shape sits in the hidden header rows
    pub fn is_over_limit(&self, shape: &Shape) -> bool {
        shape.cells().iter().any(|&(_, y)| y < HEADER_ROWS as i8)
    }

    /// Lock the shape's minos into the grid
    ///
    /// Minos outside the grid are dropped.
    pub fn store_shape_in_grid(&mut self, shape: &Shape) {
        for (x, y) in shape.cells() {
            self.set(x, y, Some(shape.kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear every full row and remember how many went
    pub fn clear_all_rows(&mut self) -> u32 {
        let cleared = self.clear_full_rows();
        self.completed_rows = cleared.len() as u32;
        self.completed_rows
    }

    /// Rows removed by the most recent [`Board::clear_all_rows`]
    pub fn completed_rows(&self) -> u32 {
        self.completed_rows
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    /// Uses a two-pointer algorithm with zero-allocation
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                // A single piece spans at most four rows.
                let _ = cleared_rows.try_push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Write the grid as piece codes (0 = empty) into a fixed-size array
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * width + x].map_or(0, |k| k.code());
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill a row completely (test helper)
    #[cfg(test)]
    pub(crate) fn fill_row(&mut self, y: i8, kind: crate::types::PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            self.set(x, y, Some(kind));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
