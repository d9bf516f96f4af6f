//! Grid module - the fixed-size board of locked blocks
//!
//! The grid is a 20x10 matrix where each cell is empty or holds a color.
//! Storage is a flat row-major array so the whole grid is `Copy`-cheap to clone
//! and never allocates.
//! Coordinates are `(row, col)`: row 0 is the top, col 0 is the left edge.

use arrayvec::ArrayVec;

use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Number of rows on the grid
pub const GRID_ROWS: usize = BOARD_HEIGHT as usize;

/// Number of columns on the grid
pub const GRID_COLS: usize = BOARD_WIDTH as usize;

const GRID_SIZE: usize = GRID_ROWS * GRID_COLS;

/// Row indices removed by one clearing pass, in the order they were cleared.
pub type ClearedRows = ArrayVec<usize, GRID_ROWS>;

/// The game grid - 20 rows x 10 columns in flat storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Row-major cells (row * COLS + col)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * GRID_COLS + (col as usize))
    }

    /// Cell at `(row, col)`, or `None` when out of range
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Overwrite a single cell. Returns false if out of range.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True iff the cell is in range and holds a block.
    ///
    /// Out-of-range queries (including rows above the top) report unoccupied;
    /// bounds are the collision detector's job.
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// The cells of one row, left to right
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= GRID_ROWS {
            return None;
        }
        let start = row * GRID_COLS;
        Some(&self.cells[start..start + GRID_COLS])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Remove a row, shift every row above it down by one and insert an empty
    /// row at the top. Returns false if `row` is out of range.
    pub fn clear_row(&mut self, row: usize) -> bool {
        if row >= GRID_ROWS {
            return false;
        }

        for r in (1..=row).rev() {
            let src = (r - 1) * GRID_COLS;
            self.cells.copy_within(src..src + GRID_COLS, r * GRID_COLS);
        }
        self.cells[..GRID_COLS].fill(None);

        true
    }

    /// Clear full rows in one bottom-up pass.
    ///
    /// Each row index is examined once. After a clear the row that shifted into
    /// the same index is not re-examined; the scan moves on to the row above.
    /// Two adjacent full rows therefore lose only the lower one per pass.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for row in (0..GRID_ROWS).rev() {
            if self.is_row_full(row) {
                self.clear_row(row);
                cleared.push(row);
            }
        }
        cleared
    }

    /// Write `(row, col, color)` blocks into the grid.
    ///
    /// All targets must be in range and empty; otherwise nothing is written and
    /// false is returned.
    pub fn lock(&mut self, blocks: &[(i8, i8, Color)]) -> bool {
        let all_free = blocks
            .iter()
            .all(|&(row, col, _)| matches!(self.get(row, col), Some(None)));
        if !all_free {
            return false;
        }

        for &(row, col, color) in blocks {
            self.set(row, col, Some(color));
        }
        true
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the flat row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill a whole row with `color` except the columns in `holes`.
    ///
    /// Handy for puzzle setups and tests.
    pub fn fill_row_except(&mut self, row: usize, holes: &[usize], color: Color) -> bool {
        if row >= GRID_ROWS {
            return false;
        }
        let start = row * GRID_COLS;
        for (col, cell) in self.cells[start..start + GRID_COLS].iter_mut().enumerate() {
            *cell = if holes.contains(&col) { None } else { Some(color) };
        }
        true
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
