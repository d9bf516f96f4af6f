//! Shape module - binary piece matrices and clockwise rotation
//!
//! A shape is a rectangular matrix of at most 4x4 cells stored inline, so
//! shapes and pieces stay `Copy` and rotation never allocates.

use thiserror::Error;

use crate::types::MAX_SHAPE_DIM;

/// Reasons a raw row matrix cannot become a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has no rows")]
    Empty,
    #[error("shape is {height}x{width}, larger than 4x4")]
    TooLarge { height: usize, width: usize },
    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("shape has no filled cells")]
    NoFilledCells,
}

/// Binary shape matrix with its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    height: u8,
    width: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from rows of 0/1 values (non-zero means filled).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let t = Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]).unwrap();
    /// assert_eq!((t.height(), t.width()), (2, 3));
    /// assert!(t.is_filled(1, 1));
    /// assert!(!t.is_filled(1, 0));
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).ok_or(ShapeError::Empty)?;
        if width == 0 {
            return Err(ShapeError::Empty);
        }
        if height > MAX_SHAPE_DIM || width > MAX_SHAPE_DIM {
            return Err(ShapeError::TooLarge { height, width });
        }

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ShapeError::Ragged {
                    row: r,
                    len: row.len(),
                    expected: width,
                });
            }
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }

        let shape = Self {
            height: height as u8,
            width: width as u8,
            cells,
        };
        if shape.filled().next().is_none() {
            return Err(ShapeError::NoFilledCells);
        }
        Ok(shape)
    }

    /// Build a shape from a fixed 4x4 table. Only the top-left
    /// `height x width` region is used. Callers guarantee validity.
    pub(crate) const fn fixed(height: u8, width: u8, rows: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Self {
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < height as usize {
            let mut c = 0;
            while c < width as usize {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Whether `(row, col)` inside the bounding box is filled
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height as usize && col < self.width as usize && self.cells[row][col]
    }

    /// Filled cells as `(row, col)` offsets from the top-left corner
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as usize).flat_map(move |r| {
            (0..self.width as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.filled().count()
    }

    /// Rotate 90° clockwise: `rotated[i][j] = original[h - 1 - j][i]`.
    ///
    /// Width and height swap. The original is left untouched.
    pub fn rotated_cw(&self) -> Self {
        let h = self.height as usize;
        let w = self.width as usize;
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, row) in cells.iter_mut().enumerate().take(w) {
            for (j, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - j][i];
            }
        }
        Self {
            height: self.width,
            width: self.height,
            cells,
        }
    }

    /// Rows of 0/1 values, mostly for debugging and tests
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|r| {
                (0..self.width as usize)
                    .map(|c| self.cells[r][c] as u8)
                    .collect()
            })
            .collect()
    }
}
