//! Piece module - the active falling piece

use crate::shape::Shape;
use crate::types::{Color, BOARD_WIDTH};

/// Active falling piece.
///
/// `x`/`y` locate the top-left corner of the shape's bounding box on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at the spawn position: top row, horizontally centered
    /// as `floor(COLS / 2) - ceil(width / 2)`.
    pub fn spawn(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            x: spawn_x(shape.width()),
            y: 0,
        }
    }

    /// Occupied cells as absolute `(row, col)` grid coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(r, c)| (self.y + r, self.x + c))
    }

    /// The shape this piece would have after a clockwise rotation
    pub fn rotated_shape(&self) -> Shape {
        self.shape.rotated_cw()
    }
}

/// Spawn column for a shape of the given width
pub fn spawn_x(width: u8) -> i8 {
    (BOARD_WIDTH / 2) as i8 - width.div_ceil(2) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_centers_by_width() {
        assert_eq!(spawn_x(4), 3);
        assert_eq!(spawn_x(3), 3);
        assert_eq!(spawn_x(2), 4);
        assert_eq!(spawn_x(1), 4);
    }

    #[test]
    fn test_cells_are_absolute() {
        let t = Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]).unwrap();
        let mut piece = Piece::spawn(t, Color::rgb(1, 2, 3));
        piece.y = 5;

        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(5, 3), (5, 4), (5, 5), (6, 4)]);
    }

    #[test]
    fn test_rotated_shape_leaves_piece_untouched() {
        let bar = Shape::from_rows(&[&[1, 1, 1, 1]]).unwrap();
        let piece = Piece::spawn(bar, Color::default());

        let rotated = piece.rotated_shape();
        assert_eq!(rotated.height(), 4);
        assert_eq!(piece.shape, bar);
    }
}
