//! Collision detection between a proposed piece placement and the grid.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::shape::Shape;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Would `shape`, placed at the piece's position shifted by `(dx, dy)`, collide?
///
/// A filled cell collides when it lands left of column 0, right of the last
/// column, below the last row, or on an occupied grid cell. Cells above the top
/// row are ignored so freshly spawned pieces may poke out of the board.
///
/// Pass `piece.shape` for moves and a rotated shape for rotations.
pub fn collides(grid: &Grid, piece: &Piece, shape: &Shape, dx: i8, dy: i8) -> bool {
    shape.filled().any(|(r, c)| {
        let x = piece.x + c + dx;
        let y = piece.y + r + dy;

        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        grid.is_occupied(y, x)
    })
}
