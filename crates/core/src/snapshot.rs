use crate::catalog::CatalogEntry;
use crate::piece::Piece;
use crate::shape::Shape;
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: value.shape,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Occupied cells as absolute `(row, col)` grid coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(r, c)| (self.y + r, self.x + c))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewSnapshot {
    pub shape: Shape,
    pub color: Color,
}

impl From<&CatalogEntry> for PreviewSnapshot {
    fn from(value: &CatalogEntry) -> Self {
        Self {
            shape: value.shape,
            color: value.color,
        }
    }
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PreviewSnapshot>,
    pub piece_id: u32,
    pub score: u32,
    pub lines: u32,
    pub power_active: bool,
    pub power_remaining_ms: u64,
    pub game_over: bool,
    pub clock_ms: u64,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            piece_id: 0,
            score: 0,
            lines: 0,
            power_active: false,
            power_remaining_ms: 0,
            game_over: false,
            clock_ms: 0,
        }
    }
}
