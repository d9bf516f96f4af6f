//! Shared types and constants for the falling-block game.
//!
//! Everything here is plain data with no dependencies, so it can be used by the
//! core state machine, the terminal frontend and the event log alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Scoring and Power
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCORE_PER_ROW` | 100 | Points per cleared row |
//! | `POWER_SCORE_INTERVAL` | 1000 | Power activates when the score lands on a multiple |
//! | `POWER_DURATION_MS` | 10000 | Power lasts this long after the latest activation |
//! | `TICK_MS` | 16 | Default host tick (~60 steps/s) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let color = Color::from_hex("#ff6b6b").unwrap();
//! assert_eq!(color, Color::rgb(0xff, 0x6b, 0x6b));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default host tick interval in milliseconds (16ms ≈ 60 steps per second)
pub const TICK_MS: u32 = 16;

/// Points awarded for each cleared row
pub const SCORE_PER_ROW: u32 = 100;

/// Power activates when the score becomes a positive multiple of this value
pub const POWER_SCORE_INTERVAL: u32 = 1000;

/// Power lasts this long after its most recent activation
pub const POWER_DURATION_MS: u64 = 10_000;

/// Largest shape bounding box (rows and columns)
pub const MAX_SHAPE_DIM: usize = 4;

/// Opaque color token stored in locked cells.
///
/// The core never interprets it; renderers map it to whatever their surface
/// understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Color;
    ///
    /// assert_eq!(Color::from_hex("#4ecdc4"), Some(Color::rgb(0x4e, 0xcd, 0xc4)));
    /// assert_eq!(Color::from_hex("45B7D1"), Some(Color::rgb(0x45, 0xb7, 0xd1)));
    /// assert_eq!(Color::from_hex("#fff"), None);
    /// assert_eq!(Color::from_hex("#gg0000"), None);
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Locked block of that color
pub type Cell = Option<Color>;

/// Player intents accepted by the state machine.
///
/// Input sources translate raw events into exactly these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Run one gravity step immediately
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
}

/// Event emitted when a piece locks.
///
/// Produced by the state machine and consumed by hosts (event log, UI effects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// Rows cleared by this lock's single bottom-up pass.
    pub rows_cleared: u32,
    /// Points gained by this lock.
    pub score_gained: u32,
    /// Score after the lock.
    pub score: u32,
    /// Whether power was (re)activated by this lock.
    pub power_activated: bool,
    /// Whether the following spawn ended the game.
    pub game_over: bool,
}
