//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the whole falling-block state machine. It has **no**
//! dependencies on terminals, input devices, clocks or files:
//!
//! - **Deterministic**: the same seed and the same calls produce the same game
//! - **Synchronous**: every operation completes before it returns
//! - **Host-driven**: gravity and time only move when the host says so
//!
//! # Module Structure
//!
//! - [`grid`]: 20x10 board of locked colors, row clearing
//! - [`shape`]: binary shape matrices and clockwise rotation
//! - [`piece`]: the falling piece and its spawn position
//! - [`catalog`]: ordered `(shape, color)` configuration
//! - [`collision`]: the single legality check used by every move
//! - [`rng`]: seeded uniform piece picker
//! - [`power`]: timed bonus state
//! - [`game_state`]: the state machine tying it all together
//! - [`snapshot`]: copyable read-only view for renderers
//!
//! # Game Rules
//!
//! - A piece spawns on the top row, horizontally centered.
//! - Each step moves it down one row; when it cannot move it locks.
//! - After a lock, full rows are cleared in one bottom-up pass, +100 each.
//! - Landing on a positive multiple of 1000 (re)starts a 10 second power state.
//! - If the next piece collides where it spawns, the game is over.
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::classic(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::SoftDrop);
//!
//! // One host tick: 16ms of clock plus one gravity step.
//! game.tick(16);
//! assert!(!game.game_over());
//! ```

pub mod catalog;
pub mod collision;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod power;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use catalog::{CatalogEntry, CatalogError, ShapeCatalog};
pub use collision::collides;
pub use game_state::{GameState, Phase};
pub use grid::{ClearedRows, Grid, GRID_COLS, GRID_ROWS};
pub use piece::Piece;
pub use power::PowerState;
pub use rng::{PiecePicker, SimpleRng};
pub use shape::{Shape, ShapeError};
pub use snapshot::{ActiveSnapshot, GameSnapshot, PreviewSnapshot};
