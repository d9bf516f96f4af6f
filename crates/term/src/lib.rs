//! Terminal frontend for the falling-block game.
//!
//! Rendering is split in two so the interesting part stays testable:
//! [`GameView`] turns a `GameSnapshot` into a [`FrameBuffer`] without any
//! I/O, and [`TerminalRenderer`] diffs framebuffers onto the real terminal
//! through crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Style};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
