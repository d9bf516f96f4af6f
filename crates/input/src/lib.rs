//! Terminal input mapping.
//!
//! Translates `crossterm` key events into the four player intents understood by
//! the state machine, plus the host-level quit and restart keys. Restarting is
//! the host's job: it builds a fresh `GameState`.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit, should_restart};
