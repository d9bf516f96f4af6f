//! Blockfall (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `blockfall::{core,input,term,types}` and adds the pieces
//! only the binary needs: environment configuration, tick pacing and the
//! JSON-lines event log.

pub mod config;
pub mod event_log;
pub mod pacing;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::RunConfig;
pub use event_log::{EventLog, LogRecord};
pub use pacing::TickPacer;
