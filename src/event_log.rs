//! JSON-lines game event log.
//!
//! One record per line, tagged by `"event"`:
//!
//! ```text
//! {"event":"start","seed":7,"tick_ms":16,"shapes":7,"colors":["#ff6b6b","#4ecdc4",...]}
//! {"event":"lock","clock_ms":5120,"piece_id":12,"rows_cleared":1,"score_gained":100,"score":300,"lines":3,"power_activated":false}
//! {"event":"power","clock_ms":15120,"active":false,"expires_at_ms":null}
//! {"event":"game_over","clock_ms":60000,"score":1200,"lines":12,"pieces":88}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::GameState;
use crate::types::LockEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogRecord {
    Start {
        seed: u32,
        tick_ms: u32,
        shapes: usize,
        colors: Vec<String>,
    },
    Lock {
        clock_ms: u64,
        piece_id: u32,
        rows_cleared: u32,
        score_gained: u32,
        score: u32,
        lines: u32,
        power_activated: bool,
    },
    Power {
        clock_ms: u64,
        active: bool,
        expires_at_ms: Option<u64>,
    },
    GameOver {
        clock_ms: u64,
        score: u32,
        lines: u32,
        pieces: u32,
    },
}

impl LogRecord {
    pub fn start(game: &GameState, tick_ms: u32) -> Self {
        Self::Start {
            seed: game.seed(),
            tick_ms,
            shapes: game.catalog().len(),
            colors: game.catalog().iter().map(|e| e.color.to_hex()).collect(),
        }
    }

    /// `piece_id` is the piece that locked, so read it before any later spawn
    /// is observed.
    pub fn lock(game: &GameState, piece_id: u32, event: &LockEvent) -> Self {
        Self::Lock {
            clock_ms: game.clock_ms(),
            piece_id,
            rows_cleared: event.rows_cleared,
            score_gained: event.score_gained,
            score: event.score,
            lines: game.lines(),
            power_activated: event.power_activated,
        }
    }

    pub fn power(game: &GameState) -> Self {
        Self::Power {
            clock_ms: game.clock_ms(),
            active: game.power_active(),
            expires_at_ms: game.power_expires_at(),
        }
    }

    pub fn game_over(game: &GameState) -> Self {
        Self::GameOver {
            clock_ms: game.clock_ms(),
            score: game.score(),
            lines: game.lines(),
            pieces: game.piece_id(),
        }
    }
}

/// Buffered writer of [`LogRecord`] lines.
pub struct EventLog<W: Write> {
    out: W,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write(&mut self, record: &LogRecord) -> Result<()> {
        serde_json::to_writer(&mut self.out, record).context("serialize log record")?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flush event log")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
