//! Terminal runner (default binary).
//!
//! Drives the deterministic core from a fixed-rate tick loop: crossterm input
//! between ticks, one gravity step per tick with the game clock advanced by
//! the real time that passed, and a diffed framebuffer redraw every iteration.

use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, should_quit, should_restart};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::{EventLog, LogRecord, RunConfig, TickPacer};

type FileLog = EventLog<BufWriter<File>>;

fn main() -> Result<()> {
    let config = RunConfig::from_env();

    let mut notes = Vec::new();
    let mut log = match config.log_path.as_deref().map(|path| FileLog::append_to(path)) {
        Some(Ok(log)) => Some(log),
        Some(Err(err)) => {
            notes.push(format!("event log disabled: {err:#}"));
            None
        }
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(log) = log.as_mut() {
        if let Err(err) = log.flush() {
            notes.push(format!("{err:#}"));
        }
    }
    for note in &notes {
        eprintln!("[Blockfall] {note}");
    }

    let game = result?;
    eprintln!(
        "[Blockfall] seed {} final score {} ({} lines, {} pieces)",
        game.seed(),
        game.score(),
        game.lines(),
        game.piece_id()
    );
    Ok(())
}

/// Runs until quit and returns the last game played.
fn run(term: &mut TerminalRenderer, config: &RunConfig, log: &mut Option<FileLog>) -> Result<GameState> {
    let mut round: u32 = 0;
    let mut game = start_game(config, round, log)?;

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut pacer = TickPacer::new(config.tick_ms, Instant::now());

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if event::poll(pacer.timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(game);
                    }
                    if should_restart(key) {
                        round = round.wrapping_add(1);
                        game = start_game(config, round, log)?;
                        pacer.reset(Instant::now());
                        continue;
                    }
                    if !game.game_over() {
                        if let Some(action) = handle_key_event(key) {
                            let piece_id = game.piece_id();
                            game.apply_action(action);
                            record_lock(&mut game, piece_id, log)?;
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if let Some(elapsed_ms) = pacer.poll(Instant::now()) {
            let piece_id = game.piece_id();
            if game.advance_time(elapsed_ms) {
                write(log, &LogRecord::power(&game))?;
            }
            game.step();
            record_lock(&mut game, piece_id, log)?;
        }
    }
}

fn start_game(config: &RunConfig, round: u32, log: &mut Option<FileLog>) -> Result<GameState> {
    let game = GameState::classic(config.seed.wrapping_add(round));
    write(log, &LogRecord::start(&game, config.tick_ms))?;
    Ok(game)
}

/// Log the lock (and anything it caused) if the last operation locked a piece.
fn record_lock(game: &mut GameState, piece_id: u32, log: &mut Option<FileLog>) -> Result<()> {
    let Some(event) = game.take_last_event() else {
        return Ok(());
    };
    write(log, &LogRecord::lock(game, piece_id, &event))?;
    if event.power_activated {
        write(log, &LogRecord::power(game))?;
    }
    if event.game_over {
        write(log, &LogRecord::game_over(game))?;
    }
    Ok(())
}

fn write(log: &mut Option<FileLog>, record: &LogRecord) -> Result<()> {
    match log {
        Some(log) => log.write(record),
        None => Ok(()),
    }
}
