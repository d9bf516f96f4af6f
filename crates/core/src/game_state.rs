//! Game state module - the state machine that owns a whole game
//!
//! Ties together grid, catalog, piece picker, collision detection, scoring and
//! the power timer. Every public operation runs to completion synchronously;
//! nothing here owns a clock or schedules work. Hosts drive gravity by calling
//! [`GameState::step`] (or [`GameState::tick`]) and report elapsed time with
//! [`GameState::advance_time`].

use arrayvec::ArrayVec;

use crate::catalog::{CatalogEntry, ShapeCatalog};
use crate::collision::collides;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::power::{triggers_power, PowerState};
use crate::rng::PiecePicker;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PreviewSnapshot};
use crate::types::*;

/// Largest number of cells a piece can occupy
const MAX_PIECE_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// Where the state machine is in its spawn/fall/lock/clear cycle.
///
/// `Locking`, `Clearing` and `Spawning` only exist inside a single operation;
/// between operations the phase is always `Falling` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    Clearing,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    catalog: ShapeCatalog,
    picker: PiecePicker,
    /// The falling piece. Kept after game over so the blocked spawn can be drawn.
    active: Option<Piece>,
    phase: Phase,
    /// Monotonic id for spawned pieces (increments on every spawn attempt).
    piece_id: u32,
    score: u32,
    lines: u32,
    power: PowerState,
    /// Game clock in milliseconds, advanced only by the host.
    clock_ms: u64,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game on an empty grid and spawn the first piece
    pub fn new(catalog: ShapeCatalog, seed: u32) -> Self {
        Self::with_grid(Grid::new(), catalog, seed)
    }

    /// Create a new game with the classic seven shapes
    pub fn classic(seed: u32) -> Self {
        Self::new(ShapeCatalog::classic(), seed)
    }

    /// Create a new game on a prepared grid.
    ///
    /// If the first piece already collides at its spawn position the game is
    /// over from the start.
    pub fn with_grid(grid: Grid, catalog: ShapeCatalog, seed: u32) -> Self {
        let picker = PiecePicker::new(seed, catalog.len());
        let mut state = Self {
            grid,
            catalog,
            picker,
            active: None,
            phase: Phase::Spawning,
            piece_id: 0,
            score: 0,
            lines: 0,
            power: PowerState::new(),
            clock_ms: 0,
            last_event: None,
        };
        state.spawn_piece();
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn power_active(&self) -> bool {
        self.power.is_active()
    }

    /// Game-clock time at which power turns off, if active
    pub fn power_expires_at(&self) -> Option<u64> {
        self.power.expires_at()
    }

    pub fn power_remaining_ms(&self) -> u64 {
        self.power.remaining_ms(self.clock_ms)
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    /// Catalog entry the next spawn will use
    pub fn next_entry(&self) -> Option<&CatalogEntry> {
        self.catalog.get(self.picker.peek())
    }

    pub fn seed(&self) -> u32 {
        self.picker.seed()
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (row, cells) in out.board.iter_mut().enumerate() {
            if let Some(src) = self.grid.row(row) {
                cells.copy_from_slice(src);
            }
        }

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next_entry().map(PreviewSnapshot::from);
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.lines = self.lines;
        out.power_active = self.power.is_active();
        out.power_remaining_ms = self.power_remaining_ms();
        out.game_over = self.game_over();
        out.clock_ms = self.clock_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn the next piece from the picker.
    ///
    /// Returns false (and ends the game) if the new piece collides where it
    /// spawned.
    fn spawn_piece(&mut self) -> bool {
        self.phase = Phase::Spawning;

        let index = self.picker.draw();
        let Some(piece) = self.catalog.spawn(index) else {
            self.phase = Phase::GameOver;
            return false;
        };

        self.piece_id = self.piece_id.wrapping_add(1);
        self.active = Some(piece);

        if collides(&self.grid, &piece, &piece.shape, 0, 0) {
            self.phase = Phase::GameOver;
            return false;
        }

        self.phase = Phase::Falling;
        true
    }

    /// One gravity step.
    ///
    /// Moves the piece down a row if it can. Otherwise locks it, clears full
    /// rows, scores them and spawns the next piece (possibly ending the game).
    /// Returns false only when nothing happened (game over).
    pub fn step(&mut self) -> bool {
        if self.game_over() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        if !collides(&self.grid, &piece, &piece.shape, 0, 1) {
            self.active = Some(Piece {
                y: piece.y + 1,
                ..piece
            });
            return true;
        }

        self.lock_piece(piece);
        true
    }

    /// Immediate single-row drop requested by the player. Same as [`Self::step`].
    pub fn soft_drop(&mut self) -> bool {
        self.step()
    }

    /// Shift the piece one column (`dir` is -1 or +1) if nothing is in the way
    pub fn move_horizontal(&mut self, dir: i8) -> bool {
        if self.game_over() || (dir != -1 && dir != 1) {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        if collides(&self.grid, &piece, &piece.shape, dir, 0) {
            return false;
        }
        self.active = Some(Piece {
            x: piece.x + dir,
            ..piece
        });
        true
    }

    /// Rotate the piece clockwise in place if the rotated shape fits
    pub fn rotate(&mut self) -> bool {
        if self.game_over() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let rotated = piece.rotated_shape();
        if collides(&self.grid, &piece, &rotated, 0, 0) {
            return false;
        }
        self.active = Some(Piece {
            shape: rotated,
            ..piece
        });
        true
    }

    /// Apply a player intent
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_horizontal(-1),
            GameAction::MoveRight => self.move_horizontal(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
        }
    }

    /// Advance the game clock. Returns true if power expired during this call.
    ///
    /// The clock keeps running after game over so hosts can let the power
    /// indicator wind down.
    pub fn advance_time(&mut self, elapsed_ms: u64) -> bool {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        self.power.expire(self.clock_ms)
    }

    /// Host tick: advance the clock, then run one gravity step
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.advance_time(elapsed_ms as u64);
        self.step()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    fn lock_piece(&mut self, piece: Piece) {
        self.phase = Phase::Locking;

        let blocks: ArrayVec<(i8, i8, Color), MAX_PIECE_CELLS> = piece
            .cells()
            .map(|(row, col)| (row, col, piece.color))
            .collect();
        let locked = self.grid.lock(&blocks);
        debug_assert!(locked, "lock target out of bounds or occupied: {:?}", piece);
        self.active = None;

        self.phase = Phase::Clearing;
        let score_before = self.score;
        let mut power_activated = false;
        let cleared = self.grid.clear_full_rows();
        for _ in &cleared {
            self.score = self.score.saturating_add(SCORE_PER_ROW);
            if triggers_power(self.score) {
                self.power.activate(self.clock_ms);
                power_activated = true;
            }
        }
        self.lines = self.lines.saturating_add(cleared.len() as u32);

        let spawned = self.spawn_piece();

        self.last_event = Some(LockEvent {
            rows_cleared: cleared.len() as u32,
            score_gained: self.score - score_before,
            score: self.score,
            power_activated,
            game_over: !spawned,
        });
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::classic(1)
    }
}
