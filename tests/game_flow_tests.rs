//! End-to-end game flow through the public `GameState` API.

use std::time::{Duration, Instant};

use blockfall::core::{GameState, Grid, Phase, Shape, ShapeCatalog};
use blockfall::types::{Color, GameAction, LockEvent, POWER_DURATION_MS};
use blockfall::TickPacer;

const RED: Color = Color::rgb(0xff, 0x6b, 0x6b);
const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);

/// Catalog with only the horizontal four-wide bar.
fn bar_catalog() -> ShapeCatalog {
    ShapeCatalog::single(Shape::from_rows(&[&[1, 1, 1, 1]]).unwrap(), RED)
}

/// Step until the active piece locks and return the lock event.
fn drop_until_lock(game: &mut GameState) -> LockEvent {
    for _ in 0..64 {
        assert!(game.step(), "step rejected before the piece locked");
        if let Some(event) = game.take_last_event() {
            return event;
        }
    }
    panic!("piece never locked");
}

/// Grid whose rows `rows` are full except columns 3..=6.
fn grid_with_bar_slots(rows: std::ops::Range<usize>) -> Grid {
    let mut grid = Grid::new();
    for row in rows {
        grid.fill_row_except(row, &[3, 4, 5, 6], GRAY);
    }
    grid
}

#[test]
fn bar_falls_twenty_steps_and_locks_on_bottom_row() {
    let mut game = GameState::new(bar_catalog(), 1);
    let piece = game.active().unwrap();
    assert_eq!((piece.x, piece.y), (3, 0));

    for expected_y in 1..=19 {
        assert!(game.step());
        assert_eq!(game.active().unwrap().y, expected_y);
        assert!(game.take_last_event().is_none());
    }

    // 20th step cannot move, so it locks and spawns.
    assert!(game.step());
    let event = game.take_last_event().expect("lock event");
    assert_eq!(event.rows_cleared, 0);
    assert!(!event.game_over);

    for col in 3..=6 {
        assert!(game.grid().is_occupied(19, col));
    }
    assert_eq!(game.grid().filled_count(), 4);

    let next = game.active().unwrap();
    assert_eq!((next.x, next.y), (3, 0));
    assert_eq!(game.piece_id(), 2);
    assert_eq!(game.phase(), Phase::Falling);
    assert!(!game.game_over());
}

#[test]
fn completing_a_row_clears_it_and_scores_100() {
    let mut game = GameState::with_grid(grid_with_bar_slots(19..20), bar_catalog(), 1);

    let event = drop_until_lock(&mut game);
    assert_eq!(event.rows_cleared, 1);
    assert_eq!(event.score_gained, 100);
    assert_eq!(game.score(), 100);
    assert_eq!(game.lines(), 1);
    assert_eq!(game.grid().filled_count(), 0);
}

#[test]
fn rows_separated_by_a_gap_both_clear_in_one_pass() {
    let mut grid = Grid::new();
    grid.fill_row_except(19, &[3], GRAY);
    grid.fill_row_except(18, &[0, 3], GRAY);
    grid.fill_row_except(17, &[3], GRAY);
    let mut game = GameState::with_grid(grid, bar_catalog(), 1);

    // Stand the bar up in column 3; it lands covering rows 16..=19.
    assert!(game.rotate());
    let event = drop_until_lock(&mut game);

    assert_eq!(event.rows_cleared, 2);
    assert_eq!(game.score(), 200);
    // The gap row survives and sinks to the bottom, holding the bar cell.
    assert!(!game.grid().is_occupied(19, 0));
    assert!(game.grid().is_occupied(19, 1));
    assert!(game.grid().is_occupied(19, 3));
    // What was row 16 now sits at 18: only the bar's top cell.
    assert!(game.grid().is_occupied(18, 3));
    assert!(!game.grid().is_occupied(18, 4));
}

#[test]
fn adjacent_full_rows_clear_one_per_lock() {
    let mut grid = Grid::new();
    grid.fill_row_except(19, &[3], GRAY);
    grid.fill_row_except(18, &[3], GRAY);
    let mut game = GameState::with_grid(grid, bar_catalog(), 1);

    assert!(game.rotate());
    let first = drop_until_lock(&mut game);
    assert_eq!(first.rows_cleared, 1);
    assert_eq!(game.score(), 100);
    // The upper full row shifted into 19 and was not re-examined.
    assert!(game.grid().is_row_full(19));

    // Any later lock runs a new pass and picks it up.
    let second = drop_until_lock(&mut game);
    assert_eq!(second.rows_cleared, 1);
    assert_eq!(game.score(), 200);
    assert_eq!(game.lines(), 2);
    assert!(!game.grid().is_row_full(19));
}

#[test]
fn score_of_1000_activates_power_for_ten_seconds() {
    let mut game = GameState::with_grid(grid_with_bar_slots(10..20), bar_catalog(), 1);

    for n in 1..=9 {
        let event = drop_until_lock(&mut game);
        assert_eq!(game.score(), n * 100);
        assert!(!event.power_activated);
        assert!(!game.power_active());
    }

    let event = drop_until_lock(&mut game);
    assert_eq!(game.score(), 1000);
    assert!(event.power_activated);
    assert!(game.power_active());
    assert_eq!(game.power_expires_at(), Some(POWER_DURATION_MS));

    assert!(!game.advance_time(POWER_DURATION_MS - 1));
    assert!(game.power_active());
    assert!(game.advance_time(1));
    assert!(!game.power_active());
    assert_eq!(game.power_expires_at(), None);
}

#[test]
fn reaching_2000_replaces_the_power_expiry() {
    let mut game = GameState::with_grid(grid_with_bar_slots(0..20), bar_catalog(), 1);

    for _ in 0..10 {
        drop_until_lock(&mut game);
    }
    assert_eq!(game.score(), 1000);
    assert_eq!(game.power_expires_at(), Some(10_000));

    game.advance_time(5_000);
    for _ in 0..10 {
        drop_until_lock(&mut game);
    }
    assert_eq!(game.score(), 2000);
    assert_eq!(game.power_expires_at(), Some(15_000));

    // The first activation's deadline passes without turning power off.
    assert!(!game.advance_time(5_000));
    assert!(game.power_active());
    assert!(game.advance_time(5_000));
    assert!(!game.power_active());
}

#[test]
fn power_triggers_on_the_row_that_lands_on_1000_mid_pass() {
    let mut grid = Grid::new();
    // Nine slots for horizontal bars; each rests on row 17 and clears row 16.
    for row in 8..17 {
        grid.fill_row_except(row, &[3, 4, 5, 6], GRAY);
    }
    // Two full-but-one rows around a gap row for a standing bar in column 3.
    grid.fill_row_except(19, &[3], GRAY);
    grid.fill_row_except(18, &[0, 3], GRAY);
    grid.fill_row_except(17, &[3], GRAY);
    let mut game = GameState::with_grid(grid, bar_catalog(), 1);

    for _ in 0..9 {
        let event = drop_until_lock(&mut game);
        assert_eq!(event.rows_cleared, 1);
    }
    assert_eq!(game.score(), 900);
    assert!(!game.power_active());

    game.advance_time(1_234);
    assert!(game.rotate());
    let event = drop_until_lock(&mut game);

    // +100 reaches 1000 (power), the next +100 reaches 1100 (no power).
    assert_eq!(event.rows_cleared, 2);
    assert_eq!(event.score_gained, 200);
    assert_eq!(game.score(), 1100);
    assert!(event.power_activated);
    assert!(game.power_active());
    assert_eq!(game.power_expires_at(), Some(1_234 + POWER_DURATION_MS));
}

#[test]
fn paced_clock_ends_power_after_ten_real_seconds_despite_slow_frames() {
    let mut game = GameState::with_grid(grid_with_bar_slots(10..20), bar_catalog(), 1);
    for _ in 0..10 {
        drop_until_lock(&mut game);
    }
    assert!(game.power_active());

    // Every loop iteration overshoots the 16 ms tick by 2 ms.
    let t0 = Instant::now();
    let mut pacer = TickPacer::new(16, t0);
    let frame = Duration::from_millis(18);
    let mut expired_at = None;
    for i in 1..=1_000u32 {
        let now = t0 + frame * i;
        if let Some(elapsed_ms) = pacer.poll(now) {
            if game.advance_time(elapsed_ms) {
                expired_at = Some(now - t0);
                break;
            }
        }
    }
    // 10 000 ms is a multiple of 18 ms only at 10 008.
    assert_eq!(expired_at, Some(Duration::from_millis(10_008)));
}

#[test]
fn blocked_spawn_ends_the_game_and_freezes_state() {
    let mut grid = Grid::new();
    for col in 3..=6 {
        grid.set(1, col, Some(GRAY));
    }
    let mut game = GameState::with_grid(grid, bar_catalog(), 1);

    // The first bar locks on row 0 right away; the next one has nowhere to go.
    assert!(game.step());
    let event = game.take_last_event().unwrap();
    assert!(event.game_over);
    assert!(game.game_over());
    assert_eq!(game.phase(), Phase::GameOver);

    let grid_before = game.grid().clone();
    let active_before = game.active();
    assert!(active_before.is_some(), "blocked piece stays visible");

    assert!(!game.step());
    assert!(!game.soft_drop());
    assert!(!game.move_horizontal(-1));
    assert!(!game.move_horizontal(1));
    assert!(!game.rotate());
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Rotate,
    ] {
        assert!(!game.apply_action(action));
    }
    assert!(!game.tick(16));

    assert_eq!(game.grid(), &grid_before);
    assert_eq!(game.active(), active_before);
    assert_eq!(game.score(), 0);
    assert!(game.take_last_event().is_none());

    // Only the clock keeps moving.
    assert_eq!(game.clock_ms(), 16);
}

#[test]
fn first_spawn_into_occupied_cells_is_game_over() {
    let mut grid = Grid::new();
    grid.set(0, 4, Some(GRAY));
    let game = GameState::with_grid(grid, bar_catalog(), 1);

    assert!(game.game_over());
    assert_eq!(game.piece_id(), 1);
    assert!(game.snapshot().active.is_some());
}

#[test]
fn walls_stop_horizontal_moves() {
    let mut game = GameState::new(bar_catalog(), 1);

    for _ in 0..3 {
        assert!(game.move_horizontal(-1));
    }
    assert_eq!(game.active().unwrap().x, 0);
    assert!(!game.move_horizontal(-1));
    assert_eq!(game.active().unwrap().x, 0);

    for _ in 0..6 {
        assert!(game.apply_action(GameAction::MoveRight));
    }
    assert_eq!(game.active().unwrap().x, 6);
    assert!(!game.apply_action(GameAction::MoveRight));
}

#[test]
fn only_unit_directions_are_accepted() {
    let mut game = GameState::new(bar_catalog(), 1);
    assert!(!game.move_horizontal(0));
    assert!(!game.move_horizontal(2));
    assert!(!game.move_horizontal(-3));
    assert_eq!(game.active().unwrap().x, 3);
}

#[test]
fn rotation_into_a_block_is_rejected() {
    let mut grid = Grid::new();
    grid.set(2, 3, Some(GRAY));
    let mut game = GameState::with_grid(grid, bar_catalog(), 1);

    let before = game.active().unwrap();
    assert!(!game.rotate());
    assert_eq!(game.active().unwrap(), before);
}

#[test]
fn four_rotations_restore_the_piece() {
    let mut game = GameState::classic(99);
    let before = game.active().unwrap();
    for _ in 0..4 {
        assert!(game.rotate());
    }
    assert_eq!(game.active().unwrap(), before);
}

#[test]
fn tick_advances_clock_and_gravity() {
    let mut game = GameState::new(bar_catalog(), 1);
    assert!(game.tick(16));
    assert!(game.tick(16));
    assert_eq!(game.clock_ms(), 32);
    assert_eq!(game.active().unwrap().y, 2);
}

#[test]
fn same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
    ];
    let mut a = GameState::classic(2024);
    let mut b = GameState::classic(2024);

    for i in 0..2_000 {
        let action = script[i % script.len()];
        a.apply_action(action);
        b.apply_action(action);
        a.tick(16);
        b.tick(16);
        assert_eq!(a.snapshot(), b.snapshot(), "diverged at tick {i}");
        if a.game_over() {
            break;
        }
    }
}

#[test]
fn restart_is_a_fresh_state() {
    let mut game = GameState::with_grid(grid_with_bar_slots(19..20), bar_catalog(), 1);
    drop_until_lock(&mut game);
    assert_eq!(game.score(), 100);

    let game = GameState::new(bar_catalog(), 1);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert!(!game.power_active());
    assert_eq!(game.grid().filled_count(), 0);
}
