use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use twenty_forty_eight::{
    is_game_over, legal_moves, Direction, GameError, GameState, Grid, RngSource, ScriptedSource,
    Tile,
};

const TEST_SEED: u64 = 42;

fn state_from<const N: usize>(rows: [[Tile; N]; N]) -> GameState {
    GameState::from_grid(Grid::from_rows(rows).unwrap())
}

#[test]
fn test_new_state() {
    let state = GameState::new(4, &mut RngSource::seeded(TEST_SEED)).unwrap();

    assert_eq!(state.score, 0);
    assert_eq!(state.moves, 0);
    assert!(!state.game_over);
    assert_eq!(state.grid.empty_count(), 14);
}

#[test]
fn test_new_state_invalid_size() {
    let result = GameState::new(1, &mut RngSource::seeded(TEST_SEED));

    assert_eq!(result, Err(GameError::InvalidSize(1)));
}

#[test]
fn test_changed_move_scores_and_spawns() {
    let state = state_from([[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
    let mut source = ScriptedSource::new([0], [2]);

    let (next, turn) = state.advance(Direction::Left, &mut source);

    assert!(turn.changed);
    assert_eq!(turn.gained, 4);
    assert_eq!(next.score, 4);
    assert_eq!(next.moves, 1);
    // merged 4 at (0,0), spawned 2 in the first empty cell
    assert_eq!(next.grid.to_rows()[0], vec![4, 2, 0, 0]);
    assert!(!next.game_over);
    assert_eq!(source.remaining(), (0, 0));
}

#[test]
fn test_unchanged_move_is_a_no_op() {
    let state = state_from([[2, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
    let mut source = ScriptedSource::new([3], [4]);

    let (next, turn) = state.advance(Direction::Left, &mut source);

    assert!(!turn.changed);
    assert_eq!(turn.gained, 0);
    assert_eq!(next, state);
    // no tile spawned, no randomness consumed
    assert_eq!(source.remaining(), (1, 1));
}

#[test]
fn test_spawn_can_end_the_game() {
    let state = state_from([[2, 4], [8, 0]]);
    let mut source = ScriptedSource::new([0], [4]);

    let (next, turn) = state.advance(Direction::Right, &mut source);

    assert!(turn.changed);
    assert_eq!(next.grid, Grid::from_rows([[2, 4], [4, 8]]).unwrap());
    assert!(next.game_over);
    assert_eq!(next.score, 0);
    assert_eq!(next.moves, 1);
}

#[test]
fn test_spawn_can_leave_a_merge() {
    let state = state_from([[2, 4], [8, 0]]);
    let mut source = ScriptedSource::new([0], [2]);

    let (next, _) = state.advance(Direction::Right, &mut source);

    assert_eq!(next.grid, Grid::from_rows([[2, 4], [2, 8]]).unwrap());
    assert!(!next.game_over);
}

#[test]
fn test_finished_game_ignores_moves() {
    let state = state_from([[2, 4], [4, 2]]);
    assert!(state.game_over);

    let mut source = RngSource::seeded(TEST_SEED);

    for direction in Direction::ALL {
        let (next, turn) = state.advance(direction, &mut source);

        assert!(!turn.changed);
        assert_eq!(next, state);
    }
}

#[test]
fn test_replay_is_deterministic() {
    let moves = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ]
    .repeat(10);

    let play = || {
        let mut source = RngSource::seeded(TEST_SEED);
        let start = GameState::new(4, &mut source).unwrap();
        start.replay(moves.iter().copied(), &mut source)
    };

    assert_eq!(play(), play());
}

#[test]
fn test_replay_stops_at_game_over() {
    let state = state_from([[2, 4], [8, 0]]);
    let mut source = ScriptedSource::new([0, 0], [4, 4]);

    let end = state.replay([Direction::Right, Direction::Left, Direction::Up], &mut source);

    assert!(end.game_over);
    assert_eq!(end.moves, 1);
    assert_eq!(source.remaining(), (1, 1));
}

#[test]
fn test_random_play_keeps_invariants() {
    let mut source = RngSource::seeded(TEST_SEED);
    let mut chooser = XorShiftRng::seed_from_u64(TEST_SEED + 1);
    let mut state = GameState::new(4, &mut source).unwrap();
    let mut turns = 0;

    while !state.game_over && turns < 5000 {
        let choices: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| legal_moves(&state.grid)[direction])
            .collect();

        assert!(!choices.is_empty(), "live game without a legal move");

        let direction = *choices.choose(&mut chooser).unwrap();
        let before = state.grid.total();
        let (next, turn) = state.advance(direction, &mut source);

        assert!(turn.changed);
        assert_eq!(next.score, state.score + turn.gained);
        assert_eq!(next.moves, state.moves + 1);

        // merges conserve the total, the spawn adds 2 or 4
        let added = next.grid.total() - before;
        assert!(added == 2 || added == 4, "added {}", added);

        for &value in next.grid.cells() {
            assert!(value == 0 || (value >= 2 && value.is_power_of_two()));
        }

        assert_eq!(next.game_over, is_game_over(&next.grid));

        state = next;
        turns += 1;
    }

    assert!(state.game_over);
    assert!(state.score > 0);
}

#[cfg(feature = "serde")]
#[test]
fn test_state_json() {
    let state = state_from([[2, 0], [0, 4]]);

    let json = serde_json::to_value(&state).unwrap();

    assert_eq!(json["grid"]["size"], 2);
    assert_eq!(json["grid"]["cells"], serde_json::json!([2, 0, 0, 4]));
    assert_eq!(json["game_over"], false);

    let back: GameState = serde_json::from_value(json).unwrap();
    assert_eq!(back, state);
}

#[cfg(feature = "serde")]
#[test]
fn test_state_json_rejects_bad_grid() {
    let bad = serde_json::json!({
        "grid": { "size": 2, "cells": [2, 0, 3, 0] },
        "score": 0,
        "game_over": false,
        "moves": 0
    });

    assert!(serde_json::from_value::<GameState>(bad).is_err());

    let short = serde_json::json!({
        "grid": { "size": 3, "cells": [2, 0, 0, 0] },
        "score": 0,
        "game_over": false,
        "moves": 0
    });

    assert!(serde_json::from_value::<GameState>(short).is_err());

    let locked_but_live = serde_json::json!({
        "grid": { "size": 2, "cells": [2, 4, 4, 2] },
        "score": 0,
        "game_over": false,
        "moves": 0
    });

    assert!(serde_json::from_value::<GameState>(locked_but_live)
        .unwrap_err()
        .to_string()
        .contains("game_over=false"));

    let open_but_over = serde_json::json!({
        "grid": { "size": 2, "cells": [2, 0, 0, 0] },
        "score": 0,
        "game_over": true,
        "moves": 0
    });

    assert!(serde_json::from_value::<GameState>(open_but_over).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn test_state_json_accepts_finished_game() {
    let finished = state_from([[2, 4], [4, 2]]);
    assert!(finished.game_over);

    let json = serde_json::to_string(&finished).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();

    assert_eq!(back, finished);
}
