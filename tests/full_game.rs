//! Full-game integration tests: the engine driving complete games through
//! the controller, and a strength check against a random mover.

use puissance4::game_controller::{GameController, GameStatus, MoveResult};
use puissance4::games::connect4::{Connect4Move, Connect4State, RED, YELLOW};
use puissance4::{GameState, Minimax};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

#[test]
fn ai_vs_ai_game_completes() {
    let engine = Minimax::new(4, 2, Some(3));
    let mut controller = GameController::new(Connect4State::new(7, 6, 4));

    let mut moves = 0;
    while !controller.is_game_over() {
        let (mv, _) = engine.search(&controller.get_state_for_search());
        match controller.try_make_move(mv) {
            MoveResult::Success { .. } => moves += 1,
            other => panic!("engine produced a rejected move: {:?}", other),
        }
        assert!(moves <= 42, "game ran past a full board");
    }

    assert_ne!(controller.get_status(), GameStatus::InProgress);
    assert_eq!(controller.move_count(), moves);
    // History numbering stays consecutive and alternates players.
    for (i, entry) in controller.get_move_history().iter().enumerate() {
        assert_eq!(entry.move_number, i + 1);
        if i > 0 {
            assert_ne!(entry.player, controller.get_move_history()[i - 1].player);
        }
    }
}

#[test]
fn engine_beats_random_mover() {
    let engine = Minimax::new(4, 2, Some(11));
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);

    let games = 10;
    let mut engine_wins = 0;
    for game_no in 0..games {
        // The engine alternates sides across the series.
        let engine_player = if game_no % 2 == 0 { RED } else { YELLOW };
        let mut state = Connect4State::new(7, 6, 4);

        while !state.is_terminal() {
            let mv = if state.get_current_player() == engine_player {
                engine.search(&state).0
            } else {
                let moves = state.get_possible_moves();
                moves[rng.gen_range(0..moves.len())]
            };
            state.make_move(&mv);
        }

        if state.get_winner() == Some(engine_player) {
            engine_wins += 1;
        }
    }

    assert!(
        engine_wins >= 8,
        "engine should dominate a random mover, won {}/{}",
        engine_wins,
        games
    );
}

#[test]
fn engine_never_picks_a_full_column() {
    let engine = Minimax::new(3, 2, Some(5));
    let mut state = Connect4State::new(7, 6, 4);
    // Fill column 3 completely.
    for _ in 0..6 {
        state.make_move(&Connect4Move(3));
    }

    for _ in 0..5 {
        let (mv, stats) = engine.search(&state);
        assert_ne!(mv, Connect4Move(3));
        assert_eq!(stats.root_scores.len(), 6);
        state.make_move(&mv);
        if state.is_terminal() {
            break;
        }
    }
}

#[test]
fn controller_status_matches_board_outcome() {
    let engine = Minimax::new(2, 1, Some(9));
    let mut controller = GameController::new(Connect4State::new(7, 6, 4).with_to_move(YELLOW));

    while !controller.is_game_over() {
        let (mv, _) = engine.search(&controller.get_state_for_search());
        controller.try_make_move(mv);
    }

    let state = controller.get_render_state();
    assert!(state.is_terminal());
    assert_eq!(controller.get_winner(), state.get_winner());
    match controller.get_status() {
        GameStatus::Win(w) => assert_eq!(state.get_winner(), Some(w)),
        GameStatus::Draw => assert_eq!(state.get_winner(), None),
        GameStatus::InProgress => panic!("loop exited with game in progress"),
    }
}
