//! Integration tests for the rules engine.
//!
//! Scenario tests walk through concrete positions; the property tests play
//! random legal games and check what must hold in every reachable position.

use chess_core::{Board, Color, Move, Piece, PieceKind, Square};
use chess_engine::{
    apply_move, new_game, Game, GameResult, GameState, IllegalMove, MoveError, MoveOutcome,
    RulesEngine, Terminal,
};
use proptest::prelude::*;

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn state(fen: &str) -> GameState {
    GameState::from_fen(fen).unwrap()
}

fn play(state: &GameState, from: &str, to: &str) -> (GameState, MoveOutcome) {
    apply_move(state, sq(from), sq(to)).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn pawn_double_step_only_from_start_row() {
    let start = new_game();
    assert!(RulesEngine
        .is_legal(start.board(), Color::White, sq("b2"), sq("b4"))
        .unwrap());

    let (s, _) = play(&start, "b2", "b4");
    let (s, _) = play(&s, "e7", "e6");

    assert_eq!(
        apply_move(&s, sq("b4"), sq("b6")),
        Err(MoveError::Illegal(IllegalMove::GeometricallyIllegal {
            piece: Piece::new(Color::White, PieceKind::Pawn),
            from: sq("b4"),
            to: sq("b6"),
        }))
    );
    assert!(apply_move(&s, sq("b4"), sq("b5")).is_ok());
}

#[test]
fn rook_blocked_until_file_is_clear() {
    let start = new_game();
    assert!(!RulesEngine.is_pseudo_legal(start.board(), sq("a1"), sq("a8")));

    let blocked = state("r3k3/8/8/8/8/8/P7/R3K3 w");
    assert!(matches!(
        apply_move(&blocked, sq("a1"), sq("a8")),
        Err(MoveError::Illegal(IllegalMove::GeometricallyIllegal { .. }))
    ));

    let clear = state("r3k3/8/8/8/8/8/8/R3K3 w");
    let (next, _) = play(&clear, "a1", "a8");
    assert_eq!(
        next.board().occupant_at(sq("a8")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert_eq!(next.board().pieces(Color::Black).count(), 1);
}

#[test]
fn moving_elsewhere_while_in_check_is_self_check() {
    // Rook on e8 checks the king on e1 down an open file.
    let s = state("4r1k1/8/8/8/8/8/8/1N2K3 w");
    assert!(RulesEngine.is_in_check(s.board(), Color::White).unwrap());

    assert_eq!(
        apply_move(&s, sq("b1"), sq("c3")),
        Err(MoveError::Illegal(IllegalMove::SelfCheck {
            from: sq("b1"),
            to: sq("c3"),
        }))
    );

    let legal = RulesEngine.legal_moves(s.board(), Color::White).unwrap();
    assert!(legal.iter().all(|m| m.from() == sq("e1")));
    assert!(legal.contains(Move::new(sq("e1"), sq("d1"))));
    assert!(!legal.contains(Move::new(sq("e1"), sq("e2"))));
}

#[test]
fn back_rank_mate() {
    let s = state("6k1/5ppp/8/8/8/8/8/Q5K1 w");
    let (mated, outcome) = play(&s, "a1", "a8");

    assert_eq!(outcome, MoveOutcome::Checkmate);
    assert_eq!(mated.terminal(), Some(Terminal::Checkmate));
    assert_eq!(mated.side_to_move(), Color::Black);

    assert_eq!(
        apply_move(&mated, sq("g8"), sq("h8")),
        Err(MoveError::Illegal(IllegalMove::GameAlreadyTerminal(
            Terminal::Checkmate
        )))
    );
}

#[test]
fn back_rank_escape_is_only_check() {
    // Same idea, but h7 has advanced so the king can breathe.
    let s = state("6k1/5pp1/7p/8/8/8/8/Q5K1 w");
    let (_, outcome) = play(&s, "a1", "a8");
    assert_eq!(outcome, MoveOutcome::Check);
}

#[test]
fn king_and_queen_stalemate() {
    let s = state("k7/8/1K6/8/8/8/8/2Q5 w");
    let (next, outcome) = play(&s, "c1", "c7");

    assert_eq!(outcome, MoveOutcome::Stalemate);
    assert_eq!(next.terminal(), Some(Terminal::Stalemate));
    assert!(!RulesEngine.is_in_check(next.board(), Color::Black).unwrap());
}

#[test]
fn game_records_fools_mate() {
    let mut game = Game::new();
    for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        game.make_move_uci(uci).unwrap();
    }
    let record = game.record().unwrap();
    assert_eq!(record.result, GameResult::BlackWins);
    assert_eq!(
        record
            .moves
            .iter()
            .map(|m| m.to_uci())
            .collect::<Vec<_>>(),
        vec!["f2f3", "e7e5", "g2g4", "d8h4"]
    );
}

#[test]
fn pawn_on_last_row_stays_a_pawn() {
    let s = state("k7/4P3/8/8/8/8/8/K7 w");
    let (next, _) = play(&s, "e7", "e8");
    assert_eq!(
        next.board().occupant_at(sq("e8")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    // And it has nowhere further to go.
    let legal = RulesEngine.legal_moves(next.board(), Color::White);
    assert!(legal.unwrap().from_square(sq("e8")).next().is_none());
}

// ============================================================================
// Properties over random play
// ============================================================================

/// Plays from the start, choosing each move by index into the legal list.
fn random_walk(choices: &[usize]) -> GameState {
    let mut state = new_game();
    for &choice in choices {
        if state.is_terminal() {
            break;
        }
        let legal = RulesEngine
            .legal_moves(state.board(), state.side_to_move())
            .unwrap();
        let m = legal[choice % legal.len()];
        state = apply_move(&state, m.from(), m.to()).unwrap().0;
    }
    state
}

fn king_count(board: &Board, color: Color) -> usize {
    board.count(Piece::new(color, PieceKind::King))
}

fn sorted(moves: impl Iterator<Item = Move>) -> Vec<(u8, u8)> {
    let mut out: Vec<_> = moves.map(|m| (m.from().index(), m.to().index())).collect();
    out.sort_unstable();
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn kings_survive_random_play(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        let state = random_walk(&choices);
        let board = state.board();

        prop_assert_eq!(king_count(board, Color::White), 1);
        prop_assert_eq!(king_count(board, Color::Black), 1);

        // The side that just moved never leaves its own king attacked.
        let waiting = state.side_to_move().opposite();
        prop_assert!(!RulesEngine.is_in_check(board, waiting).unwrap());
    }

    #[test]
    fn legal_moves_mirror_across_colors(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let state = random_walk(&choices);
        let side = state.side_to_move();
        let board = state.board();
        let mirrored = board.mirrored();

        let ours = RulesEngine.legal_moves(board, side).unwrap();
        let theirs = RulesEngine.legal_moves(&mirrored, side.opposite()).unwrap();

        prop_assert_eq!(
            sorted(ours.iter().map(|m| m.mirrored())),
            sorted(theirs.iter().copied())
        );
    }

    #[test]
    fn apply_move_agrees_with_legal_list(
        choices in prop::collection::vec(any::<usize>(), 0..30),
        from in 0u8..64,
        to in 0u8..64,
    ) {
        let state = random_walk(&choices);
        prop_assume!(!state.is_terminal());

        let from = Square::from_index(from).unwrap();
        let to = Square::from_index(to).unwrap();
        let side = state.side_to_move();
        let listed = RulesEngine
            .legal_moves(state.board(), side)
            .unwrap()
            .contains(Move::new(from, to));

        let m = Move::new(from, to);
        let mut game = Game::from_state(state).unwrap();
        match game.make_move(m) {
            Ok(outcome) => {
                prop_assert!(listed);
                prop_assert_eq!(game.side_to_move(), side.opposite());
                prop_assert_eq!(game.move_history(), &[m][..]);
                prop_assert_eq!(
                    outcome,
                    RulesEngine.classify(game.board(), game.side_to_move()).unwrap()
                );
                prop_assert_eq!(Ok((*game.state(), outcome)), apply_move(&state, from, to));
            }
            Err(err) => {
                prop_assert!(!listed, "listed move rejected: {}", err);
                prop_assert!(matches!(err, MoveError::Illegal(_)));
                // A rejected move leaves the game exactly as it was.
                prop_assert_eq!(game.state(), &state);
                prop_assert!(game.move_history().is_empty());
                prop_assert_eq!(game.status(), RulesEngine.classify(state.board(), side).unwrap());
            }
        }
    }
}
