use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::position::{Column, Outcome, Player, Position, BOARD_SIZE, ROWS};
use crate::session::GameSession;

// =========================================================================
// Literal win and draw scenarios
// =========================================================================

#[test]
fn horizontal_win() {
    let mut session = GameSession::new();
    session.play_many(&[1, 1, 2, 2, 3, 3]).unwrap();
    let snapshot = session.play(4).unwrap();
    assert_eq!(snapshot.outcome, Some(Outcome::Win(Player::Yellow)));
}

#[test]
fn vertical_win() {
    let mut session = GameSession::new();
    session.play_many(&[0, 6, 5, 6, 5, 6, 5]).unwrap();
    let snapshot = session.play(6).unwrap();
    assert_eq!(snapshot.outcome, Some(Outcome::Win(Player::Red)));
}

#[test]
fn falling_diagonal_win() {
    let mut session = GameSession::new();
    session.play_many(&[5, 4, 4, 5, 3, 3, 3, 2, 2, 2]).unwrap();
    let snapshot = session.play(2).unwrap();
    assert_eq!(snapshot.outcome, Some(Outcome::Win(Player::Yellow)));
}

#[test]
fn rising_diagonal_win() {
    let mut session = GameSession::new();
    session
        .play_many(&[6, 1, 2, 2, 1, 3, 3, 3, 4, 4, 4])
        .unwrap();
    let snapshot = session.play(4).unwrap();
    assert_eq!(snapshot.outcome, Some(Outcome::Win(Player::Red)));
}

#[test]
fn full_board_without_a_winner_is_a_draw() {
    let mut session = GameSession::new();
    #[rustfmt::skip]
    let prefix: [Column; 41] = [
        0, 1, 0, 1, 1, 0, 1, 0, 0, 1, 0, 1,
        2, 3, 2, 3, 3, 2, 3, 2, 2, 3, 2, 3,
        4, 5, 4, 5, 5, 4, 5, 4, 4, 5, 4, 5,
        6, 6, 6, 6, 6,
    ];
    session.play_many(&prefix).unwrap();
    let snapshot = session.play(6).unwrap();
    assert_eq!(snapshot.outcome, Some(Outcome::Draw));
    assert_eq!(snapshot.history.len(), BOARD_SIZE);
}

// =========================================================================
// Rule invariants over random games
// =========================================================================

/// Play random games to completion and verify the structural invariants of
/// the bitboard representation after every move.
#[test]
fn random_games_preserve_invariants() {
    const GUARD_ROW: u64 = 0x0001_0204_0810_2040;

    for seed in 0..50 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut session = GameSession::new();
        let mut move_count = 0;

        while session.look().outcome.is_none() && move_count < BOARD_SIZE {
            let legal = session.legal_moves();
            assert!(
                !legal.is_empty(),
                "non-terminal game must have legal moves (seed={seed}, moves={move_count})"
            );

            // Legal moves are exactly the non-full columns, ascending.
            let position = session.position();
            let expected: Vec<Column> = (0..7)
                .filter(|&column| {
                    position
                        .history()
                        .iter()
                        .filter(|&&played| played == column)
                        .count()
                        < ROWS
                })
                .collect();
            assert_eq!(legal, expected, "legal move mismatch (seed={seed})");

            let column = legal[rng.gen_range(0..legal.len())];
            session.play(column).unwrap();
            move_count += 1;

            let position = session.position();
            let yellow = position.bitboard(Player::Yellow);
            let red = position.bitboard(Player::Red);
            assert_eq!(yellow & red, 0, "bitboards overlap (seed={seed})");
            assert_eq!(
                (yellow | red) & GUARD_ROW,
                0,
                "guard row occupied (seed={seed})"
            );
            assert_eq!(
                (yellow | red).count_ones() as usize,
                position.plies(),
                "disc count diverged from ply count (seed={seed})"
            );
        }

        let outcome = session.look().outcome;
        assert!(
            outcome.is_some(),
            "game must end within {BOARD_SIZE} moves (seed={seed})"
        );
        if move_count == BOARD_SIZE && !matches!(outcome, Some(Outcome::Win(_))) {
            assert_eq!(outcome, Some(Outcome::Draw), "seed={seed}");
        }
        assert!(
            session.legal_moves().is_empty(),
            "terminal game must have no legal moves (seed={seed})"
        );
    }
}

/// Rebuilding a position from its own history must reproduce it exactly.
#[test]
fn history_round_trips_for_random_games() {
    for seed in 0..20 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut session = GameSession::new();

        while session.look().outcome.is_none() {
            let legal = session.legal_moves();
            let column = legal[rng.gen_range(0..legal.len())];
            session.play(column).unwrap();

            let replayed = Position::from_history(session.position().history()).unwrap();
            assert_eq!(&replayed, session.position(), "seed={seed}");
        }
    }
}

/// The color to move is fully determined by the ply count.
#[test]
fn side_to_move_follows_parity() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let mut session = GameSession::new();

    while session.look().outcome.is_none() {
        let position = session.position();
        let expected = if position.plies() % 2 == 0 {
            Player::Yellow
        } else {
            Player::Red
        };
        assert_eq!(position.to_move(), expected);

        let legal = session.legal_moves();
        let column = legal[rng.gen_range(0..legal.len())];
        session.play(column).unwrap();
    }
}
