//! Crate-level scenario tests: full-rule situations that cut across the
//! action codec, the blocking predicates, and the board engine.

use crate::actions::{self, Action, Orientation, PawnMove};
use crate::board::{Board, GameResult, Player};
use crate::path::has_path;
use crate::RuleError;

fn wall(orientation: Orientation, x: usize, y: usize, n: usize) -> usize {
    Action::Wall { orientation, x, y }.encode(n)
}

#[test]
fn test_opening_actions_on_tiny_board() {
    let board = Board::new(3);
    let valids = board.valid_actions(Player::Red);
    assert_eq!(valids.len(), 20);

    // Forward and both sideways steps; south leaves the board and the
    // opponent is two cells away, so no jump is available.
    let pawn: Vec<usize> = (0..actions::PAWN_ACTIONS).filter(|&i| valids[i]).collect();
    assert_eq!(
        pawn,
        vec![
            PawnMove::North.index(),
            PawnMove::East.index(),
            PawnMove::West.index()
        ]
    );

    // Every one of the 8 wall actions touches only one border, so none can
    // seal a pawn in and all are legal.
    assert_eq!(valids[actions::PAWN_ACTIONS..].iter().filter(|&&v| v).count(), 8);
}

#[test]
fn test_straight_jump_over_adjacent_opponent() {
    let mut board = Board::new(5);
    board = board.apply_action(Player::Red, PawnMove::North.index()).unwrap();
    board = board.apply_action(Player::Blue, PawnMove::North.index()).unwrap();
    board = board.apply_action(Player::Red, PawnMove::North.index()).unwrap();
    assert_eq!(board.position(Player::Red), (2, 2));
    assert_eq!(board.position(Player::Blue), (2, 3));

    // Red faces Blue with the cell behind Blue open: the step onto Blue is
    // replaced by the straight jump.
    let valids = board.valid_actions(Player::Red);
    assert!(!valids[PawnMove::North.index()]);
    assert!(valids[PawnMove::JumpNorth.index()]);
    assert!(!valids[PawnMove::JumpNorthEast.index()]);
    assert!(!valids[PawnMove::JumpNorthWest.index()]);

    // Symmetric situation for Blue, expressed in its canonical frame.
    let blue = board.valid_actions(Player::Blue);
    assert!(!blue[PawnMove::North.index()]);
    assert!(blue[PawnMove::JumpNorth.index()]);

    let jumped = board
        .apply_action(Player::Red, PawnMove::JumpNorth.index())
        .unwrap();
    assert_eq!(jumped.position(Player::Red), (2, 4));
    assert_eq!(jumped.game_result(Player::Red), GameResult::Win);
}

#[test]
fn test_diagonal_jumps_when_straight_jump_walled_off() {
    let mut board = Board::new(5);
    board = board.apply_action(Player::Red, PawnMove::North.index()).unwrap();
    board = board.apply_action(Player::Blue, PawnMove::North.index()).unwrap();
    board = board.apply_action(Player::Red, PawnMove::North.index()).unwrap();
    // Blue walls off the cell behind itself: horizontal wall over the
    // (2,3)-(2,4) edge, slot (1,3) raw, which is (2,0) in Blue's frame.
    board = board
        .apply_action(Player::Blue, wall(Orientation::Horizontal, 2, 0, 5))
        .unwrap();
    assert!(board.wall_at(Orientation::Horizontal, 1, 3));

    let valids = board.valid_actions(Player::Red);
    assert!(!valids[PawnMove::North.index()]);
    assert!(!valids[PawnMove::JumpNorth.index()]);
    assert!(valids[PawnMove::JumpNorthEast.index()]);
    assert!(valids[PawnMove::JumpNorthWest.index()]);

    let jumped = board
        .apply_action(Player::Red, PawnMove::JumpNorthEast.index())
        .unwrap();
    assert_eq!(jumped.position(Player::Red), (3, 3));
    assert_eq!(jumped.position(Player::Blue), (2, 3));
}

#[test]
fn test_wall_that_seals_a_pawn_is_rejected() {
    let mut board = Board::new(5);
    // Two horizontal walls block the row-0 boundary for columns 0..4.
    board = board
        .apply_action(Player::Red, wall(Orientation::Horizontal, 0, 0, 5))
        .unwrap();
    // Raw slot (2, 0) is (1, 3) in Blue's frame.
    board = board
        .apply_action(Player::Blue, wall(Orientation::Horizontal, 1, 3, 5))
        .unwrap();
    assert!(board.wall_at(Orientation::Horizontal, 0, 0));
    assert!(board.wall_at(Orientation::Horizontal, 2, 0));

    // A vertical wall at (3, 0) would close the last exit from Red's
    // region, so it must be illegal even though the slot itself is free.
    let sealing = wall(Orientation::Vertical, 3, 0, 5);
    let valids = board.valid_actions(Player::Red);
    assert!(!valids[sealing]);
    assert_eq!(
        board.apply_action(Player::Red, sealing),
        Err(RuleError::IllegalAction { index: sealing })
    );

    // A wall elsewhere is still fine.
    assert!(valids[wall(Orientation::Vertical, 0, 2, 5)]);
}

#[test]
fn test_every_legal_wall_keeps_both_paths() {
    let mut board = Board::new(5);
    board = board
        .apply_action(Player::Red, wall(Orientation::Horizontal, 0, 0, 5))
        .unwrap();
    board = board
        .apply_action(Player::Blue, wall(Orientation::Horizontal, 1, 3, 5))
        .unwrap();

    let valids = board.valid_actions(Player::Red);
    for index in actions::PAWN_ACTIONS..board.action_size() {
        if !valids[index] {
            continue;
        }
        let next = board.apply_action(Player::Red, index).unwrap();
        assert!(
            has_path(next.position(Player::Red), next.goal_row(Player::Red), next.walls()),
            "legal wall action {index} sealed Red in"
        );
        assert!(
            has_path(next.position(Player::Blue), next.goal_row(Player::Blue), next.walls()),
            "legal wall action {index} sealed Blue in"
        );
    }
}

#[test]
fn test_threefold_repetition_is_a_draw() {
    let mut board = Board::new(5);
    let shuffle = [
        (Player::Red, PawnMove::East.index()),
        (Player::Blue, PawnMove::East.index()),
        (Player::Red, PawnMove::West.index()),
        (Player::Blue, PawnMove::West.index()),
    ];

    // Two full cycles leave every visited configuration at count 2.
    for &(player, action) in shuffle.iter().chain(shuffle.iter()) {
        board = board.apply_action(player, action).unwrap();
        assert_eq!(board.game_result(Player::Red), GameResult::Ongoing);
    }
    assert_eq!(board.repetition_count(), 2);

    // The ninth move produces a configuration for the third time.
    board = board.apply_action(Player::Red, PawnMove::East.index()).unwrap();
    assert_eq!(board.game_result(Player::Red), GameResult::Draw);
    assert_eq!(board.game_result(Player::Blue), GameResult::Draw);
}

#[test]
fn test_draw_flag_changes_fingerprint() {
    let mut board = Board::new(5);
    let first = board.apply_action(Player::Red, PawnMove::East.index()).unwrap();
    let reference = first.fingerprint();

    board = first.clone();
    for &(player, action) in &[
        (Player::Blue, PawnMove::East.index()),
        (Player::Red, PawnMove::West.index()),
        (Player::Blue, PawnMove::West.index()),
        (Player::Red, PawnMove::East.index()),
        (Player::Blue, PawnMove::East.index()),
        (Player::Red, PawnMove::West.index()),
        (Player::Blue, PawnMove::West.index()),
        (Player::Red, PawnMove::East.index()),
    ] {
        board = board.apply_action(player, action).unwrap();
    }
    assert_eq!(board.game_result(Player::Red), GameResult::Draw);
    // Same pawn and wall configuration, but the raised draw flag is part of
    // the fingerprint.
    assert_eq!(board.position(Player::Red), first.position(Player::Red));
    assert_ne!(board.fingerprint(), reference);
}

#[test]
fn test_fixed_game_is_reproducible() {
    let script = [
        (Player::Red, PawnMove::North.index()),
        (Player::Blue, wall(Orientation::Vertical, 1, 1, 5)),
        (Player::Red, PawnMove::East.index()),
        (Player::Blue, PawnMove::North.index()),
        (Player::Red, wall(Orientation::Horizontal, 0, 2, 5)),
        (Player::Blue, PawnMove::East.index()),
    ];

    let run = || {
        let mut board = Board::new(5);
        for &(player, action) in &script {
            board = board.apply_action(player, action).unwrap();
        }
        board
    };

    let a = run();
    let b = run();
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.valid_actions(Player::Red), b.valid_actions(Player::Red));
}
