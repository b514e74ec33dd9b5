//! TowerHanoi integration tests.
//!
//! The optimal-solution scenario, the ordering invariant under arbitrary
//! play, and the win condition.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use neuroplay::{Action, ActionOutcome, EngineError, GameResult, MiniGameEngine, TowerHanoi};

fn select(game: &mut TowerHanoi, peg: usize) -> ActionOutcome {
    game.handle_action(Action::SelectPeg(peg)).unwrap()
}

/// Recursive optimal solution: move `disks` from `from` to `to`.
fn solve(game: &mut TowerHanoi, disks: u8, from: usize, to: usize, via: usize) {
    if disks == 0 {
        return;
    }
    solve(game, disks - 1, from, via, to);
    select(game, from);
    select(game, to);
    solve(game, disks - 1, via, to, from);
}

// =============================================================================
// Optimal-solution scenarios
// =============================================================================

#[test]
fn test_three_disk_optimal_solution() {
    let mut game = TowerHanoi::new(3).unwrap();
    let results: Rc<RefCell<Vec<GameResult>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&results);
    game.set_on_game_end(Box::new(move |result| sink.borrow_mut().push(result)));
    game.start();

    // The classic 7 moves: (0,2) (0,1) (2,1) (0,2) (1,0) (1,2) (0,2)
    for (from, to) in [(0, 2), (0, 1), (2, 1), (0, 2), (1, 0), (1, 2), (0, 2)] {
        select(&mut game, from);
        select(&mut game, to);
    }

    assert!(game.is_ended());
    assert_eq!(game.moves(), 7);
    assert_eq!(game.pegs()[2].as_slice(), &[3, 2, 1]);

    // Result arrives after the 2-second victory display
    game.tick(2_000);
    let results = results.borrow();
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.moves, Some(7));
    assert_eq!(result.accuracy_percent, Some(100));
    assert_eq!(result.level, Some(3));
    // No seconds elapsed: max(1000 - 70 - 0, 100)
    assert_eq!(result.score, 930);

    // Win fires exactly once
    drop(results);
    game.tick(60_000);
    assert_eq!(game.result().map(|r| r.score), Some(930));
}

#[test]
fn test_optimal_solution_for_every_disk_count() {
    for disks in 3u8..=6 {
        let mut game = TowerHanoi::new(disks).unwrap();
        game.start();

        solve(&mut game, disks, 0, 2, 1);

        assert!(game.is_ended(), "{disks} disks should be solved");
        assert_eq!(game.moves(), (1u32 << disks) - 1);

        game.tick(2_000);
        assert_eq!(game.result().unwrap().accuracy_percent, Some(100));
    }
}

#[test]
fn test_score_accounts_for_elapsed_time() {
    let mut game = TowerHanoi::new(3).unwrap();
    game.start();

    // Ten seconds pass before the solve
    game.tick(10_000);
    solve(&mut game, 3, 0, 2, 1);
    game.tick(2_000);

    let result = game.result().unwrap();
    assert_eq!(result.time_elapsed_seconds, 10);
    // max(1000 - 7*10 - 10, 100)
    assert_eq!(result.score, 920);
}

// =============================================================================
// Win condition
// =============================================================================

#[test]
fn test_win_requires_all_disks_on_third_peg() {
    let mut game = TowerHanoi::new(3).unwrap();
    game.start();

    // Move only the two smallest disks to peg 2
    select(&mut game, 0);
    select(&mut game, 1);
    select(&mut game, 0);
    select(&mut game, 2);
    select(&mut game, 1);
    select(&mut game, 2);

    assert_eq!(game.pegs()[2].as_slice(), &[2, 1]);
    assert!(!game.is_ended());
}

#[test]
fn test_actions_after_win_are_refused() {
    let mut game = TowerHanoi::new(3).unwrap();
    game.start();
    solve(&mut game, 3, 0, 2, 1);

    let err = game.handle_action(Action::SelectPeg(0)).unwrap_err();
    assert_eq!(err, EngineError::RoundOver);
}

// =============================================================================
// Ordering invariant
// =============================================================================

proptest! {
    /// No sequence of selections may ever place a larger disk on a smaller
    /// one, and pegs always hold each disk exactly once.
    #[test]
    fn prop_pegs_stay_descending(
        disks in 3u8..=6,
        selections in proptest::collection::vec(0usize..3, 0..300),
    ) {
        let mut game = TowerHanoi::new(disks).unwrap();
        game.start();

        for peg in selections {
            if game.is_ended() {
                break;
            }
            let _ = game.handle_action(Action::SelectPeg(peg)).unwrap();

            for peg in game.pegs() {
                prop_assert!(
                    peg.windows(2).all(|pair| pair[0] > pair[1]),
                    "peg {:?} is not strictly descending",
                    peg
                );
            }

            let mut all: Vec<u8> = game.pegs().iter().flat_map(|p| p.iter().copied()).collect();
            all.sort_unstable();
            let expected: Vec<u8> = (1..=disks).collect();
            prop_assert_eq!(all, expected);
        }
    }
}
