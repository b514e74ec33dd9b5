//! Round lifecycle integration tests.
//!
//! These verify the behavior every game shares: one-shot result delivery
//! after the settle delay, refusal of lifecycle misuse, idempotent start,
//! and inertness after reporting.

use std::cell::RefCell;
use std::rc::Rc;

use neuroplay::{
    create, Action, EngineConfig, EngineError, GameId, GameResult, MiniGameEngine,
};

fn config(seed: u64) -> EngineConfig {
    EngineConfig {
        seed: Some(seed),
        ..EngineConfig::default()
    }
}

/// Attach a recording callback and return the shared sink.
fn record(engine: &mut dyn MiniGameEngine) -> Rc<RefCell<Vec<GameResult>>> {
    let sink: Rc<RefCell<Vec<GameResult>>> = Rc::new(RefCell::new(Vec::new()));
    let results = Rc::clone(&sink);
    engine.set_on_game_end(Box::new(move |result| results.borrow_mut().push(result)));
    sink
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_unknown_game_slug_is_refused() {
    let err = "quick-math".parse::<GameId>().unwrap_err();
    assert_eq!(err, EngineError::UnknownGame("quick-math".to_string()));
}

#[test]
fn test_every_game_constructs_and_reports_its_id() {
    for id in GameId::ALL {
        let engine = create(id, &config(42)).unwrap();
        assert_eq!(engine.game_id(), id);
        assert_eq!(engine.score(), 0);
        assert!(engine.level() >= 1);
        assert!(!engine.is_ended());
        assert!(engine.result().is_none());
    }
}

// =============================================================================
// One-shot delivery
// =============================================================================

#[test]
fn test_focus_target_reports_once_after_settle() {
    let mut engine = create(GameId::FocusTarget, &config(42)).unwrap();
    let sink = record(engine.as_mut());
    engine.start();

    // The full 30-second countdown
    for _ in 0..30 {
        engine.tick(1_000);
    }
    assert!(engine.is_ended());
    assert!(engine.result().is_none(), "result must wait for the settle delay");
    assert!(sink.borrow().is_empty());

    engine.tick(1_000);
    assert_eq!(sink.borrow().len(), 1);
    assert_eq!(engine.result(), Some(&sink.borrow()[0]));

    // Long after the round nothing further is delivered
    engine.tick(120_000);
    assert_eq!(sink.borrow().len(), 1);
}

#[test]
fn test_timed_games_report_their_round_length() {
    let cases = [
        (GameId::FocusTarget, 30u32),
        (GameId::PatternLogic, 60),
        (GameId::SpeedMatch, 30),
        (GameId::WordAssociation, 90),
    ];

    for (id, seconds) in cases {
        let mut engine = create(id, &config(7)).unwrap();
        let sink = record(engine.as_mut());
        engine.start();

        engine.tick(u64::from(seconds) * 1_000);
        assert!(engine.is_ended(), "{id} should end at its countdown");
        engine.tick(1_000);

        let results = sink.borrow();
        assert_eq!(results.len(), 1, "{id} must deliver exactly once");
        assert_eq!(results[0].time_elapsed_seconds, seconds);
    }
}

// =============================================================================
// Lifecycle misuse
// =============================================================================

#[test]
fn test_action_after_round_over_is_an_error() {
    let mut engine = create(GameId::SpeedMatch, &config(42)).unwrap();
    engine.start();
    engine.tick(30_000);

    let err = engine.handle_action(Action::ClickCell(0)).unwrap_err();
    assert_eq!(err, EngineError::RoundOver);
}

#[test]
fn test_action_before_start_is_an_error() {
    let mut engine = create(GameId::WordAssociation, &config(42)).unwrap();
    let err = engine
        .handle_action(Action::SubmitWord("banana".to_string()))
        .unwrap_err();
    assert_eq!(err, EngineError::NotStarted);
}

#[test]
fn test_mismatched_action_variant_is_an_error() {
    let mut engine = create(GameId::TowerHanoi, &config(42)).unwrap();
    engine.start();

    let err = engine
        .handle_action(Action::SubmitWord("banana".to_string()))
        .unwrap_err();
    assert_eq!(err, EngineError::UnsupportedAction);
}

#[test]
fn test_start_is_idempotent() {
    let mut engine = create(GameId::FocusTarget, &config(42)).unwrap();
    engine.start();
    engine.start();

    // A doubled start must not double the spawn cadence
    engine.tick(900);
    let mut engine2 = create(GameId::FocusTarget, &config(42)).unwrap();
    engine2.start();
    engine2.tick(900);
    assert_eq!(engine.time_remaining_seconds(), engine2.time_remaining_seconds());
}

// =============================================================================
// Inertness after reporting
// =============================================================================

#[test]
fn test_engine_is_inert_after_reporting() {
    let mut engine = create(GameId::PatternLogic, &config(42)).unwrap();
    engine.start();
    engine.tick(60_000);
    engine.tick(1_000);

    let reported_score = engine.result().unwrap().score;

    engine.tick(600_000);
    assert_eq!(engine.score(), reported_score);
    assert_eq!(engine.result().unwrap().score, reported_score);
}
