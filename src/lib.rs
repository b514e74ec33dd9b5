//! # neuroplay
//!
//! Timed cognitive-training mini-game round engines.
//!
//! Six self-contained games — target discrimination, sequence recall,
//! pattern completion, the three-peg disk puzzle, rapid symbol matching and
//! themed word association — each generate randomized stimuli, accept
//! discrete user actions, track score/level/time, and terminate into exactly
//! one [`GameResult`] handed to the host.
//!
//! ## Design Principles
//!
//! 1. **One contract, six engines**: every game implements
//!    [`MiniGameEngine`]; the round lifecycle (countdown, settle delay,
//!    one-shot reporting) lives in `core`, not in six copies.
//!
//! 2. **No hidden time, no hidden randomness**: the host drives the clock
//!    through `tick(elapsed_ms)` and injects the RNG per instance, so every
//!    round is reproducible under test.
//!
//! 3. **Timers are owned**: each engine's scheduler holds every timer it
//!    created, and round teardown cancels them all — a stale fire can never
//!    reach a finished round.
//!
//! ## Round lifecycle
//!
//! ```
//! use neuroplay::{create, Action, EngineConfig, GameId, MiniGameEngine};
//!
//! # fn main() -> Result<(), neuroplay::EngineError> {
//! let mut engine = create(GameId::SpeedMatch, &EngineConfig {
//!     seed: Some(42),
//!     ..EngineConfig::default()
//! })?;
//! engine.set_on_game_end(Box::new(|result| {
//!     println!("scored {} in {}s", result.score, result.time_elapsed_seconds);
//! }));
//! engine.start();
//!
//! engine.tick(1_000);
//! engine.handle_action(Action::ClickCell(0))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - `core`: RNG, scheduler, round timers, actions, results, errors
//! - `engine`: the `MiniGameEngine` trait and `GameId`
//! - `games`: the six engines plus the host-facing catalog

pub mod core;
pub mod engine;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionOutcome, Countdown, EngineError, GameEndCallback, GameResult, GameRng,
    RejectReason, ResultReporter, RoundTimers, Scheduler, StimulusId, TimerId, TimerKey,
};

pub use crate::engine::{GameId, MiniGameEngine};

pub use crate::games::{
    create, Category, Cell, EngineConfig, FocusTarget, GameInfo, MemorySequence, PatternColor,
    PatternItem, PatternLogic, Puzzle, Shape, SpeedMatch, Submission, Target, Theme,
    TowerHanoi, WordAssociation, WordVerdict, CATALOG, SYMBOLS, THEMES,
};
