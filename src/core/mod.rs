//! Core round machinery shared by all six games: RNG, timers, actions,
//! results, errors.
//!
//! Games compose these rather than modifying them; each engine supplies its
//! own timer-key and phase enums the same way it supplies its own stimuli.

pub mod action;
pub mod error;
pub mod report;
pub mod rng;
pub mod round;
pub mod scheduler;

pub use action::{Action, ActionOutcome, RejectReason, StimulusId};
pub use error::EngineError;
pub use report::{GameEndCallback, GameResult, ResultReporter};
pub use rng::GameRng;
pub use round::{Countdown, RoundTimers, TimerKey, COUNTDOWN_TICK_MS};
pub use scheduler::{Scheduler, TimerId};
