//! The shared engine contract games implement.
//!
//! A host drives one round through this trait:
//! - `start` begins the round and arms its timers
//! - `tick(elapsed_ms)` advances the logical clock; all spawning, playback,
//!   feedback pauses and the settle delay happen here
//! - `handle_action` validates and scores a discrete user action
//! - the read accessors expose what the host renders
//! - `result` is `Some` exactly once the settle delay has elapsed and the
//!   one-shot callback (if any) has fired
//!
//! ## Implementation notes
//!
//! - `start` is idempotent; a second call is ignored
//! - `handle_action` returns `Err` only for lifecycle misuse or unsupported
//!   action variants — player mistakes are `Ok(Rejected(..))` or
//!   `Ok(Missed { .. })`
//! - engines must cancel every timer they scheduled when the round ends

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionOutcome, EngineError, GameEndCallback, GameResult};

/// Identifier of one of the six mini-games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameId {
    FocusTarget,
    MemorySequence,
    PatternLogic,
    TowerHanoi,
    SpeedMatch,
    WordAssociation,
}

impl GameId {
    /// All game ids, in catalog order.
    pub const ALL: [GameId; 6] = [
        GameId::FocusTarget,
        GameId::MemorySequence,
        GameId::PatternLogic,
        GameId::TowerHanoi,
        GameId::SpeedMatch,
        GameId::WordAssociation,
    ];

    /// The wire/catalog slug for this game.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            GameId::FocusTarget => "focus-target",
            GameId::MemorySequence => "memory-sequence",
            GameId::PatternLogic => "pattern-logic",
            GameId::TowerHanoi => "tower-hanoi",
            GameId::SpeedMatch => "speed-match",
            GameId::WordAssociation => "word-association",
        }
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for GameId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameId::ALL
            .into_iter()
            .find(|id| id.slug() == s)
            .ok_or_else(|| EngineError::UnknownGame(s.to_string()))
    }
}

/// One round of one mini-game.
pub trait MiniGameEngine: std::fmt::Debug {
    /// Which game this engine runs.
    fn game_id(&self) -> GameId;

    /// Begin the round. Idempotent; a second call is ignored.
    fn start(&mut self);

    /// Advance the logical clock by `elapsed_ms`, dispatching due timers.
    fn tick(&mut self, elapsed_ms: u64);

    /// Validate and apply a user action.
    fn handle_action(&mut self, action: Action) -> Result<ActionOutcome, EngineError>;

    /// Current score. Never negative.
    fn score(&self) -> u32;

    /// Current level, starting at 1 (TowerHanoi reports its disk count).
    fn level(&self) -> u32;

    /// Remaining seconds of a timed round; `None` for untimed rounds.
    fn time_remaining_seconds(&self) -> Option<u32>;

    /// Whether the round has reached its terminal condition.
    fn is_ended(&self) -> bool;

    /// The terminal result, available once the settle delay has elapsed.
    fn result(&self) -> Option<&GameResult>;

    /// Attach the one-shot completion callback, invoked at most once.
    fn set_on_game_end(&mut self, callback: GameEndCallback);
}
