//! Target discrimination: click the correct targets, avoid the decoys.
//!
//! A 30-second round. Targets spawn on a cadence that quickens with the
//! level, live for a level-scaled TTL, and are 70% likely to be correct.
//! Clicking a correct target awards 10 points; clicking a decoy costs 5,
//! clamped at zero. The level is derived from the score — `score/10 + 1`,
//! recomputed after every score change in both directions — and a level
//! change re-arms the spawn cadence.

use serde::{Deserialize, Serialize};

use crate::core::{
    Action, ActionOutcome, Countdown, EngineError, GameEndCallback, GameResult, GameRng,
    RejectReason, ResultReporter, RoundTimers, StimulusId, TimerKey,
};
use crate::engine::{GameId, MiniGameEngine};

const ROUND_SECONDS: u32 = 30;
const SETTLE_MS: u64 = 1_000;
const HIT_POINTS: u32 = 10;
const MISS_PENALTY: u32 = 5;
const CORRECT_PROBABILITY: f64 = 0.7;

/// A spawned target at a screen-percentage position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: StimulusId,
    /// Horizontal position, percent of the play area, in [5, 85).
    pub x: f32,
    /// Vertical position, percent of the play area, in [10, 80).
    pub y: f32,
    pub is_correct: bool,
    /// How long this target stays clickable.
    pub ttl_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FocusTimer {
    Spawn,
    Expire(StimulusId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Active,
    Ended,
}

/// The FocusTarget round engine.
#[derive(Debug)]
pub struct FocusTarget {
    rng: GameRng,
    timers: RoundTimers<FocusTimer>,
    countdown: Countdown,
    reporter: ResultReporter,
    phase: Phase,
    score: u32,
    level: u32,
    targets: Vec<Target>,
    next_stimulus: u32,
}

impl FocusTarget {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng,
            timers: RoundTimers::new(),
            countdown: Countdown::new(ROUND_SECONDS),
            reporter: ResultReporter::detached(),
            phase: Phase::Idle,
            score: 0,
            level: 1,
            targets: Vec::new(),
            next_stimulus: 0,
        }
    }

    /// Targets currently on screen.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Milliseconds between spawns at the given level, floored at 500.
    fn spawn_period_ms(level: u32) -> u64 {
        1_000u64.saturating_sub(u64::from(level) * 100).max(500)
    }

    /// How long a target spawned at the given level stays clickable.
    fn ttl_ms(level: u32) -> u64 {
        3_000 + u64::from(level) * 500
    }

    fn spawn_target(&mut self) {
        let id = StimulusId(self.next_stimulus);
        self.next_stimulus += 1;

        let target = Target {
            id,
            x: self.rng.gen_range_f32(5.0..85.0),
            y: self.rng.gen_range_f32(10.0..80.0),
            is_correct: self.rng.gen_bool(CORRECT_PROBABILITY),
            ttl_ms: Self::ttl_ms(self.level),
        };
        self.timers.schedule_game(FocusTimer::Expire(id), target.ttl_ms);
        self.targets.push(target);
    }

    /// Re-derive the level from the score; re-arm the spawn cadence on change.
    fn refresh_level(&mut self) {
        let level = self.score / 10 + 1;
        if level != self.level {
            self.level = level;
            self.timers.cancel_game(FocusTimer::Spawn);
            self.timers
                .schedule_game_repeating(FocusTimer::Spawn, Self::spawn_period_ms(level));
        }
    }

    fn end_round(&mut self) {
        log::debug!("focus-target round over, score {}", self.score);
        self.phase = Phase::Ended;
        self.targets.clear();
        self.timers.begin_settle(SETTLE_MS);
    }

    fn report(&mut self) {
        // Heuristic, not a literal hit rate: score / (score + 0.3*score),
        // i.e. 77 whenever score > 0.
        let accuracy = if self.score > 0 {
            let score = f64::from(self.score);
            ((score / (score + 0.3 * score)) * 100.0).round() as u32
        } else {
            0
        };
        let result = GameResult::new(self.score, ROUND_SECONDS).with_accuracy(accuracy);
        self.reporter.report(result);
    }
}

impl MiniGameEngine for FocusTarget {
    fn game_id(&self) -> GameId {
        GameId::FocusTarget
    }

    fn start(&mut self) {
        if self.phase != Phase::Idle {
            log::warn!("start() called twice on focus-target; ignoring");
            return;
        }
        self.phase = Phase::Active;
        self.timers.start_countdown();
        self.timers
            .schedule_game_repeating(FocusTimer::Spawn, Self::spawn_period_ms(self.level));
    }

    fn tick(&mut self, elapsed_ms: u64) {
        for key in self.timers.advance(elapsed_ms) {
            match key {
                TimerKey::Countdown => {
                    if self.phase == Phase::Active && self.countdown.on_tick() == 0 {
                        self.end_round();
                    }
                }
                TimerKey::Settle => self.report(),
                TimerKey::Game(FocusTimer::Spawn) => {
                    if self.phase == Phase::Active {
                        self.spawn_target();
                    }
                }
                TimerKey::Game(FocusTimer::Expire(id)) => {
                    self.targets.retain(|t| t.id != id);
                }
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> Result<ActionOutcome, EngineError> {
        match self.phase {
            Phase::Idle => return Err(EngineError::NotStarted),
            Phase::Ended => return Err(EngineError::RoundOver),
            Phase::Active => {}
        }

        let Action::ClickTarget(id) = action else {
            return Err(EngineError::UnsupportedAction);
        };

        let Some(index) = self.targets.iter().position(|t| t.id == id) else {
            return Ok(ActionOutcome::Rejected(RejectReason::UnknownStimulus));
        };

        let target = self.targets.swap_remove(index);
        self.timers.cancel_game(FocusTimer::Expire(id));

        let outcome = if target.is_correct {
            self.score += HIT_POINTS;
            ActionOutcome::Scored { points: HIT_POINTS }
        } else {
            self.score = self.score.saturating_sub(MISS_PENALTY);
            ActionOutcome::Missed {
                penalty: MISS_PENALTY,
            }
        };
        self.refresh_level();
        Ok(outcome)
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn time_remaining_seconds(&self) -> Option<u32> {
        Some(self.countdown.remaining())
    }

    fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    fn result(&self) -> Option<&GameResult> {
        self.reporter.delivered()
    }

    fn set_on_game_end(&mut self, callback: GameEndCallback) {
        self.reporter.set_callback(callback);
    }
}
