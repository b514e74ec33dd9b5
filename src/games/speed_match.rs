//! Rapid symbol matching: find every cell showing the target glyph.
//!
//! A 30-second round over a square grid whose side grows with the level,
//! `min(4 + level/3, 8)`. The symbol pool also grows with the level; the
//! target is drawn from the pool and guaranteed at least one cell, the rest
//! are uniform, and the filled grid is Fisher-Yates shuffled (a permutation,
//! never a resample). Matching clicks score `10 + streak*2 + level*5` and
//! re-deal the grid 200 ms later; a wrong click zeroes the streak and costs
//! 5 points, clamped at zero. The level rises whenever the score crosses a
//! multiple of 100.

use serde::{Deserialize, Serialize};

use crate::core::{
    Action, ActionOutcome, Countdown, EngineError, GameEndCallback, GameResult, GameRng,
    RejectReason, ResultReporter, RoundTimers, TimerKey,
};
use crate::engine::{GameId, MiniGameEngine};

const ROUND_SECONDS: u32 = 30;
const SETTLE_MS: u64 = 1_000;
const REGENERATE_MS: u64 = 200;
const MISS_PENALTY: u32 = 5;
const MAX_GRID_SIDE: u32 = 8;
const LEVEL_SCORE_STEP: u32 = 100;

/// The full glyph list; the pool is its level-scaled prefix.
pub static SYMBOLS: [&str; 12] = [
    "🔴", "🔵", "🟢", "🟡", "🟣", "🟠", "⭐", "❤️", "💎", "🔥", "⚡", "🌟",
];

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub glyph: &'static str,
    pub is_target: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatchTimer {
    Regenerate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Active,
    Ended,
}

/// The SpeedMatch round engine.
#[derive(Debug)]
pub struct SpeedMatch {
    rng: GameRng,
    timers: RoundTimers<MatchTimer>,
    countdown: Countdown,
    reporter: ResultReporter,
    phase: Phase,
    score: u32,
    level: u32,
    streak: u32,
    target: &'static str,
    grid: Vec<Cell>,
}

impl SpeedMatch {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        let mut game = Self {
            rng,
            timers: RoundTimers::new(),
            countdown: Countdown::new(ROUND_SECONDS),
            reporter: ResultReporter::detached(),
            phase: Phase::Idle,
            score: 0,
            level: 1,
            streak: 0,
            target: SYMBOLS[0],
            grid: Vec::new(),
        };
        game.generate_grid();
        game
    }

    /// The current grid, row-major.
    #[must_use]
    pub fn grid(&self) -> &[Cell] {
        &self.grid
    }

    /// The glyph to hunt for.
    #[must_use]
    pub fn target_symbol(&self) -> &'static str {
        self.target
    }

    /// Consecutive correct clicks since the last miss.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Grid side length at the current level.
    #[must_use]
    pub fn grid_side(&self) -> usize {
        Self::side_for_level(self.level)
    }

    fn side_for_level(level: u32) -> usize {
        (4 + level / 3).min(MAX_GRID_SIDE) as usize
    }

    fn pool_for_level(level: u32) -> &'static [&'static str] {
        let len = (6 + level as usize).min(SYMBOLS.len());
        &SYMBOLS[..len]
    }

    /// Deal a fresh grid: target first so it appears at least once, the
    /// rest uniform, then one uniform shuffle.
    fn generate_grid(&mut self) {
        let side = Self::side_for_level(self.level);
        let pool = Self::pool_for_level(self.level);

        self.target = self.rng.choose(pool).copied().unwrap_or(SYMBOLS[0]);

        let mut grid = Vec::with_capacity(side * side);
        grid.push(Cell {
            glyph: self.target,
            is_target: true,
        });
        for _ in 1..side * side {
            let glyph = self.rng.choose(pool).copied().unwrap_or(SYMBOLS[0]);
            grid.push(Cell {
                glyph,
                is_target: glyph == self.target,
            });
        }
        self.rng.shuffle(&mut grid);
        self.grid = grid;
    }

    fn end_round(&mut self) {
        log::debug!("speed-match round over, score {}", self.score);
        self.phase = Phase::Ended;
        self.timers.begin_settle(SETTLE_MS);
    }

    fn report(&mut self) {
        // Score-to-(score+streak) heuristic, not a literal hit rate.
        let accuracy = ((f64::from(self.score) / f64::from((self.score + self.streak).max(1)))
            * 100.0)
            .round() as u32;
        let result = GameResult::new(self.score, ROUND_SECONDS)
            .with_level(self.level)
            .with_accuracy(accuracy);
        self.reporter.report(result);
    }
}

impl MiniGameEngine for SpeedMatch {
    fn game_id(&self) -> GameId {
        GameId::SpeedMatch
    }

    fn start(&mut self) {
        if self.phase != Phase::Idle {
            log::warn!("start() called twice on speed-match; ignoring");
            return;
        }
        self.phase = Phase::Active;
        self.timers.start_countdown();
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
                TimerKey::Game(MatchTimer::Regenerate) => {
                    if self.phase == Phase::Active {
                        self.generate_grid();
                    }
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

        let Action::ClickCell(index) = action else {
            return Err(EngineError::UnsupportedAction);
        };
        let Some(cell) = self.grid.get(index) else {
            return Ok(ActionOutcome::Rejected(RejectReason::UnknownStimulus));
        };

        if cell.is_target {
            let points = 10 + self.streak * 2 + self.level * 5;
            let before = self.score;
            self.score += points;
            self.streak += 1;
            if self.score / LEVEL_SCORE_STEP > before / LEVEL_SCORE_STEP {
                self.level += 1;
            }
            // Re-arm rather than stack the re-deal on rapid clicks
            self.timers.cancel_game(MatchTimer::Regenerate);
            self.timers.schedule_game(MatchTimer::Regenerate, REGENERATE_MS);
            Ok(ActionOutcome::Scored { points })
        } else {
            self.streak = 0;
            self.score = self.score.saturating_sub(MISS_PENALTY);
            Ok(ActionOutcome::Missed {
                penalty: MISS_PENALTY,
            })
        }
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
