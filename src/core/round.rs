//! Shared round lifecycle: countdown ticks and the settle delay.
//!
//! Every game shares two timers — a once-per-second countdown tick and the
//! settle delay between the terminal condition and result delivery.
//! `TimerKey` layers those over a game-specific key type so each engine
//! keeps a single scheduler for its whole round.

use super::scheduler::{Scheduler, TimerId};

/// Countdown tick interval. All six games count seconds.
pub const COUNTDOWN_TICK_MS: u64 = 1_000;

/// Timer key for a round: the two shared timers plus game-specific ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKey<G> {
    /// Once-per-second countdown (or count-up) tick.
    Countdown,
    /// Settle delay between the terminal condition and the result report.
    Settle,
    /// Game-specific timer (spawn, playback step, feedback pause, ...).
    Game(G),
}

/// The timers of one round. Wraps the scheduler so the countdown and settle
/// plumbing is written once, not six times.
#[derive(Clone, Debug)]
pub struct RoundTimers<G> {
    scheduler: Scheduler<TimerKey<G>>,
}

impl<G: Copy + Eq> RoundTimers<G> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scheduler: Scheduler::new(),
        }
    }

    /// Current logical time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Number of outstanding timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }

    /// Start the once-per-second tick.
    pub fn start_countdown(&mut self) {
        self.scheduler
            .schedule_repeating(TimerKey::Countdown, COUNTDOWN_TICK_MS);
    }

    /// Schedule a one-shot game timer.
    pub fn schedule_game(&mut self, key: G, delay_ms: u64) -> TimerId {
        self.scheduler.schedule_once(TimerKey::Game(key), delay_ms)
    }

    /// Schedule a repeating game timer.
    pub fn schedule_game_repeating(&mut self, key: G, period_ms: u64) -> TimerId {
        self.scheduler
            .schedule_repeating(TimerKey::Game(key), period_ms)
    }

    /// Cancel every pending timer with the given game key.
    pub fn cancel_game(&mut self, key: G) -> usize {
        self.scheduler.cancel_key(TimerKey::Game(key))
    }

    /// Whether a game timer with the given key is pending.
    #[must_use]
    pub fn is_game_scheduled(&self, key: G) -> bool {
        self.scheduler.is_scheduled(TimerKey::Game(key))
    }

    /// End the round: cancel every outstanding timer, then arm the settle
    /// delay. After this only `TimerKey::Settle` can fire.
    pub fn begin_settle(&mut self, delay_ms: u64) {
        self.scheduler.clear();
        self.scheduler.schedule_once(TimerKey::Settle, delay_ms);
    }

    /// Advance the clock, returning fired keys in deadline order.
    pub fn advance(&mut self, elapsed_ms: u64) -> smallvec::SmallVec<[TimerKey<G>; 4]> {
        self.scheduler.advance(elapsed_ms)
    }
}

impl<G: Copy + Eq> Default for RoundTimers<G> {
    fn default() -> Self {
        Self::new()
    }
}

/// Remaining whole seconds of a timed round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    /// Remaining seconds.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Consume one tick; returns the remaining seconds afterwards.
    pub fn on_tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.remaining == 0
    }
}
