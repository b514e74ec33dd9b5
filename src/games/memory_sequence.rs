//! Sequence recall: watch a color sequence play back, then repeat it.
//!
//! `Idle → Showing → Playing → (Idle|Ended)`. Each round the sequence grows
//! with the level, `min(3 + level, 10)` steps over four colors. Playback is
//! fixed-cadence and not interruptible; during Playing the k-th press must
//! match the k-th step. One mismatch ends the round. A full match awards
//! `len * 10`, raises the level, pauses 1.5 s and re-enters Showing with a
//! longer sequence. The round has no countdown; elapsed time in the result
//! is a `level * 10` estimate, not a measurement.

use crate::core::{
    Action, ActionOutcome, EngineError, GameEndCallback, GameResult, GameRng, RejectReason,
    ResultReporter, RoundTimers, TimerKey,
};
use crate::engine::{GameId, MiniGameEngine};

const COLOR_COUNT: u8 = 4;
const MAX_SEQUENCE: u32 = 10;
const SETTLE_MS: u64 = 1_000;
const NEXT_ROUND_MS: u64 = 1_500;
/// Gap before each step lights up.
const STEP_GAP_MS: u64 = 600;
/// How long each step stays lit.
const STEP_LIT_MS: u64 = 400;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SequenceTimer {
    StepOn(usize),
    StepOff(usize),
    NextRound,
}

/// Round phase. Input is accepted only while Playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Showing,
    Playing,
    Ended,
}

/// The MemorySequence round engine.
#[derive(Debug)]
pub struct MemorySequence {
    rng: GameRng,
    timers: RoundTimers<SequenceTimer>,
    reporter: ResultReporter,
    phase: Phase,
    started: bool,
    score: u32,
    level: u32,
    sequence: Vec<u8>,
    /// Index of the next expected press while Playing.
    position: usize,
    /// The color currently lit during playback.
    active_step: Option<u8>,
}

impl MemorySequence {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng,
            timers: RoundTimers::new(),
            reporter: ResultReporter::detached(),
            phase: Phase::Idle,
            started: false,
            score: 0,
            level: 1,
            sequence: Vec::new(),
            position: 0,
            active_step: None,
        }
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The sequence being shown or repeated.
    #[must_use]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// The color lit during playback, if any.
    #[must_use]
    pub fn active_step(&self) -> Option<u8> {
        self.active_step
    }

    fn sequence_len(level: u32) -> usize {
        (3 + level).min(MAX_SEQUENCE) as usize
    }

    fn new_round(&mut self) {
        let len = Self::sequence_len(self.level);
        self.sequence = (0..len)
            .map(|_| self.rng.gen_range(0..i32::from(COLOR_COUNT)) as u8)
            .collect();
        self.position = 0;
        self.phase = Phase::Showing;

        // Fixed playback cadence: each step lights at k*1000 + 600 and goes
        // dark at k*1000 + 1000; the last going dark opens Playing.
        for step in 0..len {
            let base = step as u64 * (STEP_GAP_MS + STEP_LIT_MS);
            self.timers
                .schedule_game(SequenceTimer::StepOn(step), base + STEP_GAP_MS);
            self.timers
                .schedule_game(SequenceTimer::StepOff(step), base + STEP_GAP_MS + STEP_LIT_MS);
        }
    }

    fn end_round(&mut self) {
        log::debug!(
            "memory-sequence round over at level {}, score {}",
            self.level,
            self.score
        );
        self.phase = Phase::Ended;
        self.active_step = None;
        self.timers.begin_settle(SETTLE_MS);
    }

    fn report(&mut self) {
        // Elapsed time is estimated, not measured; accuracy is a
        // score/(score+1) heuristic.
        let score = f64::from(self.score);
        let accuracy = ((score / (score + 1.0)) * 100.0).round() as u32;
        let result = GameResult::new(self.score, self.level * 10)
            .with_level(self.level)
            .with_accuracy(accuracy);
        self.reporter.report(result);
    }
}

impl MiniGameEngine for MemorySequence {
    fn game_id(&self) -> GameId {
        GameId::MemorySequence
    }

    fn start(&mut self) {
        if self.started {
            log::warn!("start() called twice on memory-sequence; ignoring");
            return;
        }
        self.started = true;
        self.new_round();
    }

    fn tick(&mut self, elapsed_ms: u64) {
        for key in self.timers.advance(elapsed_ms) {
            match key {
                TimerKey::Countdown => {}
                TimerKey::Settle => self.report(),
                TimerKey::Game(SequenceTimer::StepOn(step)) => {
                    if self.phase == Phase::Showing {
                        self.active_step = self.sequence.get(step).copied();
                    }
                }
                TimerKey::Game(SequenceTimer::StepOff(step)) => {
                    if self.phase == Phase::Showing {
                        self.active_step = None;
                        if step + 1 == self.sequence.len() {
                            self.phase = Phase::Playing;
                        }
                    }
                }
                TimerKey::Game(SequenceTimer::NextRound) => {
                    if self.phase == Phase::Idle {
                        self.new_round();
                    }
                }
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> Result<ActionOutcome, EngineError> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        if self.phase == Phase::Ended {
            return Err(EngineError::RoundOver);
        }

        let Action::PressColor(color) = action else {
            return Err(EngineError::UnsupportedAction);
        };
        if color >= COLOR_COUNT {
            return Ok(ActionOutcome::Rejected(RejectReason::UnknownStimulus));
        }
        if self.phase != Phase::Playing {
            // Playback is not interruptible; between-round pauses likewise.
            return Ok(ActionOutcome::Rejected(RejectReason::NotAcceptingInput));
        }

        if color != self.sequence[self.position] {
            self.end_round();
            return Ok(ActionOutcome::Missed { penalty: 0 });
        }

        self.position += 1;
        if self.position < self.sequence.len() {
            return Ok(ActionOutcome::Accepted);
        }

        // Full sequence matched
        let points = self.sequence.len() as u32 * 10;
        self.score += points;
        self.level += 1;
        self.phase = Phase::Idle;
        self.timers
            .schedule_game(SequenceTimer::NextRound, NEXT_ROUND_MS);
        Ok(ActionOutcome::Scored { points })
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn time_remaining_seconds(&self) -> Option<u32> {
        None
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
