//! Pattern completion: spot the rule, pick the next item.
//!
//! A 60-second round. Each puzzle draws one of three pattern families —
//! color cycling over a fixed shape, shape cycling over a fixed color, or a
//! strict two-item alternation — and asks for the item that continues it,
//! among three uniformly drawn distractors. A correct pick awards
//! `10 * level` and raises the level; a wrong pick costs nothing. Either
//! way feedback blocks input for 1.5 s, and only a correct pick replaces
//! the puzzle.

use serde::{Deserialize, Serialize};

use crate::core::{
    Action, ActionOutcome, Countdown, EngineError, GameEndCallback, GameResult, GameRng,
    RejectReason, ResultReporter, RoundTimers, TimerKey,
};
use crate::engine::{GameId, MiniGameEngine};

const ROUND_SECONDS: u32 = 60;
const SETTLE_MS: u64 = 1_000;
const FEEDBACK_MS: u64 = 1_500;
const OPTION_COUNT: usize = 4;
const MAX_PATTERN_LEN: u32 = 6;

/// Shapes a pattern item can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Diamond,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Square, Shape::Triangle, Shape::Diamond];
}

/// Colors a pattern item can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl PatternColor {
    pub const ALL: [PatternColor; 5] = [
        PatternColor::Red,
        PatternColor::Blue,
        PatternColor::Green,
        PatternColor::Yellow,
        PatternColor::Purple,
    ];
}

/// One item of a pattern sequence or option row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternItem {
    pub shape: Shape,
    pub color: PatternColor,
}

/// A generated puzzle: the visible sequence, its continuation, and the
/// shuffled options (one of which is the continuation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    pub sequence: Vec<PatternItem>,
    pub answer: PatternItem,
    pub options: Vec<PatternItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PatternTimer {
    FeedbackEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Choosing,
    /// Feedback pause; `advance` says whether a new puzzle follows.
    Feedback {
        advance: bool,
    },
    Ended,
}

/// The PatternLogic round engine.
#[derive(Debug)]
pub struct PatternLogic {
    rng: GameRng,
    timers: RoundTimers<PatternTimer>,
    countdown: Countdown,
    reporter: ResultReporter,
    phase: Phase,
    score: u32,
    level: u32,
    puzzle: Puzzle,
}

impl PatternLogic {
    #[must_use]
    pub fn new(mut rng: GameRng) -> Self {
        let puzzle = Self::generate(&mut rng, 1);
        Self {
            rng,
            timers: RoundTimers::new(),
            countdown: Countdown::new(ROUND_SECONDS),
            reporter: ResultReporter::detached(),
            phase: Phase::Idle,
            score: 0,
            level: 1,
            puzzle,
        }
    }

    /// The puzzle currently on screen.
    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Whether the engine is waiting out a feedback pause.
    #[must_use]
    pub fn in_feedback(&self) -> bool {
        matches!(self.phase, Phase::Feedback { .. })
    }

    fn pattern_len(level: u32) -> usize {
        (3 + level / 2).min(MAX_PATTERN_LEN) as usize
    }

    /// Build a puzzle: sequence, family-consistent answer, shuffled options.
    fn generate(rng: &mut GameRng, level: u32) -> Puzzle {
        let len = Self::pattern_len(level);
        let shapes = Shape::ALL;
        let colors = PatternColor::ALL;

        // Family weights: 0.4 color-cycle, 0.4 shape-cycle, 0.2 alternation.
        let family = rng.choose_weighted(&[0.4, 0.4, 0.2]).unwrap_or(0);

        let (sequence, answer): (Vec<PatternItem>, PatternItem) = match family {
            0 => {
                // Fixed shape, colors cycling through the palette
                let shape = *rng.choose(&shapes).unwrap_or(&Shape::Circle);
                let sequence = (0..len)
                    .map(|i| PatternItem {
                        shape,
                        color: colors[i % colors.len()],
                    })
                    .collect();
                let answer = PatternItem {
                    shape,
                    color: colors[len % colors.len()],
                };
                (sequence, answer)
            }
            1 => {
                // Fixed color, shapes cycling
                let color = *rng.choose(&colors).unwrap_or(&PatternColor::Red);
                let sequence = (0..len)
                    .map(|i| PatternItem {
                        shape: shapes[i % shapes.len()],
                        color,
                    })
                    .collect();
                let answer = PatternItem {
                    shape: shapes[len % shapes.len()],
                    color,
                };
                (sequence, answer)
            }
            _ => {
                // Strict two-item alternation; the answer continues it
                let sequence = (0..len)
                    .map(|i| PatternItem {
                        shape: shapes[i % 2],
                        color: colors[i % 2],
                    })
                    .collect();
                let answer = PatternItem {
                    shape: shapes[len % 2],
                    color: colors[len % 2],
                };
                (sequence, answer)
            }
        };

        // Three distractors, unique among the options and the answer
        let mut options = vec![answer];
        while options.len() < OPTION_COUNT {
            let candidate = PatternItem {
                shape: *rng.choose(&shapes).unwrap_or(&Shape::Circle),
                color: *rng.choose(&colors).unwrap_or(&PatternColor::Red),
            };
            if !options.contains(&candidate) {
                options.push(candidate);
            }
        }
        rng.shuffle(&mut options);

        Puzzle {
            sequence,
            answer,
            options,
        }
    }

    fn end_round(&mut self) {
        log::debug!(
            "pattern-logic round over at level {}, score {}",
            self.level,
            self.score
        );
        self.phase = Phase::Ended;
        self.timers.begin_settle(SETTLE_MS);
    }

    fn report(&mut self) {
        // Heuristic score-per-level ratio, not a hit rate.
        let accuracy =
            ((f64::from(self.score) / f64::from(self.level.max(1))) * 100.0).round() as u32;
        let result = GameResult::new(self.score, ROUND_SECONDS)
            .with_level(self.level)
            .with_accuracy(accuracy);
        self.reporter.report(result);
    }
}

impl MiniGameEngine for PatternLogic {
    fn game_id(&self) -> GameId {
        GameId::PatternLogic
    }

    fn start(&mut self) {
        if self.phase != Phase::Idle {
            log::warn!("start() called twice on pattern-logic; ignoring");
            return;
        }
        self.phase = Phase::Choosing;
        self.timers.start_countdown();
    }

    fn tick(&mut self, elapsed_ms: u64) {
        for key in self.timers.advance(elapsed_ms) {
            match key {
                TimerKey::Countdown => {
                    if self.phase != Phase::Ended && self.countdown.on_tick() == 0 {
                        self.end_round();
                    }
                }
                TimerKey::Settle => self.report(),
                TimerKey::Game(PatternTimer::FeedbackEnd) => {
                    if let Phase::Feedback { advance } = self.phase {
                        if advance {
                            self.puzzle = Self::generate(&mut self.rng, self.level);
                        }
                        self.phase = Phase::Choosing;
                    }
                }
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> Result<ActionOutcome, EngineError> {
        match self.phase {
            Phase::Idle => return Err(EngineError::NotStarted),
            Phase::Ended => return Err(EngineError::RoundOver),
            Phase::Feedback { .. } => {
                let Action::ChooseOption(_) = action else {
                    return Err(EngineError::UnsupportedAction);
                };
                return Ok(ActionOutcome::Rejected(RejectReason::NotAcceptingInput));
            }
            Phase::Choosing => {}
        }

        let Action::ChooseOption(index) = action else {
            return Err(EngineError::UnsupportedAction);
        };
        let Some(picked) = self.puzzle.options.get(index) else {
            return Ok(ActionOutcome::Rejected(RejectReason::UnknownStimulus));
        };

        let correct = *picked == self.puzzle.answer;
        self.timers.schedule_game(PatternTimer::FeedbackEnd, FEEDBACK_MS);
        self.phase = Phase::Feedback { advance: correct };

        if correct {
            let points = 10 * self.level;
            self.score += points;
            self.level += 1;
            Ok(ActionOutcome::Scored { points })
        } else {
            // No penalty for a wrong pick; the same puzzle stays up
            Ok(ActionOutcome::Missed { penalty: 0 })
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
