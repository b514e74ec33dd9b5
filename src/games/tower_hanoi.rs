//! The classic three-peg disk puzzle.
//!
//! Disk count N is chosen in 3..=6 before the round starts and is fixed
//! thereafter. Selecting a non-empty peg picks up its top disk; selecting a
//! destination moves it when legal (empty peg, or a larger disk on top),
//! otherwise the move is silently rejected and the selection cleared.
//! Winning — all N disks on the third peg — scores
//! `max(1000 - moves*10 - elapsed, 100)` with an optimal-to-actual accuracy
//! that can exceed 100 when the player beats `2^N - 1` (it cannot be beaten,
//! but the formula is kept as-is). The result is reported after a 2-second
//! victory display.

use smallvec::SmallVec;

use crate::core::{
    Action, ActionOutcome, EngineError, GameEndCallback, GameResult, RejectReason,
    ResultReporter, RoundTimers, TimerKey,
};
use crate::engine::{GameId, MiniGameEngine};

const PEG_COUNT: usize = 3;
const MIN_DISKS: u8 = 3;
const MAX_DISKS: u8 = 6;
const SETTLE_MS: u64 = 2_000;

/// A peg holds disk sizes bottom-to-top, strictly descending.
pub type Peg = SmallVec<[u8; 6]>;

/// Game timers beyond the shared tick; TowerHanoi has none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HanoiTimer {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Setup,
    Active,
    Won,
}

/// The TowerHanoi round engine.
#[derive(Debug)]
pub struct TowerHanoi {
    timers: RoundTimers<HanoiTimer>,
    reporter: ResultReporter,
    phase: Phase,
    disk_count: u8,
    pegs: [Peg; PEG_COUNT],
    /// Source peg of the pending move, if a disk is picked up.
    selected: Option<usize>,
    moves: u32,
    elapsed_seconds: u32,
    score: u32,
}

impl TowerHanoi {
    /// Create a puzzle with the given disk count.
    pub fn new(disk_count: u8) -> Result<Self, EngineError> {
        if !(MIN_DISKS..=MAX_DISKS).contains(&disk_count) {
            return Err(EngineError::InvalidDiskCount(disk_count));
        }
        Ok(Self {
            timers: RoundTimers::new(),
            reporter: ResultReporter::detached(),
            phase: Phase::Setup,
            disk_count,
            pegs: [Peg::new(), Peg::new(), Peg::new()],
            selected: None,
            moves: 0,
            elapsed_seconds: 0,
            score: 0,
        })
    }

    /// The three pegs, bottom-to-top.
    #[must_use]
    pub fn pegs(&self) -> &[Peg; PEG_COUNT] {
        &self.pegs
    }

    /// Source peg of the picked-up disk, if any.
    #[must_use]
    pub fn selected_peg(&self) -> Option<usize> {
        self.selected
    }

    /// Successful moves so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Seconds since the round started.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Minimal number of moves for the current disk count.
    #[must_use]
    pub fn optimal_moves(&self) -> u32 {
        (1u32 << self.disk_count) - 1
    }

    fn try_move(&mut self, from: usize, to: usize) -> ActionOutcome {
        let Some(&moving) = self.pegs[from].last() else {
            // Selection of an empty source should not happen; treat as stale
            self.selected = None;
            return ActionOutcome::Rejected(RejectReason::EmptyPeg);
        };

        let legal = match self.pegs[to].last() {
            None => true,
            Some(&top) => top > moving,
        };
        self.selected = None;

        if !legal {
            return ActionOutcome::Rejected(RejectReason::IllegalMove);
        }

        self.pegs[from].pop();
        self.pegs[to].push(moving);
        self.moves += 1;

        if self.pegs[2].len() == usize::from(self.disk_count) {
            self.win();
        }
        ActionOutcome::Accepted
    }

    fn win(&mut self) {
        self.phase = Phase::Won;
        self.score = (1_000i64 - i64::from(self.moves) * 10 - i64::from(self.elapsed_seconds))
            .max(100) as u32;
        log::debug!(
            "tower-hanoi solved in {} moves ({}s), score {}",
            self.moves,
            self.elapsed_seconds,
            self.score
        );
        self.timers.begin_settle(SETTLE_MS);
    }

    fn report(&mut self) {
        // Optimal-to-actual ratio, expressed as a percentage.
        let accuracy = ((f64::from(self.optimal_moves()) / f64::from(self.moves.max(1)))
            * 100.0)
            .round() as u32;
        let result = GameResult::new(self.score, self.elapsed_seconds)
            .with_level(u32::from(self.disk_count))
            .with_accuracy(accuracy)
            .with_moves(self.moves);
        self.reporter.report(result);
    }
}

impl MiniGameEngine for TowerHanoi {
    fn game_id(&self) -> GameId {
        GameId::TowerHanoi
    }

    fn start(&mut self) {
        if self.phase != Phase::Setup {
            log::warn!("start() called twice on tower-hanoi; ignoring");
            return;
        }
        // Largest disk at the bottom of the first peg
        self.pegs[0] = (1..=self.disk_count).rev().collect();
        self.phase = Phase::Active;
        self.timers.start_countdown();
    }

    fn tick(&mut self, elapsed_ms: u64) {
        for key in self.timers.advance(elapsed_ms) {
            match key {
                TimerKey::Countdown => {
                    if self.phase == Phase::Active {
                        self.elapsed_seconds += 1;
                    }
                }
                TimerKey::Settle => self.report(),
                TimerKey::Game(timer) => match timer {},
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> Result<ActionOutcome, EngineError> {
        match action {
            Action::SetDiskCount(count) => {
                if self.phase != Phase::Setup {
                    // Disk count is fixed once the round is underway
                    return Ok(ActionOutcome::Rejected(RejectReason::NotAcceptingInput));
                }
                if !(MIN_DISKS..=MAX_DISKS).contains(&count) {
                    return Err(EngineError::InvalidDiskCount(count));
                }
                self.disk_count = count;
                Ok(ActionOutcome::Accepted)
            }
            Action::SelectPeg(index) => {
                match self.phase {
                    Phase::Setup => return Err(EngineError::NotStarted),
                    Phase::Won => return Err(EngineError::RoundOver),
                    Phase::Active => {}
                }
                if index >= PEG_COUNT {
                    return Ok(ActionOutcome::Rejected(RejectReason::UnknownStimulus));
                }

                match self.selected {
                    None => {
                        if self.pegs[index].is_empty() {
                            Ok(ActionOutcome::Rejected(RejectReason::EmptyPeg))
                        } else {
                            self.selected = Some(index);
                            Ok(ActionOutcome::Accepted)
                        }
                    }
                    Some(source) if source == index => {
                        // Selecting the source again puts the disk back down
                        self.selected = None;
                        Ok(ActionOutcome::Accepted)
                    }
                    Some(source) => Ok(self.try_move(source, index)),
                }
            }
            _ => Err(EngineError::UnsupportedAction),
        }
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn level(&self) -> u32 {
        u32::from(self.disk_count)
    }

    fn time_remaining_seconds(&self) -> Option<u32> {
        None
    }

    fn is_ended(&self) -> bool {
        self.phase == Phase::Won
    }

    fn result(&self) -> Option<&GameResult> {
        self.reporter.delivered()
    }

    fn set_on_game_end(&mut self, callback: GameEndCallback) {
        self.reporter.set_callback(callback);
    }
}
