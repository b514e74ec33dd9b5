//! The discrete action vocabulary and its outcomes.
//!
//! All six games consume the same `Action` enum; each engine accepts the
//! variants that make sense for it and signals the rest as host misuse.
//! Outcomes distinguish scoring plays, neutral accepted moves, scored
//! misses, and non-fatal rejections with a human-readable reason.

use serde::{Deserialize, Serialize};

/// Unique id of a spawned stimulus within one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StimulusId(pub u32);

impl StimulusId {
    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StimulusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stimulus({})", self.0)
    }
}

/// A discrete user action forwarded by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Click a spawned target (FocusTarget).
    ClickTarget(StimulusId),
    /// Press one of the four color buttons, 0..4 (MemorySequence).
    PressColor(u8),
    /// Pick one of the four answer options by index (PatternLogic).
    ChooseOption(usize),
    /// Select a peg, 0..3 (TowerHanoi).
    SelectPeg(usize),
    /// Choose the disk count before the round starts (TowerHanoi).
    SetDiskCount(u8),
    /// Click a grid cell by index (SpeedMatch).
    ClickCell(usize),
    /// Submit a word for the current theme (WordAssociation).
    SubmitWord(String),
}

/// Why an action was rejected. Non-fatal feedback, never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The round is not in an input-accepting phase (playback, feedback
    /// pause, between rounds).
    NotAcceptingInput,
    /// The referenced stimulus does not exist (already expired or consumed,
    /// or the index is out of range).
    UnknownStimulus,
    /// Selected an empty peg as the move source.
    EmptyPeg,
    /// The move would place a larger disk onto a smaller one.
    IllegalMove,
    /// Submitted an empty word.
    EmptyWord,
    /// The word was already submitted for this theme.
    DuplicateWord,
    /// The word is not related to the current theme.
    UnrelatedWord,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            RejectReason::NotAcceptingInput => "input is not being accepted right now",
            RejectReason::UnknownStimulus => "that stimulus is no longer present",
            RejectReason::EmptyPeg => "an empty peg cannot be the move source",
            RejectReason::IllegalMove => "a larger disk cannot rest on a smaller one",
            RejectReason::EmptyWord => "submit a non-empty word",
            RejectReason::DuplicateWord => "word already used this theme",
            RejectReason::UnrelatedWord => "word is not related to the theme",
        };
        f.write_str(reason)
    }
}

/// Outcome of a handled action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Correct play; `points` were awarded.
    Scored { points: u32 },
    /// Valid but non-scoring (mid-sequence press, peg selection, setup).
    Accepted,
    /// Wrong answer the game scores as a miss; `penalty` is the nominal
    /// deduction (the score clamps at zero).
    Missed { penalty: u32 },
    /// Rejected with a reason; round state is unchanged.
    Rejected(RejectReason),
}

impl ActionOutcome {
    /// Whether the action was accepted in some form.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, ActionOutcome::Rejected(_))
    }

    /// Points awarded, if any.
    #[must_use]
    pub fn points(&self) -> u32 {
        match self {
            ActionOutcome::Scored { points } => *points,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_queries() {
        assert!(ActionOutcome::Scored { points: 10 }.is_accepted());
        assert!(ActionOutcome::Accepted.is_accepted());
        assert!(ActionOutcome::Missed { penalty: 5 }.is_accepted());
        assert!(!ActionOutcome::Rejected(RejectReason::IllegalMove).is_accepted());

        assert_eq!(ActionOutcome::Scored { points: 10 }.points(), 10);
        assert_eq!(ActionOutcome::Missed { penalty: 5 }.points(), 0);
    }

    #[test]
    fn test_reject_reason_is_human_readable() {
        let text = RejectReason::DuplicateWord.to_string();
        assert!(text.contains("already used"));
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::SubmitWord("banana".to_string());
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }

    #[test]
    fn test_stimulus_id_display() {
        assert_eq!(format!("{}", StimulusId(42)), "Stimulus(42)");
    }
}
