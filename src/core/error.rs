//! Engine errors: host-boundary configuration failures and lifecycle misuse.
//!
//! Ordinary invalid play (a wrong click, an illegal disk move, an unrelated
//! word) is NOT an error — it is non-fatal feedback carried by
//! `ActionOutcome::Rejected`. `EngineError` covers the cases the host must
//! not silently swallow.

use thiserror::Error;

/// Failures at the host boundary or from lifecycle misuse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No game with this id exists; the host should refuse to construct an
    /// engine and show a fallback.
    #[error("unknown game id `{0}`")]
    UnknownGame(String),

    /// No category with this id exists.
    #[error("unknown category `{0}`")]
    UnknownCategory(String),

    /// An action arrived before `start()`.
    #[error("round has not started")]
    NotStarted,

    /// An action arrived after the round ended.
    #[error("round is already over")]
    RoundOver,

    /// The action variant is not part of this game's vocabulary.
    #[error("action is not supported by this game")]
    UnsupportedAction,

    /// TowerHanoi setup with a disk count outside 3..=6.
    #[error("disk count must be between 3 and 6, got {0}")]
    InvalidDiskCount(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        assert_eq!(
            EngineError::UnknownGame("focus-targte".into()).to_string(),
            "unknown game id `focus-targte`"
        );
        assert_eq!(
            EngineError::InvalidDiskCount(9).to_string(),
            "disk count must be between 3 and 6, got 9"
        );
    }
}
