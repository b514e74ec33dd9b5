//! The result contract and its one-shot delivery.
//!
//! A round produces exactly one `GameResult`. The `ResultReporter` owns the
//! host callback and enforces at-most-once delivery; afterwards the result
//! stays queryable for polling hosts.

use serde::{Deserialize, Serialize};

/// Summary record of one finished round.
///
/// `score` and `time_elapsed_seconds` are always present; the rest varies by
/// game. Accuracy is a per-game derived figure, not necessarily a literal
/// hit rate, and TowerHanoi's can exceed 100 when the player beats the
/// theoretical optimum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub score: u32,
    pub time_elapsed_seconds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_percent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moves: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words_found: Option<u32>,
}

impl GameResult {
    /// Create a result with the two universal fields.
    #[must_use]
    pub fn new(score: u32, time_elapsed_seconds: u32) -> Self {
        Self {
            score,
            time_elapsed_seconds,
            level: None,
            accuracy_percent: None,
            moves: None,
            words_found: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, percent: u32) -> Self {
        self.accuracy_percent = Some(percent);
        self
    }

    #[must_use]
    pub fn with_moves(mut self, moves: u32) -> Self {
        self.moves = Some(moves);
        self
    }

    #[must_use]
    pub fn with_words_found(mut self, words: u32) -> Self {
        self.words_found = Some(words);
        self
    }
}

/// Host callback receiving the terminal result.
pub type GameEndCallback = Box<dyn FnOnce(GameResult)>;

/// Owns the host callback and guarantees at-most-once delivery.
pub struct ResultReporter {
    callback: Option<GameEndCallback>,
    delivered: Option<GameResult>,
}

impl ResultReporter {
    /// Reporter with a host callback.
    #[must_use]
    pub fn new(callback: GameEndCallback) -> Self {
        Self {
            callback: Some(callback),
            delivered: None,
        }
    }

    /// Reporter without a callback; the result is still queryable.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            callback: None,
            delivered: None,
        }
    }

    /// Attach or replace the host callback.
    ///
    /// Attaching after the result was delivered is host misuse; the callback
    /// is dropped with a warning rather than invoked late.
    pub fn set_callback(&mut self, callback: GameEndCallback) {
        if self.delivered.is_some() {
            log::warn!("callback attached after result delivery; dropping it");
            return;
        }
        self.callback = Some(callback);
    }

    /// Deliver the result. Returns false (and logs) on a duplicate report.
    pub fn report(&mut self, result: GameResult) -> bool {
        if self.delivered.is_some() {
            log::warn!("duplicate result report ignored");
            return false;
        }
        self.delivered = Some(result.clone());
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
        true
    }

    /// The delivered result, if the round has reported.
    #[must_use]
    pub fn delivered(&self) -> Option<&GameResult> {
        self.delivered.as_ref()
    }

    /// Whether the result has been delivered.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.delivered.is_some()
    }
}

impl std::fmt::Debug for ResultReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultReporter")
            .field("has_callback", &self.callback.is_some())
            .field("delivered", &self.delivered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_report_invokes_callback_once() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        let mut reporter =
            ResultReporter::new(Box::new(move |result| sink.borrow_mut().push(result)));

        assert!(reporter.report(GameResult::new(120, 30)));
        assert!(!reporter.report(GameResult::new(999, 30)));

        let received = received.borrow();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].score, 120);
    }

    #[test]
    fn test_first_result_wins() {
        let mut reporter = ResultReporter::detached();

        reporter.report(GameResult::new(10, 60));
        reporter.report(GameResult::new(20, 60));

        assert_eq!(reporter.delivered().map(|r| r.score), Some(10));
    }

    #[test]
    fn test_detached_reporter_records_result() {
        let mut reporter = ResultReporter::detached();
        assert!(!reporter.is_delivered());

        reporter.report(GameResult::new(50, 90).with_words_found(3));

        assert!(reporter.is_delivered());
        assert_eq!(reporter.delivered().and_then(|r| r.words_found), Some(3));
    }

    #[test]
    fn test_late_callback_is_dropped() {
        let mut reporter = ResultReporter::detached();
        reporter.report(GameResult::new(1, 1));

        let invoked = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&invoked);
        reporter.set_callback(Box::new(move |_| *flag.borrow_mut() = true));

        // A later report is still a duplicate and must not invoke anything
        reporter.report(GameResult::new(2, 2));
        assert!(!*invoked.borrow());
    }

    #[test]
    fn test_result_builder() {
        let result = GameResult::new(700, 45)
            .with_level(4)
            .with_accuracy(100)
            .with_moves(15);

        assert_eq!(result.score, 700);
        assert_eq!(result.time_elapsed_seconds, 45);
        assert_eq!(result.level, Some(4));
        assert_eq!(result.accuracy_percent, Some(100));
        assert_eq!(result.moves, Some(15));
        assert_eq!(result.words_found, None);
    }

    #[test]
    fn test_result_serialization_skips_absent_fields() {
        let json = serde_json::to_string(&GameResult::new(10, 30)).unwrap();
        assert!(!json.contains("moves"));

        let result = GameResult::new(10, 30).with_level(2);
        let round_trip: GameResult =
            serde_json::from_str(&serde_json::to_string(&result).unwrap()).unwrap();
        assert_eq!(round_trip, result);
    }
}
