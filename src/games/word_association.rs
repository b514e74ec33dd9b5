//! Themed word association: submit words related to the current theme.
//!
//! A 90-second round. The theme is drawn from those whose difficulty does
//! not exceed `min(level, 4)`. A submission is lower-cased and trimmed,
//! refused if already submitted for this theme (valid or not), accepted as
//! valid from the theme's canonical keyword list or as a "good association"
//! from its loose list, and otherwise refused as unrelated. Accepted words
//! award `10 + difficulty*5`; every fifth accepted word raises the level and
//! re-selects the theme 1.5 s later. Words-found and accuracy in the result
//! cover the whole round, across theme changes.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{
    Action, ActionOutcome, Countdown, EngineError, GameEndCallback, GameResult, GameRng,
    RejectReason, ResultReporter, RoundTimers, TimerKey,
};
use crate::engine::{GameId, MiniGameEngine};

const ROUND_SECONDS: u32 = 90;
const SETTLE_MS: u64 = 1_000;
const NEXT_THEME_MS: u64 = 1_500;
const WORDS_PER_LEVEL: u32 = 5;
const MAX_THEME_DIFFICULTY: u32 = 4;

/// A theme with its canonical keywords and loose associations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub difficulty: u32,
    pub keywords: &'static [&'static str],
    pub associations: &'static [&'static str],
}

/// The built-in themes, in ascending difficulty.
pub static THEMES: [Theme; 5] = [
    Theme {
        name: "Animais",
        difficulty: 1,
        keywords: &[
            "cachorro", "gato", "pássaro", "peixe", "cavalo", "vaca", "porco", "galinha",
            "ovelha", "coelho", "rato", "elefante", "leão", "tigre", "urso", "lobo", "raposa",
            "veado", "zebra", "girafa",
        ],
        associations: &["pet", "bicho", "animal", "mamífero", "réptil", "ave", "inseto"],
    },
    Theme {
        name: "Frutas",
        difficulty: 1,
        keywords: &[
            "maçã", "banana", "laranja", "uva", "morango", "abacaxi", "manga", "pêra",
            "pêssego", "melancia", "melão", "kiwi", "limão", "cereja", "ameixa", "coco",
            "mamão", "goiaba", "açaí", "caju",
        ],
        associations: &["fruta", "doce", "vitamina", "suco", "natural", "orgânico"],
    },
    Theme {
        name: "Profissões",
        difficulty: 2,
        keywords: &[
            "médico", "professor", "engenheiro", "advogado", "enfermeiro", "policial",
            "bombeiro", "cozinheiro", "motorista", "vendedor", "contador", "dentista",
            "veterinário", "jornalista", "artista", "músico", "escritor", "programador",
            "arquiteto", "psicólogo",
        ],
        associations: &["trabalho", "carreira", "emprego", "ofício", "especialista"],
    },
    Theme {
        name: "Emoções",
        difficulty: 3,
        keywords: &[
            "alegria", "tristeza", "raiva", "medo", "amor", "ódio", "ansiedade",
            "felicidade", "melancolia", "euforia", "nostalgia", "esperança", "desespero",
            "gratidão", "inveja", "orgulho", "vergonha", "surpresa", "curiosidade",
            "compaixão",
        ],
        associations: &["sentimento", "humor", "estado", "psicologia", "mental"],
    },
    Theme {
        name: "Ciência",
        difficulty: 4,
        keywords: &[
            "átomo", "molécula", "célula", "dna", "proteína", "energia", "gravidade",
            "evolução", "fotossíntese", "microscópio", "telescópio", "laboratório",
            "experimento", "hipótese", "teoria", "pesquisa", "descoberta", "inovação",
            "tecnologia", "medicina",
        ],
        associations: &["pesquisa", "estudo", "conhecimento", "método", "análise"],
    },
];

/// Why a submission was accepted or refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordVerdict {
    /// In the theme's canonical keyword list.
    Valid,
    /// In the theme's loose-association list.
    GoodAssociation,
    /// Already submitted this theme.
    AlreadyUsed,
    /// Not related to the theme.
    Unrelated,
}

impl WordVerdict {
    /// Whether the submission scored.
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, WordVerdict::Valid | WordVerdict::GoodAssociation)
    }
}

/// One recorded submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub word: String,
    pub verdict: WordVerdict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WordTimer {
    NextTheme,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Active,
    Ended,
}

/// The WordAssociation round engine.
#[derive(Debug)]
pub struct WordAssociation {
    rng: GameRng,
    timers: RoundTimers<WordTimer>,
    countdown: Countdown,
    reporter: ResultReporter,
    phase: Phase,
    score: u32,
    level: u32,
    theme_index: usize,
    /// Lower-cased submissions for the current theme, valid or not.
    used: FxHashSet<String>,
    /// Every submission of the round, across themes.
    submissions: Vec<Submission>,
    valid_count: u32,
    submitted_count: u32,
}

impl WordAssociation {
    #[must_use]
    pub fn new(mut rng: GameRng) -> Self {
        let theme_index = Self::pick_theme(&mut rng, 1);
        Self {
            rng,
            timers: RoundTimers::new(),
            countdown: Countdown::new(ROUND_SECONDS),
            reporter: ResultReporter::detached(),
            phase: Phase::Idle,
            score: 0,
            level: 1,
            theme_index,
            used: FxHashSet::default(),
            submissions: Vec::new(),
            valid_count: 0,
            submitted_count: 0,
        }
    }

    /// The active theme.
    #[must_use]
    pub fn theme(&self) -> &'static Theme {
        &THEMES[self.theme_index]
    }

    /// Every submission of the round, in order.
    #[must_use]
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Accepted submissions so far, across themes.
    #[must_use]
    pub fn words_found(&self) -> u32 {
        self.valid_count
    }

    fn pick_theme(rng: &mut GameRng, level: u32) -> usize {
        let cap = level.min(MAX_THEME_DIFFICULTY);
        let available: Vec<usize> = THEMES
            .iter()
            .enumerate()
            .filter(|(_, t)| t.difficulty <= cap)
            .map(|(i, _)| i)
            .collect();
        // Difficulty 1 themes exist, so the pool is never empty
        available[rng.gen_range_usize(0..available.len())]
    }

    fn select_theme(&mut self) {
        self.theme_index = Self::pick_theme(&mut self.rng, self.level);
        self.used.clear();
        log::debug!("word-association theme is now {}", self.theme().name);
    }

    fn judge(&self, clean: &str) -> WordVerdict {
        if self.used.contains(clean) {
            WordVerdict::AlreadyUsed
        } else if self.theme().keywords.iter().any(|k| *k == clean) {
            WordVerdict::Valid
        } else if self.theme().associations.iter().any(|k| *k == clean) {
            WordVerdict::GoodAssociation
        } else {
            WordVerdict::Unrelated
        }
    }

    fn end_round(&mut self) {
        log::debug!(
            "word-association round over, {} valid of {} submitted",
            self.valid_count,
            self.submitted_count
        );
        self.phase = Phase::Ended;
        self.timers.begin_settle(SETTLE_MS);
    }

    fn report(&mut self) {
        let accuracy = ((f64::from(self.valid_count)
            / f64::from(self.submitted_count.max(1)))
            * 100.0)
            .round() as u32;
        let result = GameResult::new(self.score, ROUND_SECONDS)
            .with_words_found(self.valid_count)
            .with_accuracy(accuracy);
        self.reporter.report(result);
    }
}

impl MiniGameEngine for WordAssociation {
    fn game_id(&self) -> GameId {
        GameId::WordAssociation
    }

    fn start(&mut self) {
        if self.phase != Phase::Idle {
            log::warn!("start() called twice on word-association; ignoring");
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
                TimerKey::Game(WordTimer::NextTheme) => {
                    if self.phase == Phase::Active {
                        self.select_theme();
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

        let Action::SubmitWord(word) = action else {
            return Err(EngineError::UnsupportedAction);
        };
        let trimmed = word.trim();
        if trimmed.is_empty() {
            // Empty input is refused without being recorded
            return Ok(ActionOutcome::Rejected(RejectReason::EmptyWord));
        }
        let clean = trimmed.to_lowercase();

        let verdict = self.judge(&clean);
        self.used.insert(clean);
        self.submissions.push(Submission {
            word: trimmed.to_string(),
            verdict,
        });
        self.submitted_count += 1;

        match verdict {
            WordVerdict::Valid | WordVerdict::GoodAssociation => {
                let points = 10 + self.theme().difficulty * 5;
                self.score += points;
                self.valid_count += 1;
                if self.valid_count % WORDS_PER_LEVEL == 0 {
                    self.level += 1;
                    self.timers.cancel_game(WordTimer::NextTheme);
                    self.timers.schedule_game(WordTimer::NextTheme, NEXT_THEME_MS);
                }
                Ok(ActionOutcome::Scored { points })
            }
            WordVerdict::AlreadyUsed => {
                Ok(ActionOutcome::Rejected(RejectReason::DuplicateWord))
            }
            WordVerdict::Unrelated => {
                Ok(ActionOutcome::Rejected(RejectReason::UnrelatedWord))
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(seed: u64) -> WordAssociation {
        let mut game = WordAssociation::new(GameRng::new(seed));
        game.start();
        game
    }

    /// Find a seed whose first theme is the given one.
    fn engine_with_theme(name: &str) -> WordAssociation {
        for seed in 0..1_000 {
            let game = engine(seed);
            if game.theme().name == name {
                return game;
            }
        }
        panic!("no seed under 1000 selects theme {name}");
    }

    fn submit(game: &mut WordAssociation, word: &str) -> ActionOutcome {
        game.handle_action(Action::SubmitWord(word.to_string()))
            .unwrap()
    }

    #[test]
    fn test_initial_theme_is_easy() {
        for seed in 0..50 {
            let game = engine(seed);
            assert_eq!(game.theme().difficulty, 1);
        }
    }

    #[test]
    fn test_keyword_scores_by_difficulty() {
        let mut game = engine_with_theme("Frutas");
        let outcome = submit(&mut game, "banana");
        assert_eq!(outcome, ActionOutcome::Scored { points: 15 });
        assert_eq!(game.score(), 15);
        assert_eq!(game.words_found(), 1);
    }

    #[test]
    fn test_loose_association_scores_too() {
        let mut game = engine_with_theme("Frutas");
        let outcome = submit(&mut game, "suco");
        assert_eq!(outcome, ActionOutcome::Scored { points: 15 });
        assert_eq!(
            game.submissions()[0].verdict,
            WordVerdict::GoodAssociation
        );
    }

    #[test]
    fn test_normalization_trims_and_lowercases() {
        let mut game = engine_with_theme("Frutas");
        assert_eq!(
            submit(&mut game, "  BANANA  "),
            ActionOutcome::Scored { points: 15 }
        );
        // Case-insensitive duplicate
        assert_eq!(
            submit(&mut game, "Banana"),
            ActionOutcome::Rejected(RejectReason::DuplicateWord)
        );
    }

    #[test]
    fn test_empty_word_is_not_recorded() {
        let mut game = engine(42);
        assert_eq!(
            submit(&mut game, "   "),
            ActionOutcome::Rejected(RejectReason::EmptyWord)
        );
        assert!(game.submissions().is_empty());
    }

    #[test]
    fn test_invalid_submissions_also_block_reuse() {
        let mut game = engine_with_theme("Frutas");
        assert_eq!(
            submit(&mut game, "xyz"),
            ActionOutcome::Rejected(RejectReason::UnrelatedWord)
        );
        // Same unrelated word again reads as already used
        assert_eq!(
            submit(&mut game, "xyz"),
            ActionOutcome::Rejected(RejectReason::DuplicateWord)
        );
    }

    #[test]
    fn test_every_fifth_valid_levels_up_and_reselects() {
        let mut game = engine_with_theme("Frutas");
        let keywords: Vec<&str> = game.theme().keywords[..5].to_vec();

        for word in keywords {
            submit(&mut game, word);
        }

        assert_eq!(game.level(), 2);
        assert_eq!(game.words_found(), 5);

        // Theme reselects after 1.5s and the used set clears
        game.tick(1_500);
        assert_eq!(
            submit(&mut game, "zzz"),
            ActionOutcome::Rejected(RejectReason::UnrelatedWord)
        );
    }

    #[test]
    fn test_totals_span_theme_changes() {
        let mut game = engine_with_theme("Frutas");
        for word in game.theme().keywords[..5].to_vec() {
            submit(&mut game, word);
        }
        game.tick(1_500);

        // One more valid word in whatever theme follows
        let keyword = game.theme().keywords[0];
        submit(&mut game, keyword);

        assert_eq!(game.words_found(), 6);
    }
}
