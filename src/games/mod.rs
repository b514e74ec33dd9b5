//! The six mini-game engines and the host-facing catalog.
//!
//! Each engine composes the core RNG, timers and reporter with its own
//! generator, scoring policy and input rule, and implements
//! [`crate::engine::MiniGameEngine`].

pub mod catalog;
pub mod focus_target;
pub mod memory_sequence;
pub mod pattern_logic;
pub mod speed_match;
pub mod tower_hanoi;
pub mod word_association;

pub use catalog::{create, Category, EngineConfig, GameInfo, CATALOG};
pub use focus_target::{FocusTarget, Target};
pub use memory_sequence::MemorySequence;
pub use pattern_logic::{PatternColor, PatternItem, PatternLogic, Puzzle, Shape};
pub use speed_match::{Cell, SpeedMatch, SYMBOLS};
pub use tower_hanoi::{Peg, TowerHanoi};
pub use word_association::{Submission, Theme, WordAssociation, WordVerdict, THEMES};
