//! Host boundary: the game catalog and engine construction.
//!
//! The host parses a slug into a [`GameId`] (unknown ids are refused, never
//! swallowed), looks up display metadata here, and calls [`create`] for a
//! boxed engine. Categories mirror the cognitive skills the games train.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, GameRng};
use crate::engine::{GameId, MiniGameEngine};
use crate::games::{
    FocusTarget, MemorySequence, PatternLogic, SpeedMatch, TowerHanoi, WordAssociation,
};

/// Cognitive-skill category a game belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Attention,
    Memory,
    Logic,
    Planning,
    Speed,
    Language,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Attention,
        Category::Memory,
        Category::Logic,
        Category::Planning,
        Category::Speed,
        Category::Language,
    ];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Category::Attention => "attention",
            Category::Memory => "memory",
            Category::Logic => "logic",
            Category::Planning => "planning",
            Category::Speed => "speed",
            Category::Language => "language",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| EngineError::UnknownCategory(s.to_string()))
    }
}

/// Display metadata for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    pub id: GameId,
    pub category: Category,
    pub name: &'static str,
    pub description: &'static str,
}

/// All six games with their host-facing metadata.
pub static CATALOG: [GameInfo; 6] = [
    GameInfo {
        id: GameId::FocusTarget,
        category: Category::Attention,
        name: "Alvo da Concentração",
        description: "Clique apenas nos alvos corretos",
    },
    GameInfo {
        id: GameId::MemorySequence,
        category: Category::Memory,
        name: "Sequência Memorável",
        description: "Memorize e repita a sequência",
    },
    GameInfo {
        id: GameId::PatternLogic,
        category: Category::Logic,
        name: "Lógica de Padrões",
        description: "Descubra o próximo item do padrão",
    },
    GameInfo {
        id: GameId::TowerHanoi,
        category: Category::Planning,
        name: "Torre de Hanói",
        description: "Mova todos os discos para a terceira torre",
    },
    GameInfo {
        id: GameId::SpeedMatch,
        category: Category::Speed,
        name: "Correspondência Rápida",
        description: "Encontre todos os símbolos iguais ao alvo",
    },
    GameInfo {
        id: GameId::WordAssociation,
        category: Category::Language,
        name: "Associação de Palavras",
        description: "Encontre palavras relacionadas ao tema",
    },
];

/// Look up a game's metadata.
#[must_use]
pub fn game_info(id: GameId) -> &'static GameInfo {
    CATALOG
        .iter()
        .find(|info| info.id == id)
        .expect("every GameId has a catalog entry")
}

/// Games belonging to a category.
#[must_use]
pub fn games_in(category: Category) -> Vec<&'static GameInfo> {
    CATALOG.iter().filter(|info| info.category == category).collect()
}

/// Per-round configuration supplied by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RNG seed; omit for OS entropy.
    pub seed: Option<u64>,
    /// Disk count for TowerHanoi, 3..=6. Defaults to 3.
    pub disk_count: Option<u8>,
}

/// Build an engine for the given game.
///
/// The host attaches its completion callback with
/// [`MiniGameEngine::set_on_game_end`] and then calls `start`.
pub fn create(
    id: GameId,
    config: &EngineConfig,
) -> Result<Box<dyn MiniGameEngine>, EngineError> {
    let rng = match config.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    Ok(match id {
        GameId::FocusTarget => Box::new(FocusTarget::new(rng)),
        GameId::MemorySequence => Box::new(MemorySequence::new(rng)),
        GameId::PatternLogic => Box::new(PatternLogic::new(rng)),
        GameId::TowerHanoi => Box::new(TowerHanoi::new(config.disk_count.unwrap_or(3))?),
        GameId::SpeedMatch => Box::new(SpeedMatch::new(rng)),
        GameId::WordAssociation => Box::new(WordAssociation::new(rng)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_game_and_category() {
        for id in GameId::ALL {
            assert_eq!(game_info(id).id, id);
        }
        for category in Category::ALL {
            assert_eq!(games_in(category).len(), 1);
        }
    }

    #[test]
    fn test_category_slug_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_is_refused() {
        let err = "speeed".parse::<Category>().unwrap_err();
        assert_eq!(err, EngineError::UnknownCategory("speeed".to_string()));
    }

    #[test]
    fn test_create_builds_every_game() {
        let config = EngineConfig {
            seed: Some(42),
            ..EngineConfig::default()
        };
        for id in GameId::ALL {
            let engine = create(id, &config).unwrap();
            assert_eq!(engine.game_id(), id);
            assert!(!engine.is_ended());
        }
    }

    #[test]
    fn test_create_rejects_bad_disk_count() {
        let config = EngineConfig {
            seed: Some(1),
            disk_count: Some(9),
        };
        let err = create(GameId::TowerHanoi, &config).unwrap_err();
        assert_eq!(err, EngineError::InvalidDiskCount(9));
    }
}
