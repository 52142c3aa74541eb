//! Static data tables: enemy roster, loot, loadout choices and the story pool.
use serde::{Deserialize, Serialize};

use crate::constants::CORES_REQUIRED;
use crate::error::GameError;
use crate::player::{Item, ItemKind, Weapon};

const DEFAULT_GAME_DATA: &str = include_str!("../assets/game_data.json");

/// A named enemy move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    pub damage: i32,
}

/// Roster entry an enemy is spawned from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub health: i32,
    pub attacks: Vec<Attack>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponChoice {
    pub weapon: Weapon,
    #[serde(default)]
    pub blurb: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemChoice {
    pub item: Item,
    #[serde(default)]
    pub blurb: String,
}

/// Naming scheme for the collectible story items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPool {
    pub prefix: String,
    #[serde(default = "default_story_count")]
    pub count: usize,
}

const fn default_story_count() -> usize {
    CORES_REQUIRED
}

impl StoryPool {
    /// The full, ordered pool of story items.
    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        (1..=self.count)
            .map(|n| Item::story(format!("{} {n}", self.prefix)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub enemies: Vec<EnemyTemplate>,
    pub loot: Vec<Item>,
    pub weapons: Vec<WeaponChoice>,
    pub starting_items: Vec<ItemChoice>,
    pub story: StoryPool,
}

impl GameData {
    /// Parse and validate a data table.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the tables are unusable
    /// (empty roster, enemy without attacks, no loot, story pool smaller than
    /// the objective).
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// The tables shipped with the game.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset fails validation.
    pub fn load_default() -> Result<Self, GameError> {
        Self::from_json(DEFAULT_GAME_DATA)
    }

    fn validate(&self) -> Result<(), GameError> {
        if self.enemies.is_empty() {
            return Err(GameError::invalid("enemy roster is empty"));
        }
        if let Some(enemy) = self.enemies.iter().find(|enemy| enemy.attacks.is_empty()) {
            return Err(GameError::invalid(format!(
                "enemy '{}' has no attacks",
                enemy.name
            )));
        }
        if self.loot.is_empty() {
            return Err(GameError::invalid("loot table is empty"));
        }
        if self.loot.iter().any(|item| item.kind == ItemKind::Story) {
            return Err(GameError::invalid("loot table may not contain story items"));
        }
        if self.weapons.is_empty() {
            return Err(GameError::invalid("no weapons to choose from"));
        }
        if self.starting_items.is_empty() {
            return Err(GameError::invalid("no starting items to choose from"));
        }
        if self.story.count < CORES_REQUIRED {
            return Err(GameError::invalid(format!(
                "story pool holds {} items but {CORES_REQUIRED} are required",
                self.story.count
            )));
        }
        Ok(())
    }
}
