//! Player, weapon and item records.
use serde::{Deserialize, Serialize};

use crate::constants::STARTING_HEALTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Restores `value` health when used.
    Healing,
    /// Adds `value` rounds to the current weapon when used.
    Ammo,
    /// Nuclear core; never consumed, counts toward the objective.
    Story,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub weight: u32,
    pub kind: ItemKind,
}

impl Item {
    #[must_use]
    pub fn new(name: impl Into<String>, value: u32, weight: u32, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            value,
            weight,
            kind,
        }
    }

    /// A weightless story item.
    #[must_use]
    pub fn story(name: impl Into<String>) -> Self {
        Self::new(name, 0, 0, ItemKind::Story)
    }

    /// Value expressed as health points.
    #[must_use]
    pub fn heal_amount(&self) -> i32 {
        i32::try_from(self.value).unwrap_or(i32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: i32,
    pub ammo: u32,
    pub weight: u32,
    pub range: i32,
}

impl Weapon {
    #[must_use]
    pub fn new(name: impl Into<String>, damage: i32, ammo: u32, weight: u32, range: i32) -> Self {
        Self {
            name: name.into(),
            damage,
            ammo,
            weight,
            range,
        }
    }

    pub fn reload(&mut self, rounds: u32) {
        self.ammo = self.ammo.saturating_add(rounds);
    }

    /// Spend one round. Never drops below zero.
    pub fn spend_round(&mut self) {
        self.ammo = self.ammo.saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub health: i32,
    pub weapon: Weapon,
    backpack: Vec<Item>,
    weight: u32,
    pub alive: bool,
    pub fighting: bool,
    pub game_ending: bool,
    pub met_npc: bool,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, weapon: Weapon) -> Self {
        let mut player = Self {
            name: name.into(),
            health: STARTING_HEALTH,
            weapon,
            backpack: Vec::new(),
            weight: 0,
            alive: true,
            fighting: false,
            game_ending: false,
            met_npc: false,
        };
        player.recalculate_weight();
        player
    }

    #[must_use]
    pub fn backpack(&self) -> &[Item] {
        &self.backpack
    }

    pub fn add_item(&mut self, item: Item) {
        self.backpack.push(item);
    }

    /// Remove the first item equal to `item`, returning it.
    pub fn remove_item(&mut self, item: &Item) -> Option<Item> {
        let position = self.backpack.iter().position(|held| held == item)?;
        Some(self.backpack.remove(position))
    }

    /// First ammo item in display order.
    #[must_use]
    pub fn first_ammo(&self) -> Option<&Item> {
        self.backpack.iter().find(|item| item.kind == ItemKind::Ammo)
    }

    #[must_use]
    pub fn story_item_count(&self) -> usize {
        self.backpack
            .iter()
            .filter(|item| item.kind == ItemKind::Story)
            .count()
    }

    /// Weapon plus backpack weight, computed fresh.
    #[must_use]
    pub fn carried_weight(&self) -> u32 {
        self.backpack
            .iter()
            .fold(self.weapon.weight, |total, item| total.saturating_add(item.weight))
    }

    /// Refresh the cached weight used by encounter rolls.
    pub fn recalculate_weight(&mut self) -> u32 {
        self.weight = self.carried_weight();
        self.weight
    }

    /// Weight as of the last [`Player::recalculate_weight`].
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount);
    }

    /// Apply damage; flips `alive` once health reaches zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount);
        if self.health <= 0 {
            self.alive = false;
        }
    }

    /// Numbered backpack listing, one ` - (n) name` line per item.
    #[must_use]
    pub fn backpack_listing(&self) -> String {
        self.backpack
            .iter()
            .enumerate()
            .map(|(idx, item)| format!(" - ({}) {}\n", idx + 1, item.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rifle() -> Weapon {
        Weapon::new("Rifle", 10, 12, 3, 3)
    }

    #[test]
    fn weight_tracks_weapon_and_backpack() {
        let mut player = Player::new("Ash", rifle());
        assert_eq!(player.weight(), 3);
        player.add_item(Item::new("First Aid Kit", 25, 3, ItemKind::Healing));
        player.add_item(Item::story("Nuclear Core No. 4"));
        assert_eq!(player.weight(), 3, "cached weight only refreshes on demand");
        assert_eq!(player.recalculate_weight(), 6);
    }

    #[test]
    fn removal_is_by_value_not_index() {
        let mut player = Player::new("Ash", rifle());
        let food = Item::new("Food Pack", 10, 1, ItemKind::Healing);
        let ammo = Item::new("Ammo Box", 18, 2, ItemKind::Ammo);
        player.add_item(food.clone());
        player.add_item(ammo.clone());
        player.add_item(food.clone());

        assert_eq!(player.remove_item(&ammo), Some(ammo));
        assert_eq!(player.backpack(), &[food.clone(), food]);
        assert!(player.first_ammo().is_none());
    }

    #[test]
    fn spending_rounds_saturates_at_zero() {
        let mut weapon = Weapon::new("Pistol", 8, 1, 1, 1);
        weapon.spend_round();
        weapon.spend_round();
        assert_eq!(weapon.ammo, 0);
        weapon.reload(6);
        assert_eq!(weapon.ammo, 6);
    }

    #[test]
    fn lethal_damage_marks_player_dead() {
        let mut player = Player::new("Ash", rifle());
        player.take_damage(99);
        assert!(player.alive);
        player.take_damage(1);
        assert!(!player.alive);
        assert_eq!(player.health, 0);
    }

    #[test]
    fn listing_is_one_indexed() {
        let mut player = Player::new("Ash", rifle());
        player.add_item(Item::new("Used Magazine", 12, 1, ItemKind::Ammo));
        assert_eq!(player.backpack_listing(), " - (1) Used Magazine\n");
    }
}
