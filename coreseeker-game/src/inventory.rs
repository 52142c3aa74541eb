//! Backpack use, resting and searching.
//!
//! All three act on the player and the current tile only; the session decides
//! which tile that is.

use crate::constants::{CORES_REQUIRED, HEALING_CAP, LOOT_CHANCE, REST_HEAL_MAX, REST_HEAL_MIN};
use crate::dice::Dice;
use crate::error::GameError;
use crate::frontend::{Frontend, Tone};
use crate::locations::{GridPos, LocationRegistry, SearchState};
use crate::player::{Item, ItemKind, Player};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseItemOutcome {
    /// The item was consumed.
    Used(Item),
    /// A story item was looked at and kept.
    Inspected(Item),
    Cancelled,
    Empty,
}

enum Selection {
    Cancel,
    Slot(usize),
}

fn read_selection(frontend: &mut dyn Frontend, slots: usize) -> Result<Selection, GameError> {
    loop {
        let answer = frontend.prompt()?;
        let answer = answer.trim();
        if answer.is_empty() {
            frontend.clear_last_lines(1);
            continue;
        }
        match answer.parse::<usize>() {
            Ok(0) => return Ok(Selection::Cancel),
            Ok(n) if n <= slots => return Ok(Selection::Slot(n - 1)),
            _ => frontend.clear_last_lines(1),
        }
    }
}

/// Let the player pick a backpack item and apply it.
///
/// Refused choices (over-healing, story items mid-fight) show the list again
/// until the player uses something or backs out with `0`.
///
/// # Errors
///
/// Propagates input failures from the frontend.
pub fn use_item(
    player: &mut Player,
    frontend: &mut dyn Frontend,
) -> Result<UseItemOutcome, GameError> {
    loop {
        if player.backpack().is_empty() {
            frontend.say("You have no items in your backpack.");
            return Ok(UseItemOutcome::Empty);
        }

        let slots = player.backpack().len();
        frontend.say("What item would you like to use?");
        frontend.line(&[("(0) Go Back", Tone::Info)]);
        frontend.render(&player.backpack_listing(), Tone::Plain);

        let index = match read_selection(frontend, slots)? {
            Selection::Cancel => return Ok(UseItemOutcome::Cancelled),
            Selection::Slot(index) => index,
        };
        let item = player.backpack()[index].clone();

        match item.kind {
            ItemKind::Healing => {
                if player.health.saturating_add(item.heal_amount()) > HEALING_CAP {
                    frontend.clear_last_lines(slots + 3);
                    frontend.line(&[
                        ("You can't use the ", Tone::Plain),
                        (&item.name, Tone::Highlight),
                        (" yet.", Tone::Plain),
                    ]);
                    frontend.blank();
                    continue;
                }
                player.heal(item.heal_amount());
                player.remove_item(&item);
                frontend.line(&[
                    ("You used the ", Tone::Plain),
                    (&item.name, Tone::Highlight),
                    (" and recovered ", Tone::Plain),
                    (&format!("{} health", item.value), Tone::Highlight),
                    (".", Tone::Plain),
                ]);
                log::debug!("healed {} with {}", item.value, item.name);
                return Ok(UseItemOutcome::Used(item));
            }
            ItemKind::Ammo => {
                player.weapon.reload(item.value);
                player.remove_item(&item);
                let weapon = player.weapon.name.clone();
                frontend.line(&[
                    ("You used the ", Tone::Plain),
                    (&item.name, Tone::Highlight),
                    (" and added ", Tone::Plain),
                    (&format!("{} ammo", item.value), Tone::Highlight),
                    (" to your ", Tone::Plain),
                    (&weapon, Tone::Highlight),
                    (".", Tone::Plain),
                ]);
                log::debug!("reloaded {} rounds from {}", item.value, item.name);
                return Ok(UseItemOutcome::Used(item));
            }
            ItemKind::Story => {
                if player.fighting {
                    frontend.say("You cannot use this item right now.");
                    frontend.blank();
                    continue;
                }
                frontend.say(
                    "The core is glowing green. Probably best not to mess with it right now.",
                );
                return Ok(UseItemOutcome::Inspected(item));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestOutcome {
    AlreadyHealthy,
    /// The tile forbids resting, or the player already tried since arriving.
    Blocked,
    Recovered(i32),
    Restless,
}

/// One attempt to rest on `pos`.
///
/// Recovered health is not clamped; only item healing respects the cap.
pub fn rest(
    player: &mut Player,
    registry: &mut LocationRegistry,
    pos: GridPos,
    dice: &mut dyn Dice,
    frontend: &mut dyn Frontend,
) -> RestOutcome {
    if player.health >= HEALING_CAP {
        frontend.say("You can't rest, you are already at full health.");
        return RestOutcome::AlreadyHealthy;
    }
    if !registry.can_rest(pos) {
        frontend.say("You are unable to rest here.");
        return RestOutcome::Blocked;
    }

    let outcome = if dice.coin() {
        let amount = dice.roll(REST_HEAL_MIN, REST_HEAL_MAX);
        player.heal(amount);
        frontend.line(&[
            ("You rested and recovered ", Tone::Plain),
            (&format!("{amount} health"), Tone::Highlight),
            (".", Tone::Plain),
        ]);
        RestOutcome::Recovered(amount)
    } else {
        frontend.say("You couldn't rest properly and didn't recover any health.");
        RestOutcome::Restless
    };
    registry.mark_rested(pos);
    log::debug!("rest at tile {}: {outcome:?}", pos.index());
    outcome
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Nothing,
    Found(Item),
    FoundStory(Item),
    /// Talked to the NPC without enough cores.
    Npc { held: usize, missing: usize },
    MissionComplete,
    AlreadySearched(SearchState),
}

/// Item tables a search draws from.
#[derive(Debug)]
pub struct SearchTables<'a> {
    pub loot: &'a [Item],
    /// Story items not yet found; drawn without replacement.
    pub story_pool: &'a mut Vec<Item>,
}

/// Search the tile at `pos`.
pub fn search(
    player: &mut Player,
    registry: &mut LocationRegistry,
    pos: GridPos,
    tables: SearchTables<'_>,
    dice: &mut dyn Dice,
    frontend: &mut dyn Frontend,
) -> SearchOutcome {
    let state = registry.search_state(pos);
    let outcome = match state {
        SearchState::Empty => {
            frontend.say("You looked around but couldn't find anything useful.");
            SearchOutcome::Nothing
        }
        SearchState::Lootable => {
            let found = search_loot(player, tables.loot, dice, frontend);
            registry.mark_searched(pos);
            found
        }
        SearchState::StoryItem => {
            let found = search_story(player, tables.story_pool, dice, frontend);
            registry.mark_searched(pos);
            found
        }
        SearchState::Npc => talk_to_npc(player, frontend),
        SearchState::SearchedStory => {
            frontend.say(
                "You've already searched this location. This is where you found a nuclear core.",
            );
            SearchOutcome::AlreadySearched(state)
        }
        SearchState::SearchedEmpty => {
            frontend.say("You've already searched this location, there's nothing left here.");
            SearchOutcome::AlreadySearched(state)
        }
    };
    log::debug!("search at tile {}: {outcome:?}", pos.index());
    outcome
}

fn search_loot(
    player: &mut Player,
    loot: &[Item],
    dice: &mut dyn Dice,
    frontend: &mut dyn Frontend,
) -> SearchOutcome {
    if loot.is_empty() || dice.percent() >= LOOT_CHANCE {
        frontend.say("You weren't able to find anything useful.");
        return SearchOutcome::Nothing;
    }
    let item = loot[dice.pick(loot.len())].clone();
    let effect = match item.kind {
        ItemKind::Ammo => format!("It gives you {} ammo.", item.value),
        _ => format!("It recovers {} health.", item.value),
    };
    frontend.line(&[
        ("You found a ", Tone::Plain),
        (&item.name, Tone::Highlight),
        (". ", Tone::Plain),
        (&effect, Tone::Plain),
    ]);
    player.add_item(item.clone());
    SearchOutcome::Found(item)
}

fn search_story(
    player: &mut Player,
    story_pool: &mut Vec<Item>,
    dice: &mut dyn Dice,
    frontend: &mut dyn Frontend,
) -> SearchOutcome {
    if story_pool.is_empty() {
        log::warn!("story tile searched with an empty story pool");
        frontend.say("You looked around but couldn't find anything useful.");
        return SearchOutcome::Nothing;
    }
    let item = story_pool.remove(dice.pick(story_pool.len()));
    frontend.line(&[
        ("You've found what looks like a ", Tone::Plain),
        ("nuclear core", Tone::Highlight),
        (".", Tone::Plain),
    ]);
    player.add_item(item.clone());
    SearchOutcome::FoundStory(item)
}

fn talk_to_npc(player: &mut Player, frontend: &mut dyn Frontend) -> SearchOutcome {
    let name = player.name.clone();
    if !player.met_npc {
        frontend.line(&[
            ("Unknown Scientist", Tone::Info),
            (": \"", Tone::Plain),
            (&name, Tone::Highlight),
            (", you must be here to help us, right?\"", Tone::Plain),
        ]);
        frontend.line(&[
            ("Unknown Scientist", Tone::Info),
            (
                ": \"We've been waiting for you. I'm Victor. My partner is unconscious in the next room.\"",
                Tone::Plain,
            ),
        ]);
        frontend.line(&[
            ("Victor", Tone::Info),
            (
                ": \"I've been trying to get into the bunker, but there's no power and ",
                Tone::Plain,
            ),
            (
                "we're missing the nuclear cores for the backup reactor",
                Tone::Highlight,
            ),
            (". We won't last much longer out here.\"", Tone::Plain),
        ]);
        frontend.line(&[
            ("Victor", Tone::Info),
            (": \"Have you found any of the cores?\"", Tone::Plain),
        ]);
        frontend.blank();
        player.met_npc = true;
    }

    let held = player.story_item_count();
    if held >= CORES_REQUIRED {
        frontend.line(&[
            ("Victor", Tone::Info),
            (
                ": \"You did it! That's all of the nuclear cores. I can start the backup reactor and open the bunker.\"",
                Tone::Plain,
            ),
        ]);
        frontend.line(&[
            ("Victor", Tone::Info),
            (
                ": \"We can wait in the bunker until the reinforcements arrive.\"",
                Tone::Plain,
            ),
        ]);
        player.game_ending = true;
        log::info!("mission complete for {name}");
        return SearchOutcome::MissionComplete;
    }

    let missing = CORES_REQUIRED - held;
    let noun = if missing == 1 { "core" } else { "cores" };
    frontend.line(&[
        ("Victor", Tone::Info),
        (
            &format!(": \"It seems you still need to find {missing} nuclear {noun}.\""),
            Tone::Plain,
        ),
    ]);
    SearchOutcome::Npc { held, missing }
}
