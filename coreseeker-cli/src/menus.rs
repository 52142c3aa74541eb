//! Title screens, loadout selection and the main menu loop.

use coreseeker_game::maps::render_mission_map;
use coreseeker_game::{
    Action, ActionResult, Dice, FleeBudget, Frontend, GameData, GameError, GameSession, Item,
    ItemChoice, LocationRegistry, Loadout, RngDice, Tone, Weapon, WeaponChoice, confirm,
};

const SPACER: &str = "            ----------------------------";
const STARTING_ITEM_PICKS: usize = 2;

fn spacer(frontend: &mut dyn Frontend) {
    frontend.line(&[(SPACER, Tone::Success)]);
    frontend.blank();
}

fn yes_no(frontend: &mut dyn Frontend, spans: &[(&str, Tone)]) -> Result<bool, GameError> {
    let mut question = spans.to_vec();
    question.push((" (Y)es / (N)o", Tone::Info));
    frontend.line(&question);
    confirm(frontend)
}

/// Read a menu number in `1..=count`, erasing anything else.
fn read_choice(frontend: &mut dyn Frontend, count: usize) -> Result<usize, GameError> {
    loop {
        match frontend.prompt()?.trim().parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(n - 1),
            _ => frontend.clear_last_lines(1),
        }
    }
}

pub fn print_tutorial(frontend: &mut dyn Frontend) {
    frontend.line(&[("Welcome to Coreseeker!", Tone::Success)]);
    frontend.line(&[
        ("Your inputs are marked by the \"", Tone::Plain),
        (" > ", Tone::Success),
        ("\".", Tone::Plain),
    ]);
    frontend.say(
        "Type your answer and press enter. Depending on the question it can be a number, a letter or a name.",
    );
    frontend.say(
        "If your input seems to disappear, it was not a valid answer. Read the question and try again.",
    );
    frontend.blank();
    spacer(frontend);
}

/// Ask for a non-empty name until the player confirms it.
///
/// # Errors
///
/// Propagates input failures from the frontend.
pub fn prompt_name(frontend: &mut dyn Frontend) -> Result<String, GameError> {
    loop {
        frontend.render("Enter your name: ", Tone::Success);
        let name = frontend.read_line()?.trim().to_string();
        if name.is_empty() {
            frontend.clear_last_lines(1);
            continue;
        }
        if yes_no(
            frontend,
            &[
                ("Are you sure you want to use \"", Tone::Plain),
                (&name, Tone::Highlight),
                ("\" as your name?", Tone::Plain),
            ],
        )? {
            frontend.blank();
            spacer(frontend);
            return Ok(name);
        }
        frontend.clear_last_lines(3);
    }
}

/// Mission briefing, including the map of core locations.
pub fn mission_briefing(frontend: &mut dyn Frontend, name: &str, registry: &LocationRegistry) {
    frontend.line(&[
        ("\"", Tone::Plain),
        (name, Tone::Highlight),
        (", you have been chosen for an important reconnaissance mission.", Tone::Plain),
    ]);
    frontend.say(
        "Two scientists were running classified research at a nuclear facility and we have lost contact with them. Find them and keep them safe until reinforcements arrive.",
    );
    frontend.say(
        "Intelligence has nothing on the facility yet, except that the whole area is highly radioactive.",
    );
    frontend.say(
        "The facility sent us this map before communication cut out. We don't know what it marks, but it must be important.",
    );
    render_mission_map(frontend, registry);
    frontend.say(
        "One more thing: the armoury is nearly empty. Ammunition is low and there aren't enough medkits to go around, so scavenge what you can and avoid fights where possible.",
    );
    frontend.say("Godspeed, soldier.\"");
    frontend.blank();
    spacer(frontend);
}

/// # Errors
///
/// Propagates input failures from the frontend.
pub fn choose_weapon(
    frontend: &mut dyn Frontend,
    choices: &[WeaponChoice],
) -> Result<Weapon, GameError> {
    frontend.say("Choose a weapon to bring with you:");
    for (idx, choice) in choices.iter().enumerate() {
        frontend.line(&[
            ("The ", Tone::Plain),
            (&format!("({}) {}", idx + 1, choice.weapon.name), Tone::Info),
            (" is ", Tone::Plain),
            (&choice.blurb, Tone::Highlight),
            (".", Tone::Plain),
        ]);
    }

    loop {
        let weapon = &choices[read_choice(frontend, choices.len())?].weapon;
        if yes_no(
            frontend,
            &[
                ("Are you sure you want to use the ", Tone::Plain),
                (&weapon.name, Tone::Highlight),
                (" as your weapon?", Tone::Plain),
            ],
        )? {
            frontend.blank();
            log::debug!("weapon chosen: {}", weapon.name);
            return Ok(weapon.clone());
        }
        frontend.clear_last_lines(3);
    }
}

/// Two picks from the starting items; the same item may be picked twice.
///
/// # Errors
///
/// Propagates input failures from the frontend.
pub fn choose_items(
    frontend: &mut dyn Frontend,
    choices: &[ItemChoice],
) -> Result<Vec<Item>, GameError> {
    let mut picked = Vec::with_capacity(STARTING_ITEM_PICKS);
    while picked.len() < STARTING_ITEM_PICKS {
        if picked.is_empty() {
            frontend.say("Pick your first item to take with you:");
            for (idx, choice) in choices.iter().enumerate() {
                frontend.line(&[
                    ("The ", Tone::Plain),
                    (&format!("({}) {}", idx + 1, choice.item.name), Tone::Info),
                    (" is ", Tone::Plain),
                    (&choice.blurb, Tone::Highlight),
                    (".", Tone::Plain),
                ]);
            }
        } else {
            frontend.say("Pick your second item to take with you:");
        }

        loop {
            let item = &choices[read_choice(frontend, choices.len())?].item;
            if yes_no(
                frontend,
                &[
                    ("Are you sure you want to pick the ", Tone::Plain),
                    (&item.name, Tone::Highlight),
                    ("?", Tone::Plain),
                ],
            )? {
                picked.push(item.clone());
                break;
            }
            frontend.clear_last_lines(3);
        }
        frontend.blank();
    }
    spacer(frontend);
    Ok(picked)
}

/// Everything before the first menu: name, briefing and loadout.
///
/// # Errors
///
/// Propagates input failures and invalid data tables.
pub fn prepare_loadout(frontend: &mut dyn Frontend, data: &GameData) -> Result<Loadout, GameError> {
    let name = prompt_name(frontend)?;
    mission_briefing(frontend, &name, &LocationRegistry::load_default()?);
    let weapon = choose_weapon(frontend, &data.weapons)?;
    let items = choose_items(frontend, &data.starting_items)?;
    Ok(Loadout {
        name,
        weapon,
        items,
    })
}

fn menu_line() -> String {
    Action::ALL
        .iter()
        .enumerate()
        .map(|(idx, action)| format!("({}) {}", idx + 1, action.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Main menu until the player dies or completes the mission.
///
/// # Errors
///
/// Propagates input failures from the frontend.
pub fn main_loop<D: Dice>(
    session: &mut GameSession<D>,
    frontend: &mut dyn Frontend,
) -> Result<ActionResult, GameError> {
    let options = menu_line();
    loop {
        frontend.line(&[
            ("What would you like to do? ", Tone::Plain),
            (&options, Tone::Info),
        ]);
        let Some(action) = Action::parse(&frontend.prompt()?) else {
            frontend.clear_last_lines(2);
            continue;
        };

        let result = session.apply_action(action, frontend)?;
        frontend.blank();
        spacer(frontend);
        if result != ActionResult::Survived {
            return Ok(result);
        }
    }
}

pub fn ending_banner(frontend: &mut dyn Frontend, result: ActionResult) {
    let (text, tone) = match result {
        ActionResult::Dead => (
            "| You failed to complete the mission... Game Over  |",
            Tone::Danger,
        ),
        ActionResult::GameEnding => (
            "|       You completed the mission! Game Over       |",
            Tone::Success,
        ),
        ActionResult::Survived => return,
    };
    let border = "+--------------------------------------------------+";
    frontend.line(&[(border, tone)]);
    frontend.line(&[(text, tone)]);
    frontend.line(&[(border, tone)]);
    frontend.blank();
}

/// # Errors
///
/// Propagates input failures from the frontend.
pub fn play_again(frontend: &mut dyn Frontend) -> Result<bool, GameError> {
    yes_no(frontend, &[("Do you want to play again?", Tone::Plain)])
}

/// Whole program flow: tutorial, then games until the player stops.
///
/// Each game gets its own dice, derived from `seed` and the game number.
/// The flee budget carries over from one game to the next.
///
/// # Errors
///
/// Propagates input failures and invalid data tables.
pub fn play(frontend: &mut dyn Frontend, data: &GameData, seed: u64) -> Result<(), GameError> {
    print_tutorial(frontend);
    let mut flee = FleeBudget::default();
    for game in 0_u64.. {
        let game_seed = seed.wrapping_add(game);
        log::info!("starting game {} with seed {game_seed}", game + 1);
        let loadout = prepare_loadout(frontend, data)?;
        let mut session = GameSession::new_game(loadout, data, RngDice::from_seed(game_seed))?
            .with_flee_budget(flee);

        let result = main_loop(&mut session, frontend)?;
        flee = session.flee_budget();
        ending_banner(frontend, result);
        if !play_again(frontend)? {
            break;
        }
        frontend.blank();
    }
    frontend.blank();
    frontend.line(&[("Thank you for playing!", Tone::Success)]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coreseeker_game::{ScriptedDice, Transcript};

    fn data() -> GameData {
        GameData::load_default().unwrap()
    }

    #[test]
    fn name_can_be_retyped_before_confirming() {
        let mut frontend = Transcript::new(["", "Ash", "n", "  Rook ", "?", "y"]);
        assert_eq!(prompt_name(&mut frontend).unwrap(), "Rook");
        // Blank name, rejected name (3 lines) and the stray "?".
        assert_eq!(frontend.cleared_lines(), 5);
    }

    #[test]
    fn weapon_choice_requires_confirmation() {
        let data = data();
        let mut frontend = Transcript::new(["9", "3", "n", "2", "yes"]);
        let weapon = choose_weapon(&mut frontend, &data.weapons).unwrap();
        assert_eq!(weapon.name, "Rifle");
        assert!(frontend.output().contains("(3) Sniper"));
    }

    #[test]
    fn same_starting_item_can_be_picked_twice() {
        let data = data();
        let mut frontend = Transcript::new(["2", "y", "2", "y"]);
        let items = choose_items(&mut frontend, &data.starting_items).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.name == "Ammo Box"));
        assert!(frontend.output().contains("Pick your second item"));
    }

    #[test]
    fn briefing_shows_the_mission_map() {
        let registry = LocationRegistry::load_default().unwrap();
        let mut frontend = Transcript::default();
        mission_briefing(&mut frontend, "Ash", &registry);
        assert!(frontend.output().contains("\"Ash, you have been chosen"));
        assert!(frontend.output().contains("| X |   |   | X | X |"));
    }

    #[test]
    fn menu_lists_all_six_actions() {
        assert_eq!(
            menu_line(),
            "(1) Use item, (2) Move Around, (3) View Maps, (4) Search Location, (5) Rest, (6) Check Character"
        );
    }

    #[test]
    fn main_loop_ends_on_mission_complete() {
        let data = data();
        let loadout = Loadout {
            name: "Ash".into(),
            weapon: data.weapons[0].weapon.clone(),
            items: Vec::new(),
        };
        let mut session = GameSession::new_game(loadout, &data, ScriptedDice::default()).unwrap();
        for n in 1..=9 {
            session
                .player_mut()
                .add_item(Item::story(format!("Nuclear Core No. {n}")));
        }
        session
            .registry_mut()
            .clear_combat(coreseeker_game::GridPos::from_index(2).unwrap());

        let mut frontend = Transcript::new([
            "", "menu", "6", "2", "d", "2", "d", "2", "d", "2", "d", "4",
        ]);
        let result = main_loop(&mut session, &mut frontend).unwrap();
        assert_eq!(result, ActionResult::GameEnding);
        assert!(frontend.output().contains("You have 100 health."));
        assert_eq!(session.position().index(), 4);

        ending_banner(&mut frontend, result);
        assert!(frontend.output().contains("You completed the mission!"));
    }

    #[test]
    fn full_game_with_quit_at_the_end() {
        let data = data();
        let mut inputs = vec!["Ash", "y", "1", "y", "1", "y", "3", "y"];
        // Check the character sheet, then feed EOF: input closes mid-game.
        inputs.push("6");
        let mut frontend = Transcript::new(inputs);
        let err = play(&mut frontend, &data, 7).unwrap_err();
        assert!(matches!(err, GameError::InputClosed));
        assert!(
            frontend
                .output()
                .contains("You are carrying the following items:\n - (1) Food Pack\n - (2) First Aid Kit\n")
        );
    }
}
