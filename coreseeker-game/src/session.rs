use crate::combat::{CombatContext, EncounterEngine, FleeBudget};
use crate::data::GameData;
use crate::dice::Dice;
use crate::error::GameError;
use crate::frontend::{Frontend, Tone, first_char};
use crate::inventory::{self, RestOutcome, SearchOutcome, SearchTables, UseItemOutcome};
use crate::locations::{GridPos, LocationRegistry};
use crate::maps::{self, MAP_HEIGHT};
use crate::navigation::{Direction, NavigationOutcome, Navigator};
use crate::player::{Item, Player, Weapon};

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    UseItem,
    Move,
    ViewMaps,
    Search,
    Rest,
    CheckCharacter,
}

impl Action {
    pub const ALL: [Self; 6] = [
        Self::UseItem,
        Self::Move,
        Self::ViewMaps,
        Self::Search,
        Self::Rest,
        Self::CheckCharacter,
    ];

    /// Action for a 1-based menu number.
    #[must_use]
    pub const fn from_menu(number: u32) -> Option<Self> {
        match number {
            1 => Some(Self::UseItem),
            2 => Some(Self::Move),
            3 => Some(Self::ViewMaps),
            4 => Some(Self::Search),
            5 => Some(Self::Rest),
            6 => Some(Self::CheckCharacter),
            _ => None,
        }
    }

    /// Parse a menu answer. Only whole numbers are accepted.
    #[must_use]
    pub fn parse(answer: &str) -> Option<Self> {
        answer.trim().parse().ok().and_then(Self::from_menu)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UseItem => "Use item",
            Self::Move => "Move Around",
            Self::ViewMaps => "View Maps",
            Self::Search => "Search Location",
            Self::Rest => "Rest",
            Self::CheckCharacter => "Check Character",
        }
    }

    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::UseItem => "<=-- Using Item --=>",
            Self::Move => "<=-- Moving --=>",
            Self::ViewMaps => "<=-- Viewing Maps --=>",
            Self::Search => "<=-- Searching Location --=>",
            Self::Rest => "<=-- Resting --=>",
            Self::CheckCharacter => "<=-- Checking Character --=>",
        }
    }
}

/// State of the player once an action has resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Survived,
    Dead,
    GameEnding,
}

/// What the player picked before setting out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loadout {
    pub name: String,
    pub weapon: Weapon,
    pub items: Vec<Item>,
}

/// One playthrough: the player, the map and everything random about them.
///
/// Starting a new game means building a new session. Only the flee budget
/// carries over, via [`GameSession::with_flee_budget`].
pub struct GameSession<D> {
    player: Player,
    registry: LocationRegistry,
    navigator: Navigator,
    flee: FleeBudget,
    story_pool: Vec<Item>,
    loot: Vec<Item>,
    engine: EncounterEngine,
    dice: D,
}

impl<D: Dice> GameSession<D> {
    /// Fresh session on the shipped map.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded map or the roster in `data` is invalid.
    pub fn new_game(loadout: Loadout, data: &GameData, dice: D) -> Result<Self, GameError> {
        Self::with_registry(loadout, data, LocationRegistry::load_default()?, dice)
    }

    /// Fresh session on a caller-supplied map.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster in `data` is invalid.
    pub fn with_registry(
        loadout: Loadout,
        data: &GameData,
        registry: LocationRegistry,
        dice: D,
    ) -> Result<Self, GameError> {
        let mut player = Player::new(loadout.name, loadout.weapon);
        for item in loadout.items {
            player.add_item(item);
        }
        player.recalculate_weight();
        log::info!(
            "new game for {} with {} (weight {})",
            player.name,
            player.weapon.name,
            player.weight()
        );

        Ok(Self {
            player,
            registry,
            navigator: Navigator::new(),
            flee: FleeBudget::default(),
            story_pool: data.story.items(),
            loot: data.loot.clone(),
            engine: EncounterEngine::new(data.enemies.clone())?,
            dice,
        })
    }

    /// Keep the escape penalty earned in earlier games.
    #[must_use]
    pub fn with_flee_budget(mut self, flee: FleeBudget) -> Self {
        self.flee = flee;
        self
    }

    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    pub const fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[must_use]
    pub const fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    pub const fn registry_mut(&mut self) -> &mut LocationRegistry {
        &mut self.registry
    }

    #[must_use]
    pub const fn position(&self) -> GridPos {
        self.navigator.position()
    }

    #[must_use]
    pub const fn flee_budget(&self) -> FleeBudget {
        self.flee
    }

    /// Story items not found yet.
    #[must_use]
    pub fn story_pool(&self) -> &[Item] {
        &self.story_pool
    }

    pub const fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Whether the game goes on.
    #[must_use]
    pub const fn status(&self) -> ActionResult {
        if !self.player.alive {
            ActionResult::Dead
        } else if self.player.game_ending {
            ActionResult::GameEnding
        } else {
            ActionResult::Survived
        }
    }

    /// Run one main-menu action to completion.
    ///
    /// # Errors
    ///
    /// Propagates input failures from the frontend.
    pub fn apply_action(
        &mut self,
        action: Action,
        frontend: &mut dyn Frontend,
    ) -> Result<ActionResult, GameError> {
        self.player.recalculate_weight();
        frontend.line(&[(action.heading(), Tone::Highlight)]);
        frontend.blank();

        match action {
            Action::UseItem => {
                self.use_item(frontend)?;
            }
            Action::Move => {
                self.travel(frontend)?;
            }
            Action::ViewMaps => self.view_maps(frontend),
            Action::Search => {
                self.search(frontend);
            }
            Action::Rest => {
                self.rest(frontend);
            }
            Action::CheckCharacter => frontend.render(&self.check_character(), Tone::Plain),
        }

        let result = self.status();
        log::debug!("{action:?} -> {result:?}");
        Ok(result)
    }

    /// Show the position map, ask for a direction and take it.
    ///
    /// # Errors
    ///
    /// Propagates input failures from the frontend.
    pub fn travel(&mut self, frontend: &mut dyn Frontend) -> Result<NavigationOutcome, GameError> {
        let here = self.registry.tile(self.position()).name.clone();
        frontend.line(&[
            ("You are currently in the ", Tone::Plain),
            (&here, Tone::Highlight),
            (", where do you want to go?", Tone::Plain),
        ]);
        frontend.blank();
        maps::render_position_map(frontend, self.position());

        match self.navigator.read_direction(frontend)? {
            None => Ok(NavigationOutcome::Stayed),
            Some(direction) => {
                // Old map, key legend, spacer and prompt line.
                frontend.clear_last_lines(MAP_HEIGHT + 3);
                self.navigate(direction, frontend)
            }
        }
    }

    /// Step one tile and fight whatever waits there.
    ///
    /// # Errors
    ///
    /// Propagates input failures from the frontend.
    pub fn navigate(
        &mut self,
        direction: Direction,
        frontend: &mut dyn Frontend,
    ) -> Result<NavigationOutcome, GameError> {
        let Some(arrival) = self.navigator.advance(direction, &mut self.registry) else {
            frontend.say("You can't go that way.");
            return Ok(NavigationOutcome::Blocked);
        };

        maps::render_position_map(frontend, arrival.to);
        let tile = self.registry.tile(arrival.to);
        let (name, description) = (tile.name.clone(), tile.description.clone());
        frontend.line(&[
            ("You are now in the ", Tone::Plain),
            (&name, Tone::Highlight),
            (". \"", Tone::Plain),
            (&description, Tone::Plain),
            ("\"", Tone::Plain),
        ]);
        frontend.blank();

        let encounter = if arrival.combat_pending {
            Some(self.engine.run(CombatContext {
                player: &mut self.player,
                registry: &mut self.registry,
                pos: arrival.to,
                flee: &mut self.flee,
                dice: &mut self.dice,
                frontend,
            })?)
        } else {
            None
        };

        Ok(NavigationOutcome::Moved {
            to: arrival.to,
            encounter,
        })
    }

    pub fn search(&mut self, frontend: &mut dyn Frontend) -> SearchOutcome {
        let pos = self.position();
        inventory::search(
            &mut self.player,
            &mut self.registry,
            pos,
            SearchTables {
                loot: &self.loot,
                story_pool: &mut self.story_pool,
            },
            &mut self.dice,
            frontend,
        )
    }

    pub fn rest(&mut self, frontend: &mut dyn Frontend) -> RestOutcome {
        let pos = self.position();
        inventory::rest(
            &mut self.player,
            &mut self.registry,
            pos,
            &mut self.dice,
            frontend,
        )
    }

    /// # Errors
    ///
    /// Propagates input failures from the frontend.
    pub fn use_item(&mut self, frontend: &mut dyn Frontend) -> Result<UseItemOutcome, GameError> {
        inventory::use_item(&mut self.player, frontend)
    }

    /// Both maps side by side.
    pub fn view_maps(&self, frontend: &mut dyn Frontend) {
        maps::render_combined_map(frontend, &self.registry, self.position());
    }

    /// Health, weapon and backpack as display text.
    #[must_use]
    pub fn check_character(&self) -> String {
        let player = &self.player;
        let mut sheet = format!(
            "You have {} health.\nYou are carrying a {} with {} ammo.\n",
            player.health, player.weapon.name, player.weapon.ammo
        );
        if player.backpack().is_empty() {
            sheet.push_str("You are carrying no items.\n");
        } else {
            sheet.push_str("You are carrying the following items:\n");
            sheet.push_str(&player.backpack_listing());
        }
        sheet
    }
}

/// Read a yes/no answer, swallowing anything else.
///
/// # Errors
///
/// Propagates input failures from the frontend.
pub fn confirm(frontend: &mut dyn Frontend) -> Result<bool, GameError> {
    loop {
        match first_char(&frontend.prompt()?) {
            Some('Y') => return Ok(true),
            Some('N') => return Ok(false),
            _ => frontend.clear_last_lines(1),
        }
    }
}
