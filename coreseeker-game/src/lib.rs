//! Coreseeker Game Engine
//!
//! Platform-agnostic core logic for Coreseeker, a turn-based text adventure on
//! a 5×5 grid: explore, fight, scavenge, and bring nine nuclear cores back to
//! the scientist. Rendering and input go through the [`Frontend`] trait so the
//! same engine drives the console and the test transcripts.

pub mod combat;
pub mod constants;
pub mod data;
pub mod dice;
pub mod error;
pub mod frontend;
pub mod inventory;
pub mod locations;
pub mod maps;
pub mod navigation;
pub mod player;
pub mod session;

// Re-export commonly used types
pub use combat::{
    CombatAction, CombatContext, EncounterEngine, EncounterOutcome, Enemy, FleeBudget,
};
pub use data::{Attack, EnemyTemplate, GameData, ItemChoice, StoryPool, WeaponChoice};
pub use dice::{Dice, RngDice, ScriptedDice};
pub use error::GameError;
pub use frontend::{Frontend, Span, Tone, Transcript, first_char};
pub use inventory::{
    RestOutcome, SearchOutcome, SearchTables, UseItemOutcome, rest, search, use_item,
};
pub use locations::{GridPos, Location, LocationRegistry, SearchState};
pub use navigation::{Arrival, Direction, NavigationOutcome, Navigator};
pub use player::{Item, ItemKind, Player, Weapon};
pub use session::{Action, ActionResult, GameSession, Loadout, confirm};
