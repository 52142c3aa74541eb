//! Centralized balance and tuning constants for Coreseeker game logic.
//!
//! These values define the probability model of the simulation. Keeping them
//! together means the balance can only change through reviewed code, while
//! names, rosters and map text live in the JSON data tables.

// Grid -----------------------------------------------------------------------
pub const GRID_SIZE: usize = 5;
pub const TILE_COUNT: usize = GRID_SIZE * GRID_SIZE;
pub const START_TILE: usize = 0;

// Player -----------------------------------------------------------------------
pub const STARTING_HEALTH: i32 = 100;
/// Item healing is refused when it would push health past this value.
pub const HEALING_CAP: i32 = 90;

// Encounter trigger ------------------------------------------------------------
pub(crate) const ENCOUNTER_BASE_CHANCE: i32 = 60;
pub(crate) const ENCOUNTER_WEIGHT_FACTOR: i32 = 2;

// Attack resolution --------------------------------------------------------------
pub(crate) const HIT_BASE_CHANCE: i32 = 80;
pub(crate) const ACCURACY_PER_RANGE: i32 = 2;
pub(crate) const PLAYER_VARIANCE_MIN: i32 = -3;
pub(crate) const PLAYER_VARIANCE_MAX: i32 = 1;
pub(crate) const ENEMY_VARIANCE_MIN: i32 = -1;
pub(crate) const ENEMY_VARIANCE_MAX: i32 = 1;
pub(crate) const COUNTER_DIE_SIDES: i32 = 6;
/// Counter-attack die faces at or below this value miss.
pub(crate) const COUNTER_MISS_FACE: i32 = 1;

// Flee -----------------------------------------------------------------------------
pub(crate) const FLEE_BASE_CHANCE: i32 = 50;
pub(crate) const FLEE_BONUS_STEP: i32 = 10;
pub(crate) const FLEE_BONUS_CAP: i32 = 30;

// Rest and search ----------------------------------------------------------------
pub(crate) const REST_HEAL_MIN: i32 = 1;
pub(crate) const REST_HEAL_MAX: i32 = 3;
pub(crate) const LOOT_CHANCE: i32 = 40;
pub const CORES_REQUIRED: usize = 9;
