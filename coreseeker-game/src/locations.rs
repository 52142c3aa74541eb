//! The 5×5 map: static tile metadata plus the per-tile flags the game mutates.
use serde::{Deserialize, Serialize};

use crate::constants::{GRID_SIZE, TILE_COUNT};
use crate::error::GameError;

const DEFAULT_LOCATIONS: &str = include_str!("../assets/locations.json");

/// What searching a tile yields, and whether it already has been searched.
///
/// Transitions only go forward: `Lootable -> SearchedEmpty`,
/// `StoryItem -> SearchedStory`. Every other state is a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    Empty,
    Lootable,
    StoryItem,
    Npc,
    SearchedStory,
    SearchedEmpty,
}

impl SearchState {
    /// Numeric tag used by the classic map legend.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Lootable => 1,
            Self::StoryItem => 2,
            Self::Npc => 3,
            Self::SearchedStory => 8,
            Self::SearchedEmpty => 9,
        }
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Lootable),
            2 => Some(Self::StoryItem),
            3 => Some(Self::Npc),
            8 => Some(Self::SearchedStory),
            9 => Some(Self::SearchedEmpty),
            _ => None,
        }
    }

    /// State a tile moves to once searched.
    #[must_use]
    pub const fn after_search(self) -> Self {
        match self {
            Self::Lootable => Self::SearchedEmpty,
            Self::StoryItem => Self::SearchedStory,
            other => other,
        }
    }
}

/// A cell on the grid. Always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    row: usize,
    col: usize,
}

impl GridPos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < GRID_SIZE && col < GRID_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Position of a row-major tile index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        Self::new(index / GRID_SIZE, index % GRID_SIZE)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.row * GRID_SIZE + self.col
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Neighbouring cell, or `None` when the step leaves the grid.
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::new(row, col)
    }

    /// True for the four orthogonal neighbours.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub description: String,
    /// Tiles where resting is never possible.
    #[serde(default)]
    pub rest_blocked: bool,
    pub search: SearchState,
    #[serde(default)]
    pub has_combat: bool,
    /// Most enemies a single encounter here can field. Zero means none.
    #[serde(default)]
    pub encounter_pool: u32,
    /// Set once the player has attempted to rest since arriving.
    #[serde(skip)]
    pub rested: bool,
}

impl Location {
    #[must_use]
    pub const fn can_rest(&self) -> bool {
        !self.rest_blocked && !self.rested
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRegistry {
    tiles: Vec<Location>,
}

impl LocationRegistry {
    /// Parse a location table.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or does not hold exactly one
    /// entry per grid cell.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tiles: Vec<Location> = serde_json::from_str(json)?;
        Self::from_tiles(tiles)
    }

    /// # Errors
    ///
    /// Returns an error unless `tiles` has exactly one entry per grid cell.
    pub fn from_tiles(tiles: Vec<Location>) -> Result<Self, GameError> {
        if tiles.len() != TILE_COUNT {
            return Err(GameError::invalid(format!(
                "location table has {} entries, expected {TILE_COUNT}",
                tiles.len()
            )));
        }
        Ok(Self { tiles })
    }

    /// Fresh copy of the shipped map.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset fails validation.
    pub fn load_default() -> Result<Self, GameError> {
        Self::from_json(DEFAULT_LOCATIONS)
    }

    #[must_use]
    pub fn tile(&self, pos: GridPos) -> &Location {
        &self.tiles[pos.index()]
    }

    pub fn tile_mut(&mut self, pos: GridPos) -> &mut Location {
        &mut self.tiles[pos.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Location)> {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(idx, tile)| GridPos::from_index(idx).map(|pos| (pos, tile)))
    }

    #[must_use]
    pub fn search_state(&self, pos: GridPos) -> SearchState {
        self.tile(pos).search
    }

    /// Advance the tile's search state one way; returns the new state.
    pub fn mark_searched(&mut self, pos: GridPos) -> SearchState {
        let tile = self.tile_mut(pos);
        let next = tile.search.after_search();
        if next != tile.search {
            log::debug!(
                "tile {} search {} -> {}",
                pos.index(),
                tile.search.code(),
                next.code()
            );
        }
        tile.search = next;
        next
    }

    /// Combat at this tile is over for good.
    pub fn clear_combat(&mut self, pos: GridPos) {
        self.tile_mut(pos).has_combat = false;
    }

    #[must_use]
    pub fn can_rest(&self, pos: GridPos) -> bool {
        self.tile(pos).can_rest()
    }

    pub fn mark_rested(&mut self, pos: GridPos) {
        self.tile_mut(pos).rested = true;
    }

    /// The player has just entered `pos`; re-arms the one rest per visit.
    pub fn arrive(&mut self, pos: GridPos) {
        self.tile_mut(pos).rested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(index: usize) -> GridPos {
        GridPos::from_index(index).unwrap()
    }

    #[test]
    fn default_map_matches_tables() {
        let registry = LocationRegistry::load_default().unwrap();
        assert_eq!(registry.iter().count(), TILE_COUNT);
        assert_eq!(registry.tile(pos(0)).name, "Main Base");
        assert_eq!(registry.tile(pos(22)).name, "Caves");
        assert_eq!(registry.search_state(pos(4)), SearchState::Npc);
        assert!(registry.tile(pos(2)).rest_blocked);
        assert!(!registry.tile(pos(0)).has_combat);
        assert_eq!(registry.tile(pos(12)).encounter_pool, 3);

        let story_tiles = registry
            .iter()
            .filter(|(_, tile)| tile.search == SearchState::StoryItem)
            .count();
        assert_eq!(story_tiles, crate::constants::CORES_REQUIRED);
    }

    #[test]
    fn search_transitions_are_one_way() {
        let mut registry = LocationRegistry::load_default().unwrap();
        for (index, expected) in [
            (1, SearchState::SearchedEmpty),
            (0, SearchState::SearchedStory),
            (4, SearchState::Npc),
            (2, SearchState::Empty),
        ] {
            assert_eq!(registry.mark_searched(pos(index)), expected);
            assert_eq!(registry.mark_searched(pos(index)), expected);
        }
    }

    #[test]
    fn codes_roundtrip_and_reject_unknown() {
        for code in [0, 1, 2, 3, 8, 9] {
            assert_eq!(SearchState::from_code(code).unwrap().code(), code);
        }
        assert_eq!(SearchState::from_code(5), None);
    }

    #[test]
    fn rest_rearms_on_arrival_but_not_on_river() {
        let mut registry = LocationRegistry::load_default().unwrap();
        assert!(registry.can_rest(pos(0)));
        registry.mark_rested(pos(0));
        assert!(!registry.can_rest(pos(0)));
        registry.arrive(pos(0));
        assert!(registry.can_rest(pos(0)));

        registry.arrive(pos(2));
        assert!(!registry.can_rest(pos(2)));
    }

    #[test]
    fn grid_offsets_stay_in_bounds() {
        let corner = pos(0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, 1), Some(pos(1)));
        assert_eq!(pos(24).offset(1, 0), None);
        assert!(pos(7).is_adjacent(pos(12)));
        assert!(!pos(7).is_adjacent(pos(13)));
    }

    #[test]
    fn rejects_short_tables() {
        let err = LocationRegistry::from_json("[]").unwrap_err();
        assert!(err.to_string().contains("expected 25"));
    }
}
