//! Player token on the grid.
//!
//! Moves are one orthogonal step at a time. A move that would leave the grid
//! is refused without changing anything; an accepted move re-arms resting on
//! the destination and reports whether combat is waiting there.

use crate::combat::EncounterOutcome;
use crate::constants::START_TILE;
use crate::error::GameError;
use crate::frontend::{Frontend, Tone, first_char};
use crate::locations::{GridPos, LocationRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];

    /// `W`, `A`, `S` or `D`, any case.
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_uppercase() {
            'W' => Some(Self::Up),
            'A' => Some(Self::Left),
            'S' => Some(Self::Down),
            'D' => Some(Self::Right),
            _ => None,
        }
    }

    /// Row and column delta of one step.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Left => (0, -1),
            Self::Down => (1, 0),
            Self::Right => (0, 1),
        }
    }
}

/// Destination of one step, or `None` at the edge.
#[must_use]
pub fn step(from: GridPos, direction: Direction) -> Option<GridPos> {
    let (d_row, d_col) = direction.delta();
    from.offset(d_row, d_col)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The player backed out of the move prompt.
    Stayed,
    /// The step would have left the grid.
    Blocked,
    Moved {
        to: GridPos,
        /// Result of the encounter fought on arrival, if the tile had one.
        encounter: Option<EncounterOutcome>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub to: GridPos,
    pub combat_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    position: GridPos,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Token on the starting tile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: GridPos::from_index(START_TILE).unwrap_or_default(),
        }
    }

    #[must_use]
    pub const fn at(position: GridPos) -> Self {
        Self { position }
    }

    #[must_use]
    pub const fn position(&self) -> GridPos {
        self.position
    }

    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        step(self.position, direction).is_some()
    }

    pub fn legal_moves(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.can_move(*direction))
    }

    /// Take one step. Returns `None`, leaving everything untouched, at the
    /// grid edge.
    pub fn advance(
        &mut self,
        direction: Direction,
        registry: &mut LocationRegistry,
    ) -> Option<Arrival> {
        let to = step(self.position, direction)?;
        log::debug!(
            "move {direction:?}: tile {} -> {}",
            self.position.index(),
            to.index()
        );
        self.position = to;
        registry.arrive(to);
        Some(Arrival {
            to,
            combat_pending: registry.tile(to).has_combat,
        })
    }

    /// Ask for a direction until a legal one (or `0`) is entered.
    ///
    /// Returns `None` when the player backs out.
    ///
    /// # Errors
    ///
    /// Propagates input failures from the frontend.
    pub fn read_direction(
        &self,
        frontend: &mut dyn Frontend,
    ) -> Result<Option<Direction>, GameError> {
        frontend.line(&[(
            "'W' - Up, 'A' - Left, 'S' - Down, 'D' - Right, '0' - Go Back",
            Tone::Info,
        )]);
        frontend.blank();
        loop {
            let answer = frontend.prompt()?;
            match first_char(&answer) {
                Some('0') => return Ok(None),
                Some(key) => match Direction::from_key(key) {
                    Some(direction) if self.can_move(direction) => return Ok(Some(direction)),
                    _ => frontend.clear_last_lines(1),
                },
                None => frontend.clear_last_lines(1),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::Transcript;

    fn pos(index: usize) -> GridPos {
        GridPos::from_index(index).unwrap()
    }

    #[test]
    fn steps_follow_wasd() {
        assert_eq!(step(pos(12), Direction::Up), Some(pos(7)));
        assert_eq!(step(pos(12), Direction::Left), Some(pos(11)));
        assert_eq!(step(pos(12), Direction::Down), Some(pos(17)));
        assert_eq!(step(pos(12), Direction::Right), Some(pos(13)));
        assert_eq!(step(pos(4), Direction::Right), None);
        assert_eq!(step(pos(20), Direction::Down), None);
    }

    #[test]
    fn corner_has_two_moves() {
        let navigator = Navigator::new();
        let moves: Vec<_> = navigator.legal_moves().collect();
        assert_eq!(moves, vec![Direction::Down, Direction::Right]);
    }

    #[test]
    fn advance_rearms_rest_and_reports_combat() {
        let mut registry = LocationRegistry::load_default().unwrap();
        let mut navigator = Navigator::new();
        registry.mark_rested(pos(1));

        assert_eq!(navigator.advance(Direction::Up, &mut registry), None);
        assert_eq!(navigator.position(), pos(0));

        let arrival = navigator.advance(Direction::Right, &mut registry).unwrap();
        assert_eq!(
            arrival,
            Arrival {
                to: pos(1),
                combat_pending: false
            }
        );
        assert!(registry.can_rest(pos(1)));

        let arrival = navigator.advance(Direction::Right, &mut registry).unwrap();
        assert!(arrival.combat_pending);
    }

    #[test]
    fn read_direction_swallows_illegal_input() {
        let navigator = Navigator::new();
        let mut frontend = Transcript::new(["", "w", "x", "a", "s"]);
        let direction = navigator.read_direction(&mut frontend).unwrap();
        assert_eq!(direction, Some(Direction::Down));
        assert_eq!(frontend.cleared_lines(), 4);
    }

    #[test]
    fn zero_backs_out() {
        let navigator = Navigator::at(pos(12));
        let mut frontend = Transcript::new(["0"]);
        assert_eq!(navigator.read_direction(&mut frontend).unwrap(), None);
    }
}
