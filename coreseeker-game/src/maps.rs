//! Grid maps shown while moving and from the "View Maps" action.

use crate::constants::GRID_SIZE;
use crate::frontend::{Frontend, Span, Tone};
use crate::locations::{GridPos, LocationRegistry, SearchState};

const BORDER: &str = "+---+---+---+---+---+";
const GUTTER: &str = "               ";

/// Lines a single map occupies on screen.
pub const MAP_HEIGHT: usize = GRID_SIZE * 2 + 1;

/// Cell glyph on the position map.
#[must_use]
pub fn position_marker(player: GridPos, cell: GridPos) -> Span<'static> {
    if cell == player {
        ("P ", Tone::Success)
    } else if cell.is_adjacent(player) {
        ("O ", Tone::Highlight)
    } else {
        ("- ", Tone::Danger)
    }
}

/// Cell glyph on the mission map: cores still out there, the scientist, and
/// cores already recovered.
#[must_use]
pub const fn mission_marker(state: SearchState) -> Span<'static> {
    match state {
        SearchState::StoryItem => ("X ", Tone::Danger),
        SearchState::Npc => ("X ", Tone::Info),
        SearchState::SearchedStory => ("X ", Tone::Success),
        _ => ("  ", Tone::Plain),
    }
}

fn render_row(frontend: &mut dyn Frontend, cells: impl Iterator<Item = Span<'static>>) {
    for (glyph, tone) in cells {
        frontend.render("| ", Tone::Plain);
        frontend.render(glyph, tone);
    }
    frontend.render("|", Tone::Plain);
}

fn row_cells(row: usize) -> impl Iterator<Item = GridPos> {
    (0..GRID_SIZE).filter_map(move |col| GridPos::new(row, col))
}

/// Where the player stands and which cells are one step away.
pub fn render_position_map(frontend: &mut dyn Frontend, player: GridPos) {
    for row in 0..GRID_SIZE {
        frontend.say(BORDER);
        render_row(frontend, row_cells(row).map(|cell| position_marker(player, cell)));
        frontend.blank();
    }
    frontend.say(BORDER);
}

/// Core and scientist locations.
pub fn render_mission_map(frontend: &mut dyn Frontend, registry: &LocationRegistry) {
    for row in 0..GRID_SIZE {
        frontend.say(BORDER);
        render_row(
            frontend,
            row_cells(row).map(|cell| mission_marker(registry.search_state(cell))),
        );
        frontend.blank();
    }
    frontend.say(BORDER);
}

/// Position and mission maps side by side.
pub fn render_combined_map(
    frontend: &mut dyn Frontend,
    registry: &LocationRegistry,
    player: GridPos,
) {
    let border = format!("{BORDER}{GUTTER}{BORDER}");
    for row in 0..GRID_SIZE {
        frontend.say(&border);
        render_row(frontend, row_cells(row).map(|cell| position_marker(player, cell)));
        frontend.render(GUTTER, Tone::Plain);
        render_row(
            frontend,
            row_cells(row).map(|cell| mission_marker(registry.search_state(cell))),
        );
        frontend.blank();
    }
    frontend.say(&border);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::Transcript;

    fn pos(index: usize) -> GridPos {
        GridPos::from_index(index).unwrap()
    }

    #[test]
    fn position_map_marks_player_and_neighbours() {
        let mut frontend = Transcript::default();
        render_position_map(&mut frontend, pos(0));
        let lines: Vec<&str> = frontend.output().lines().collect();
        assert_eq!(lines.len(), MAP_HEIGHT);
        assert_eq!(lines[1], "| P | O | - | - | - |");
        assert_eq!(lines[3], "| O | - | - | - | - |");
        assert_eq!(lines[5], "| - | - | - | - | - |");
    }

    #[test]
    fn mission_map_tracks_recovered_cores() {
        let mut registry = LocationRegistry::load_default().unwrap();
        assert_eq!(mission_marker(registry.search_state(pos(0))).1, Tone::Danger);
        registry.mark_searched(pos(0));
        assert_eq!(mission_marker(registry.search_state(pos(0))).1, Tone::Success);
        assert_eq!(mission_marker(registry.search_state(pos(4))).1, Tone::Info);

        let mut frontend = Transcript::default();
        render_mission_map(&mut frontend, &registry);
        let lines: Vec<&str> = frontend.output().lines().collect();
        assert_eq!(lines[1], "| X |   |   | X | X |");
    }

    #[test]
    fn combined_map_puts_both_grids_on_each_line() {
        let registry = LocationRegistry::load_default().unwrap();
        let mut frontend = Transcript::default();
        render_combined_map(&mut frontend, &registry, pos(12));
        let lines: Vec<&str> = frontend.output().lines().collect();
        assert_eq!(lines.len(), MAP_HEIGHT);
        assert_eq!(
            lines[5],
            format!("| - | O | P | O | - |{GUTTER}| X |   |   |   | X |")
        );
    }
}
