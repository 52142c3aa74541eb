use coreseeker_game::{
    Action, ActionResult, Direction, GameData, GameSession, GridPos, Loadout, RngDice,
    SearchOutcome, SearchState, Transcript, constants::CORES_REQUIRED,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::iter;

type Session = GameSession<RngDice<ChaCha20Rng>>;

fn new_session(seed: u64) -> Session {
    let data = GameData::load_default().unwrap();
    let loadout = Loadout {
        name: "Rook".into(),
        weapon: data.weapons[1].weapon.clone(),
        items: vec![
            data.starting_items[1].item.clone(),
            data.starting_items[2].item.clone(),
        ],
    };
    GameSession::new_game(loadout, &data, RngDice::from_seed(seed)).unwrap()
}

fn snapshot(session: &Session) -> Vec<(SearchState, bool)> {
    session
        .registry()
        .iter()
        .map(|(_, tile)| (tile.search, tile.has_combat))
        .collect()
}

fn transitions_are_monotone(before: &[(SearchState, bool)], after: &[(SearchState, bool)]) -> bool {
    before.iter().zip(after).all(|(old, new)| {
        let search_ok = new.0 == old.0 || new.0 == old.0.after_search();
        let combat_ok = old.1 || !new.1;
        search_ok && combat_ok
    })
}

#[test]
fn random_walks_keep_tile_state_monotone() {
    for seed in 0..25 {
        let mut session = new_session(seed);
        let mut chooser = ChaCha20Rng::seed_from_u64(seed ^ 0xC0FE);

        for _ in 0..80 {
            if session.status() != ActionResult::Survived {
                break;
            }
            let before = snapshot(&session);
            let mut frontend = Transcript::new(iter::repeat_n("1", 2_000));
            match chooser.gen_range(0..4) {
                0 => {
                    let direction = Direction::ALL[chooser.gen_range(0..4)];
                    session.navigate(direction, &mut frontend).unwrap();
                }
                1 => {
                    session.search(&mut frontend);
                }
                2 => {
                    session.rest(&mut frontend);
                }
                _ => {
                    let mut frontend = Transcript::new(["1", "0"]);
                    session.use_item(&mut frontend).unwrap();
                }
            }
            let after = snapshot(&session);
            assert!(transitions_are_monotone(&before, &after), "seed {seed}");
            assert_eq!(
                session.player().story_item_count() + session.story_pool().len(),
                CORES_REQUIRED,
                "seed {seed}"
            );
            assert!(!session.player().fighting);
        }
    }
}

#[test]
fn story_tile_searched_twice_gives_one_core() {
    let mut session = new_session(3);
    let mut frontend = Transcript::default();
    assert!(matches!(
        session.search(&mut frontend),
        SearchOutcome::FoundStory(_)
    ));
    assert_eq!(
        session.registry().search_state(GridPos::from_index(0).unwrap()),
        SearchState::SearchedStory
    );
    frontend.clear_output();

    assert!(matches!(
        session.search(&mut frontend),
        SearchOutcome::AlreadySearched(SearchState::SearchedStory)
    ));
    assert_eq!(session.player().story_item_count(), 1);
    assert!(frontend.output().contains("nuclear core"));
}

#[test]
fn scientist_counts_missing_cores() {
    let mut session = new_session(11);
    for n in 1..CORES_REQUIRED {
        session
            .player_mut()
            .add_item(coreseeker_game::Item::story(format!("Core {n}")));
    }
    session
        .registry_mut()
        .clear_combat(GridPos::from_index(2).unwrap());
    let mut frontend = Transcript::default();
    for _ in 0..4 {
        session.navigate(Direction::Right, &mut frontend).unwrap();
    }

    let outcome = session.search(&mut frontend);
    assert_eq!(outcome, SearchOutcome::Npc { held: 8, missing: 1 });
    assert!(frontend.output().contains("1 nuclear core."));
    assert_eq!(session.status(), ActionResult::Survived);

    session
        .player_mut()
        .add_item(coreseeker_game::Item::story("Core 9"));
    let mut frontend = Transcript::default();
    let result = session.apply_action(Action::Search, &mut frontend).unwrap();
    assert_eq!(result, ActionResult::GameEnding);
    assert!(
        !frontend.output().contains("waiting for you"),
        "the introduction only plays once"
    );
}

#[test]
fn view_maps_shows_both_grids() {
    let session = new_session(5);
    let mut frontend = Transcript::default();
    session.view_maps(&mut frontend);
    let first_row = frontend.output().lines().nth(1).unwrap();
    assert!(first_row.starts_with("| P | O | - | - | - |"));
    assert!(first_row.ends_with("| X |   |   | X | X |"));
}
