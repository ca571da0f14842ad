//! Solo game tests.
//!
//! These drive a `SoloSession` through whole games and check the board
//! invariants, scoring and theme changes end to end.

use set_engine::core::ClaimError;
use set_engine::rules::combinations;
use set_engine::{
    has_valid_triple, is_valid_triple, EngineConfig, GameRng, LogEntry, SoloSession,
    ThemeConfiguration, ThemeDimension,
};

fn new_game(seed: u64) -> SoloSession {
    SoloSession::new(None, EngineConfig::default(), &mut GameRng::new(seed))
}

/// A fresh game deals at least 12 cards and always shows a set.
#[test]
fn test_fresh_game_is_playable() {
    for seed in 0..20 {
        let game = new_game(seed);
        let core = game.core();
        assert!(core.visible().len() >= 12, "seed {}", seed);
        assert_eq!(core.visible().len() % 3, 0);
        assert_eq!(core.visible().len() + core.remaining(), 81);
        assert!(has_valid_triple(core.visible()), "seed {}", seed);
    }
}

/// Playing every hint to the end empties the deck and scores every claim.
#[test]
fn test_play_to_completion() {
    let mut game = new_game(2024);
    let mut claims = 0;

    while let Some(set) = game.hint() {
        let before = game.core().visible().len() + game.core().remaining();
        let result = game.attempt_claim(set.positions, "Ada");
        assert!(result.accepted);
        claims += 1;

        let core = game.core();
        assert_eq!(core.visible().len() + core.remaining(), before - 3);
        if core.remaining() > 0 {
            assert!(core.visible().len() >= 12);
            assert!(has_valid_triple(core.visible()));
        }
    }

    assert!(game.is_complete());
    assert_eq!(game.score(), claims);
    assert_eq!(game.core().log().len() as u32, claims);
    assert!(claims >= 20);

    let view = game.view("Ada");
    assert!(view.is_complete);
    assert_eq!(view.end_message, "No more sets available! Game completed!");
    assert_eq!(view.status_message, "Status: No sets can be found.");
    assert_eq!(view.remaining_cards, 0);
}

/// A rejected claim leaves the whole session untouched.
#[test]
fn test_rejected_claims_do_not_mutate() {
    let mut game = new_game(5);
    let before = game.clone();

    let visible = game.core().visible().to_vec();
    let bad = combinations(visible.len())
        .find(|&[i, j, k]| !is_valid_triple(&visible[i], &visible[j], &visible[k]))
        .unwrap();

    let result = game.attempt_claim(bad, "Ada");
    assert_eq!(result.message, "Not a valid set");
    assert_eq!(result.cards.len(), 3);
    assert_eq!(game, before);

    let result = game.attempt_claim(vec![0i64, 1, 2, 3], "Ada");
    assert_eq!(result.error, Some(ClaimError::WrongCardCount { expected: 3, got: 4 }));
    let result = game.attempt_claim(vec![4i64, 4, 5], "Ada");
    assert_eq!(result.error, Some(ClaimError::DuplicatePosition(4)));
    let result = game.attempt_claim(Vec::<i64>::new(), "Ada");
    assert_eq!(result.message, "Must select exactly 3 cards");

    assert_eq!(game, before);
}

/// Claimed cards are removed by position; the rest keep their order.
#[test]
fn test_claim_preserves_order_of_survivors() {
    let mut game = new_game(8);
    let set = game.hint().unwrap();
    let before = game.core().visible().to_vec();

    game.attempt_claim(set.positions, "Ada");

    let survivors: Vec<_> = before
        .iter()
        .enumerate()
        .filter(|(i, _)| !set.positions.contains(i))
        .map(|(_, c)| c.clone())
        .collect();
    let after = game.core().visible();
    assert_eq!(&after[..survivors.len()], survivors.as_slice());
}

/// Same seed, same game.
#[test]
fn test_seeded_games_replay() {
    let mut a = new_game(77);
    let mut b = new_game(77);
    while let Some(set) = a.hint() {
        a.attempt_claim(set.positions, "A");
        b.attempt_claim(set.positions, "A");
        assert_eq!(a.core().visible(), b.core().visible());
    }
    assert!(b.is_complete());
}

/// Changing a palette mid-game rewrites every card, including logged ones.
#[test]
fn test_theme_change_mid_game() {
    let mut game = new_game(31);
    let set = game.hint().unwrap();
    game.attempt_claim(set.positions, "Ada");
    let fills_before: Vec<_> = game.core().visible().iter().map(|c| c.fill().to_string()).collect();

    let changed = game.change_theme(ThemeDimension::Color, 1).unwrap();
    assert_eq!(changed, 81);

    let palette = game.core().theme().current_colors().clone();
    let log_cards: Vec<_> = game.core().log().iter().flat_map(|e| e.cards().to_vec()).collect();
    assert!(game
        .core()
        .visible()
        .iter()
        .chain(log_cards.iter())
        .all(|c| palette.contains(&c.color().to_string())));

    // Only the color changed; everything else stays put.
    let fills_after: Vec<_> = game.core().visible().iter().map(|c| c.fill().to_string()).collect();
    assert_eq!(fills_before, fills_after);
    assert!(game.hint().is_some());
}

/// The red/purple/green example from the rules: positional remap.
#[test]
fn test_positional_color_remap() {
    let theme = ThemeConfiguration::new(
        vec![
            ["red".into(), "purple".into(), "green".into()],
            ["blue".into(), "yellow".into(), "green".into()],
        ],
        vec![["oval".into(), "diamond".into(), "squiggle".into()]],
    )
    .unwrap();
    let mut game = SoloSession::new(Some(&theme), EngineConfig::default(), &mut GameRng::new(4));
    let old: Vec<_> = game.core().visible().iter().map(|c| c.color().to_string()).collect();

    game.change_theme_named("color", 1).unwrap();

    let new: Vec<_> = game.core().visible().iter().map(|c| c.color().to_string()).collect();
    for (o, n) in old.iter().zip(&new) {
        let expected = match o.as_str() {
            "red" => "blue",
            "purple" => "yellow",
            _ => "green",
        };
        assert_eq!(n, expected);
    }
}

/// Unknown dimension names and repeated selections change nothing.
#[test]
fn test_theme_noops() {
    let mut game = new_game(3);
    let before = game.clone();
    assert_eq!(game.change_theme_named("fill", 2).unwrap(), 0);
    assert_eq!(game.change_theme(ThemeDimension::Color, 0).unwrap(), 0);
    assert!(game.change_theme(ThemeDimension::Shape, 3).is_err());
    assert_eq!(game, before);
}

/// The log lists newest entries first.
#[test]
fn test_view_log_order() {
    let mut game = new_game(12);
    let set = game.hint().unwrap();
    game.attempt_claim(set.positions, "Ada");
    std::thread::sleep(std::time::Duration::from_millis(5));
    game.post_message("Ada", "that was easy");

    let view = game.view("Ada");
    assert_eq!(view.log.len(), 2);
    assert!(matches!(&view.log[0], LogEntry::Message { text, .. } if text == "that was easy"));
    assert!(matches!(view.log[1], LogEntry::Set { .. }));
    assert_eq!(view.score, 1);
    assert_eq!(view.current_player_index, 1);
}
