//! Property-based tests for set validation, enumeration and the board
//!
//! These check the rules against a brute-force reading of the definition
//! and the replenishment invariant across many shuffles.
use proptest::prelude::*;
use set_engine::rules::{all_same_or_all_different, combinations};
use set_engine::{
    count_valid_triples, enumerate_valid_triples, has_valid_triple, is_valid_set,
    is_valid_triple, Board, Card, Deck, EngineConfig, GameRng, ThemeConfiguration,
    ThemeDimension,
};
use std::collections::HashSet;

fn full_deck() -> Vec<Card> {
    Deck::generate(&ThemeConfiguration::default()).cards().to_vec()
}

// Strategy to pick one of the 81 cards
fn card_strategy() -> impl Strategy<Value = Card> {
    (0usize..81).prop_map(|i| full_deck()[i].clone())
}

// Strategy to generate a board of distinct cards
fn board_strategy(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(full_deck(), 0..=max).prop_shuffle()
}

// Reading of the rule straight from the definition: per attribute, the
// number of distinct values among the three is 1 or 3.
fn brute_force_is_set(a: &Card, b: &Card, c: &Card) -> bool {
    fn ok<T: Eq + std::hash::Hash>(values: [T; 3]) -> bool {
        let distinct: HashSet<_> = values.into_iter().collect();
        distinct.len() != 2
    }
    ok([a.shape(), b.shape(), c.shape()])
        && ok([a.color(), b.color(), c.color()])
        && ok([a.fill(), b.fill(), c.fill()])
        && ok([a.count(), b.count(), c.count()])
}

#[test]
fn test_deck_has_81_unique_cards() {
    let cards = full_deck();
    assert_eq!(cards.len(), 81);
    let unique: HashSet<_> = cards.iter().collect();
    assert_eq!(unique.len(), 81);
}

#[test]
fn test_any_two_cards_have_exactly_one_completion() {
    let cards = full_deck();
    for (i, a) in cards.iter().enumerate() {
        for b in &cards[i + 1..] {
            let completions = cards
                .iter()
                .filter(|c| *c != a && *c != b && is_valid_triple(a, b, c))
                .count();
            assert_eq!(completions, 1);
        }
    }
}

#[test]
fn test_custom_theme_deck_has_81_unique_cards() {
    let palette = |v: [&str; 3]| v.map(str::to_string);
    let theme = ThemeConfiguration::new(
        vec![palette(["teal", "coral", "slate"])],
        vec![palette(["star", "moon", "cloud"]), palette(["ring", "bolt", "leaf"])],
    )
    .unwrap();
    let cards = Deck::generate(&theme).cards().to_vec();
    let unique: HashSet<_> = cards.iter().collect();
    assert_eq!(unique.len(), 81);
    assert!(cards.iter().all(|c| ["teal", "coral", "slate"].contains(&c.color())));
    assert!(cards.iter().all(|c| ["star", "moon", "cloud"].contains(&c.shape())));
}

proptest! {
    #[test]
    fn test_every_selected_theme_deals_81_unique_cards(color in 0usize..3, shape in 0usize..3) {
        let mut theme = ThemeConfiguration::default();
        theme.select(ThemeDimension::Color, color).unwrap();
        theme.select(ThemeDimension::Shape, shape).unwrap();

        let cards = Deck::generate(&theme).cards().to_vec();
        let unique: HashSet<_> = cards.iter().collect();
        prop_assert_eq!(cards.len(), 81);
        prop_assert_eq!(unique.len(), 81);
        prop_assert!(cards.iter().all(|c| theme.current_colors().contains(&c.color().to_string())));
        prop_assert!(cards.iter().all(|c| theme.current_shapes().contains(&c.shape().to_string())));
    }

    #[test]
    fn test_validator_matches_definition(
        a in card_strategy(),
        b in card_strategy(),
        c in card_strategy(),
    ) {
        prop_assert_eq!(is_valid_triple(&a, &b, &c), brute_force_is_set(&a, &b, &c));
    }

    #[test]
    fn test_validator_is_symmetric(
        a in card_strategy(),
        b in card_strategy(),
        c in card_strategy(),
    ) {
        let v = is_valid_triple(&a, &b, &c);
        prop_assert_eq!(v, is_valid_triple(&a, &c, &b));
        prop_assert_eq!(v, is_valid_triple(&b, &a, &c));
        prop_assert_eq!(v, is_valid_triple(&b, &c, &a));
        prop_assert_eq!(v, is_valid_triple(&c, &a, &b));
        prop_assert_eq!(v, is_valid_triple(&c, &b, &a));
    }

    #[test]
    fn test_same_or_different(x in 0u8..3, y in 0u8..3, z in 0u8..3) {
        let distinct: HashSet<_> = [x, y, z].into_iter().collect();
        prop_assert_eq!(all_same_or_all_different(x, y, z), distinct.len() != 2);
    }

    #[test]
    fn test_is_valid_set_needs_three(cards in prop::collection::vec(card_strategy(), 0..6)) {
        if cards.len() != 3 {
            prop_assert!(!is_valid_set(&cards));
        } else {
            prop_assert_eq!(is_valid_set(&cards), is_valid_triple(&cards[0], &cards[1], &cards[2]));
        }
    }

    #[test]
    fn test_enumeration_matches_filter(board in board_strategy(21)) {
        let expected: Vec<[usize; 3]> = combinations(board.len())
            .filter(|&[i, j, k]| brute_force_is_set(&board[i], &board[j], &board[k]))
            .collect();
        let found: Vec<[usize; 3]> = enumerate_valid_triples(&board)
            .into_iter()
            .map(|t| t.positions)
            .collect();

        prop_assert_eq!(&found, &expected);
        prop_assert_eq!(count_valid_triples(&board), expected.len());
        prop_assert_eq!(has_valid_triple(&board), !expected.is_empty());
    }

    #[test]
    fn test_enumerated_cards_match_positions(board in board_strategy(15)) {
        for triple in enumerate_valid_triples(&board) {
            let [i, j, k] = triple.positions;
            prop_assert!(i < j && j < k);
            prop_assert_eq!(&triple.cards[0], &board[i]);
            prop_assert_eq!(&triple.cards[1], &board[j]);
            prop_assert_eq!(&triple.cards[2], &board[k]);
        }
    }

    #[test]
    fn test_board_invariant_holds_through_play(seed in any::<u64>()) {
        let config = EngineConfig::default();
        let mut deck = Deck::generate(&ThemeConfiguration::default());
        deck.shuffle(&mut GameRng::new(seed));
        let mut board = Board::new(deck);
        board.ensure_playable(&config);

        let mut seen: HashSet<Card> = board.visible().iter().cloned().collect();
        while let Some(set) = enumerate_valid_triples(board.visible()).into_iter().next() {
            if board.remaining() > 0 {
                prop_assert!(board.visible().len() >= config.min_board_size);
            }
            let positions = set_engine::ClaimRequest::from(set.positions)
                .validate(board.visible().len())
                .unwrap();
            board.remove_positions(positions).unwrap();
            board.ensure_playable(&config);
            for card in board.visible() {
                seen.insert(card.clone());
            }
            if board.remaining() > 0 {
                prop_assert!(has_valid_triple(board.visible()));
            }
        }

        prop_assert!(board.is_complete());
        prop_assert_eq!(seen.len(), 81);
    }

    #[test]
    fn test_shuffle_is_a_permutation(seed in any::<u64>()) {
        let mut deck = Deck::generate(&ThemeConfiguration::default());
        deck.shuffle(&mut GameRng::new(seed));
        let shuffled: HashSet<_> = deck.cards().iter().cloned().collect();
        let original: HashSet<_> = full_deck().into_iter().collect();
        prop_assert_eq!(shuffled, original);
    }

    #[test]
    fn test_theme_remap_preserves_set_structure(
        seed in any::<u64>(),
        color in 0usize..3,
        shape in 0usize..3,
    ) {
        let mut deck = Deck::generate(&ThemeConfiguration::default());
        deck.shuffle(&mut GameRng::new(seed));
        let mut board = Board::new(deck);
        board.ensure_playable(&EngineConfig::default());
        let before: Vec<_> = enumerate_valid_triples(board.visible())
            .into_iter()
            .map(|t| t.positions)
            .collect();

        let mut theme = ThemeConfiguration::default();
        let mut cards = board.visible().to_vec();
        let remap = theme.select(ThemeDimension::Color, color).unwrap();
        remap.apply_all(cards.iter_mut());
        let remap = theme.select(ThemeDimension::Shape, shape).unwrap();
        remap.apply_all(cards.iter_mut());

        let after: Vec<_> = enumerate_valid_triples(&cards)
            .into_iter()
            .map(|t| t.positions)
            .collect();
        prop_assert_eq!(before, after);
        prop_assert!(cards.iter().all(|c| theme.current_colors().contains(&c.color().to_string())));
    }
}
