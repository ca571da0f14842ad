//! The 81-card deck and its deal cursor.
//!
//! Contents are fixed at generation; only their order changes. Cards are
//! dealt by advancing a cursor, which never moves backwards.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::theme::ThemeConfiguration;
use crate::core::GameRng;

/// Ordered deck with a next-deal cursor.
///
/// ## Example
///
/// ```
/// use set_engine::cards::{Deck, ThemeConfiguration};
/// use set_engine::core::GameRng;
///
/// let mut deck = Deck::generate(&ThemeConfiguration::default());
/// deck.shuffle(&mut GameRng::new(42));
///
/// assert_eq!(deck.len(), 81);
/// let first = deck.deal_next().unwrap();
/// assert_eq!(deck.remaining(), 80);
/// assert_eq!(deck.cards()[0], first);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// Build the full deck for a theme.
    ///
    /// Nested order: shape (outer), color, fill, count (inner). Deterministic
    /// for a given theme; the cursor starts at 0.
    #[must_use]
    pub fn generate(theme: &ThemeConfiguration) -> Self {
        let mut cards = Vec::with_capacity(81);
        for shape in theme.current_shapes() {
            for color in theme.current_colors() {
                for fill in theme.fill_types() {
                    for count in theme.counts() {
                        cards.push(Card::new(shape.as_str(), color.as_str(), fill.as_str(), count));
                    }
                }
            }
        }
        Self { cards, next: 0 }
    }

    /// Build a deck from an explicit card order.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, next: 0 }
    }

    /// Uniformly permute the undealt cards.
    ///
    /// On a fresh deck that is the whole deck.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let start = self.next.min(self.cards.len());
        rng.shuffle(&mut self.cards[start..]);
    }

    /// Deal one card, or `None` once the deck is exhausted.
    pub fn deal_next(&mut self) -> Option<Card> {
        let card = self.cards.get(self.next)?.clone();
        self.next += 1;
        Some(card)
    }

    /// Deal up to `count` cards; fewer if the deck runs out.
    pub fn deal(&mut self, count: usize) -> Vec<Card> {
        std::iter::from_fn(|| self.deal_next()).take(count).collect()
    }

    /// Total cards, dealt or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards not yet dealt.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.next)
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Position of the next card to deal.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.next
    }

    /// Every card in deck order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }
}
