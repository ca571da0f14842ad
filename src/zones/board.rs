//! Board state machine: the deck zone and the visible zone.
//!
//! Cards only ever move one way, deck -> visible -> claimed. After every
//! removal the board is replenished so that, while undealt cards remain, it
//! holds at least `min_board_size` cards and at least one valid set.
//!
//! ## Phases
//!
//! - `Dealing`: cards remain and the board is short or has no set
//! - `Playable`: a set is on the board
//! - `Exhausted`: deck empty and no set left; replenishment is over

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck, PaletteRemap};
use crate::core::{ClaimError, EngineConfig};
use crate::rules::{has_valid_triple, ClaimPositions};

/// Where the board is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardPhase {
    Dealing,
    Playable,
    Exhausted,
}

/// The deck plus the cards currently in play.
///
/// Visible cards are addressed by position. Two visible cards can compare
/// equal under a theme with repeated values, so removal is always by
/// position, never by value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    deck: Deck,
    visible: Vec<Card>,
}

impl Board {
    /// A board with nothing dealt yet.
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            visible: Vec::new(),
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Cards in play, in deal order.
    #[must_use]
    pub fn visible(&self) -> &[Card] {
        &self.visible
    }

    /// Undealt cards left in the deck.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Deal one card onto the board.
    ///
    /// `None` means the deck is exhausted; that is a normal end state.
    pub fn deal_next(&mut self) -> Option<&Card> {
        let card = self.deck.deal_next()?;
        self.visible.push(card);
        self.visible.last()
    }

    /// Restore the board invariant.
    ///
    /// 1. Deal singly until the board holds `max(min_board_size, current)` cards.
    /// 2. While no set is visible, deal batches of `replenish_batch` (fewer
    ///    at the end of the deck) until a set appears or the deck runs out.
    ///
    /// Returns the number of cards dealt.
    pub fn ensure_playable(&mut self, config: &EngineConfig) -> usize {
        let target = config.min_board_size.max(self.visible.len());
        let mut dealt = 0;

        while self.visible.len() < target && self.deal_next().is_some() {
            dealt += 1;
        }

        let batch = config.replenish_batch.max(1);
        while !self.deck.is_exhausted() && !has_valid_triple(&self.visible) {
            let cards = self.deck.deal(batch);
            debug!(
                "No set among {} visible cards, dealing {} more",
                self.visible.len(),
                cards.len()
            );
            dealt += cards.len();
            self.visible.extend(cards);
        }

        if dealt > 0 {
            debug!(
                "Dealt {} cards: {} visible, {} remaining",
                dealt,
                self.visible.len(),
                self.deck.remaining()
            );
        }
        dealt
    }

    /// Cards at the given positions, in the given order.
    pub fn cards_at(&self, positions: ClaimPositions) -> Result<[Card; 3], ClaimError> {
        let board_size = self.visible.len();
        let get = |p: usize| {
            self.visible
                .get(p)
                .cloned()
                .ok_or(ClaimError::PositionOutOfRange {
                    position: p as i64,
                    board_size,
                })
        };
        let [a, b, c] = positions.get();
        Ok([get(a)?, get(b)?, get(c)?])
    }

    /// Remove the cards at three positions and return them in given order.
    ///
    /// Removal runs from the highest position down so earlier removals do
    /// not shift the later ones. Other visible cards keep their order.
    pub fn remove_positions(&mut self, positions: ClaimPositions) -> Result<[Card; 3], ClaimError> {
        let cards = self.cards_at(positions)?;
        for p in positions.descending() {
            self.visible.remove(p);
        }
        Ok(cards)
    }

    /// Current lifecycle phase against a minimum board size.
    #[must_use]
    pub fn phase(&self, min_board_size: usize) -> BoardPhase {
        let has_set = has_valid_triple(&self.visible);
        let short = self.visible.len() < min_board_size;
        match (self.deck.is_exhausted(), has_set) {
            (true, false) => BoardPhase::Exhausted,
            (true, true) => BoardPhase::Playable,
            (false, true) if !short => BoardPhase::Playable,
            (false, _) => BoardPhase::Dealing,
        }
    }

    /// No undealt cards and no set left on the board.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.deck.is_exhausted() && !has_valid_triple(&self.visible)
    }

    /// Rewrite deck and visible cards for a palette change.
    ///
    /// Dealt cards stay in the deck list as well as on the board (or in the
    /// log), so only undealt and visible cards are counted.
    pub(crate) fn apply_remap(&mut self, remap: &PaletteRemap) -> usize {
        let cursor = self.deck.cursor();
        let (dealt, undealt) = self.deck.cards_mut().split_at_mut(cursor);
        remap.apply_all(dealt.iter_mut());
        remap.apply_all(undealt.iter_mut()) + remap.apply_all(self.visible.iter_mut())
    }
}
