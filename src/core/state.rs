//! Session state shared by solo and multiplayer games.
//!
//! ## SessionCore
//!
//! Everything a game needs regardless of how many people play it:
//! - Game identity and start time
//! - Board (deck + visible cards)
//! - Event log
//! - Theme and engine configuration
//!
//! Variants wrap a `SessionCore` and add scoring on top. All mutation goes
//! through `&mut self`; concurrent access is the store's business.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

use super::config::EngineConfig;
use super::error::{ClaimError, ThemeError};
use super::event_log::{EventLog, LogEntry};
use super::rng::GameRng;
use crate::cards::{Card, Deck, ThemeConfiguration, ThemeDimension};
use crate::rules::{
    count_valid_triples, enumerate_valid_triples, hint, is_valid_triple, ClaimRequest, Triple,
};
use crate::zones::{Board, BoardPhase};

/// A rejected claim, with whatever cards the claimant had picked.
///
/// `cards` is empty when the positions themselves were bad.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimRejection {
    pub error: ClaimError,
    pub cards: Vec<Card>,
}

impl From<ClaimError> for ClaimRejection {
    fn from(error: ClaimError) -> Self {
        Self {
            error,
            cards: Vec::new(),
        }
    }
}

/// State common to every session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCore {
    // === Identity ===
    game_id: Uuid,
    start_time: DateTime<Utc>,

    // === Play ===
    board: Board,
    log: EventLog,

    // === Configuration ===
    theme: ThemeConfiguration,
    config: EngineConfig,
}

impl SessionCore {
    /// Build the deck for `theme`, shuffle it, and deal a playable board.
    pub fn new(theme: ThemeConfiguration, config: EngineConfig, rng: &mut GameRng) -> Self {
        let game_id = Builder::from_random_bytes(rng.bytes16()).into_uuid();

        let mut deck = Deck::generate(&theme);
        deck.shuffle(rng);
        let mut board = Board::new(deck);
        let dealt = board.ensure_playable(&config);

        info!("Created game {} with {} cards on the board", game_id, dealt);

        Self {
            game_id,
            start_time: Utc::now(),
            board,
            log: EventLog::new(),
            theme,
            config,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    #[must_use]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cards in play, in position order.
    #[must_use]
    pub fn visible(&self) -> &[Card] {
        self.board.visible()
    }

    /// Undealt cards.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.board.remaining()
    }

    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Log entries for display, newest first.
    #[must_use]
    pub fn log_newest_first(&self) -> Vec<LogEntry> {
        self.log.newest_first().into_iter().cloned().collect()
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeConfiguration {
        &self.theme
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Derived ===

    /// Time since the session started, never negative.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Utc::now())
    }

    #[must_use]
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.start_time).max(Duration::zero())
    }

    /// Number of valid sets on the board.
    #[must_use]
    pub fn available_sets(&self) -> usize {
        count_valid_triples(self.board.visible())
    }

    /// Every valid set on the board.
    #[must_use]
    pub fn valid_sets(&self) -> Vec<Triple> {
        enumerate_valid_triples(self.board.visible())
    }

    /// One valid set, if any.
    #[must_use]
    pub fn hint(&self) -> Option<Triple> {
        hint(self.board.visible())
    }

    #[must_use]
    pub fn phase(&self) -> BoardPhase {
        self.board.phase(self.config.min_board_size)
    }

    /// Deck exhausted and no set left.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.board.is_complete()
    }

    // === Mutation ===

    /// Check a claim and, if it is a set, take it off the board.
    ///
    /// On success the set is logged under `claimant`, the three cards are
    /// removed and the board is replenished. On failure nothing changes.
    pub fn take_set(
        &mut self,
        request: &ClaimRequest,
        claimant: u32,
        claimant_name: &str,
    ) -> Result<[Card; 3], ClaimRejection> {
        let positions = request.validate(self.board.visible().len())?;
        let cards = self.board.cards_at(positions)?;

        let [a, b, c] = &cards;
        if !is_valid_triple(a, b, c) {
            return Err(ClaimRejection {
                error: ClaimError::NotASet,
                cards: cards.to_vec(),
            });
        }

        self.log
            .record_set(claimant, claimant_name, cards.clone(), Utc::now());
        self.board.remove_positions(positions)?;
        self.board.ensure_playable(&self.config);

        debug!(
            "Game {}: {} took a set, {} visible, {} remaining",
            self.game_id,
            claimant_name,
            self.board.visible().len(),
            self.board.remaining()
        );
        Ok(cards)
    }

    /// Append a free-text message to the log.
    pub fn post_message(&mut self, player: u32, player_name: &str, text: &str) {
        self.log.record_message(player, player_name, text, Utc::now());
    }

    /// Switch a palette and rewrite every card to match.
    ///
    /// Deck, board and logged sets are all remapped by palette position.
    /// Returns how many cards changed, counting each of the 81 once whether
    /// it is undealt, on the board or in a logged set.
    pub fn change_theme(
        &mut self,
        dimension: ThemeDimension,
        index: usize,
    ) -> Result<usize, ThemeError> {
        let remap = self.theme.select(dimension, index)?;
        if remap.is_identity() {
            return Ok(0);
        }

        let changed = self.board.apply_remap(&remap) + self.log.apply_remap(&remap);
        info!(
            "Game {}: {} palette set to {}, {} cards rewritten",
            self.game_id, dimension, index, changed
        );
        Ok(changed)
    }

    /// `change_theme` keyed by dimension name. Unknown names are a no-op.
    pub fn change_theme_named(
        &mut self,
        dimension: &str,
        index: usize,
    ) -> Result<usize, ThemeError> {
        match dimension.parse::<ThemeDimension>() {
            Ok(dimension) => self.change_theme(dimension, index),
            Err(_) => {
                debug!("Ignoring theme change for unknown dimension {:?}", dimension);
                Ok(0)
            }
        }
    }
}
