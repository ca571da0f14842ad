//! Single-player session.

use log::debug;
use serde::{Deserialize, Serialize};

use super::view::{format_elapsed, status_message, SoloView};
use super::ClaimResult;
use crate::cards::{ThemeConfiguration, ThemeDimension};
use crate::core::{EngineConfig, GameRng, SessionCore, ThemeError};
use crate::rules::{ClaimRequest, Triple};

/// Message shown when a solo game runs out of sets.
pub const SOLO_END_MESSAGE: &str = "No more sets available! Game completed!";

/// A solo game: one board, one score.
///
/// ## Example
///
/// ```
/// use set_engine::core::{EngineConfig, GameRng};
/// use set_engine::games::SoloSession;
///
/// let mut session = SoloSession::new(None, EngineConfig::default(), &mut GameRng::new(42));
/// let set = session.hint().unwrap();
///
/// let result = session.attempt_claim(set.positions, "Ada");
/// assert!(result.accepted);
/// assert_eq!(session.score(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoloSession {
    core: SessionCore,
    score: u32,
    current_player_index: u32,
}

impl SoloSession {
    /// Start a game. `theme` is copied; `None` uses the stock theme.
    pub fn new(
        theme: Option<&ThemeConfiguration>,
        config: EngineConfig,
        rng: &mut GameRng,
    ) -> Self {
        let theme = theme.cloned().unwrap_or_default();
        Self {
            core: SessionCore::new(theme, config, rng),
            score: 0,
            current_player_index: 1,
        }
    }

    #[must_use]
    pub fn core(&self) -> &SessionCore {
        &self.core
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_player_index(&self) -> u32 {
        self.current_player_index
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.core.is_complete()
    }

    #[must_use]
    pub fn hint(&self) -> Option<Triple> {
        self.core.hint()
    }

    /// Claim three visible positions.
    ///
    /// A blank `player_name` is logged as `"Player {index}"`.
    pub fn attempt_claim(
        &mut self,
        request: impl Into<ClaimRequest>,
        player_name: &str,
    ) -> ClaimResult {
        let request = request.into();
        let name = if player_name.trim().is_empty() {
            format!("Player {}", self.current_player_index)
        } else {
            player_name.to_string()
        };

        match self.core.take_set(&request, self.current_player_index, &name) {
            Ok(cards) => {
                self.score += 1;
                ClaimResult::accepted("Valid set found!".to_string(), cards, self.score)
            }
            Err(rejection) => {
                debug!("Solo claim {:?} rejected: {}", request.positions(), rejection.error);
                let message = rejection.error.to_string();
                ClaimResult::rejected(message, rejection, self.score)
            }
        }
    }

    /// Switch a palette. See [`SessionCore::change_theme`].
    pub fn change_theme(
        &mut self,
        dimension: ThemeDimension,
        index: usize,
    ) -> Result<usize, ThemeError> {
        self.core.change_theme(dimension, index)
    }

    /// Switch a palette by dimension name; unknown names do nothing.
    pub fn change_theme_named(
        &mut self,
        dimension: &str,
        index: usize,
    ) -> Result<usize, ThemeError> {
        self.core.change_theme_named(dimension, index)
    }

    /// Add a message to the log.
    pub fn post_message(&mut self, player_name: &str, text: &str) {
        self.core.post_message(self.current_player_index, player_name, text);
    }

    /// Snapshot for rendering. A blank name shows as the configured default.
    #[must_use]
    pub fn view(&self, player_name: &str) -> SoloView {
        let available_sets = self.core.available_sets();
        let is_complete = self.core.is_complete();
        let elapsed = self.core.elapsed();
        let player_name = if player_name.trim().is_empty() {
            self.core.config().default_player_name.clone()
        } else {
            player_name.to_string()
        };

        SoloView {
            game_id: self.core.game_id(),
            visible_cards: self.core.visible().to_vec(),
            log: self.core.log_newest_first(),
            current_player_index: self.current_player_index,
            player_name,
            score: self.score,
            elapsed,
            formatted_time: format_elapsed(elapsed),
            remaining_cards: self.core.remaining(),
            available_sets,
            status_message: status_message(available_sets),
            is_complete,
            end_message: if is_complete {
                SOLO_END_MESSAGE.to_string()
            } else {
                String::new()
            },
            theme: self.core.theme().clone(),
        }
    }
}
