//! Multiplayer session: a shared board, a roster, and a host.
//!
//! ## Lifecycle
//!
//! 1. Created by the host, who joins immediately
//! 2. Lobby: players join, leave and mark themselves ready
//! 3. The host starts the game once enough players are present
//! 4. Play: any roster member may claim; a valid set scores one point
//! 5. Completed: deck exhausted and no set left; the winner is fixed
//!
//! Claims are not gated on step 3; a room that is never started still
//! plays by the same rules.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::view::{format_elapsed, status_message, MultiplayerView, WaitingRoomView};
use super::ClaimResult;
use crate::cards::{ThemeConfiguration, ThemeDimension};
use crate::core::{
    ClaimError, EngineConfig, GameRng, Player, PlayerId, Roster, RosterError, SessionCore,
    ThemeError,
};
use crate::rules::ClaimRequest;

/// Message shown when a multiplayer game ends.
pub const MULTIPLAYER_END_MESSAGE: &str = "Game Over! All sets found!";

/// A multiplayer game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplayerSession {
    core: SessionCore,
    room_code: String,
    roster: Roster,
    started: bool,
    completed: bool,
    winner_id: Option<PlayerId>,
    created_at: DateTime<Utc>,
}

impl MultiplayerSession {
    /// Create a room with the stock theme and seat the host.
    ///
    /// The room code is empty until the store assigns one.
    pub fn new(
        host_id: PlayerId,
        host_name: &str,
        config: EngineConfig,
        rng: &mut GameRng,
    ) -> Self {
        let core = SessionCore::new(ThemeConfiguration::default(), config, rng);
        let mut roster = Roster::with_host(host_id.clone());
        roster.add(
            Player::new(host_id, host_name),
            &core.config().default_player_name,
        );

        Self {
            core,
            room_code: String::new(),
            roster,
            started: false,
            completed: false,
            winner_id: None,
            created_at: Utc::now(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn core(&self) -> &SessionCore {
        &self.core
    }

    #[must_use]
    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    pub fn set_room_code(&mut self, code: impl Into<String>) {
        self.room_code = code.into();
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Backdate or postdate creation; used by cleanup and its tests.
    pub fn set_created_at(&mut self, created_at: DateTime<Utc>) {
        self.created_at = created_at;
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.roster.get(id)
    }

    #[must_use]
    pub fn host(&self) -> Option<&Player> {
        self.roster.host()
    }

    #[must_use]
    pub fn is_host(&self, id: &PlayerId) -> bool {
        self.roster.is_host(id)
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn winner_id(&self) -> Option<&PlayerId> {
        self.winner_id.as_ref()
    }

    /// The winner; only set once the game is complete.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.winner_id.as_ref().and_then(|id| self.roster.get(id))
    }

    /// Players by descending score, ties in join order.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<&Player> {
        self.roster.leaderboard()
    }

    // === Lobby ===

    /// Join, or rename if already joined. Returns the 0-based roster position.
    pub fn add_player(&mut self, player: Player) -> usize {
        let id = player.id.clone();
        let pos = self
            .roster
            .add(player, &self.core.config().default_player_name);
        debug!("Room {}: {} at seat {}", self.room_code, id, pos + 1);
        pos
    }

    /// Leave the room. Returns the removed player.
    pub fn remove_player(&mut self, id: &PlayerId) -> Option<Player> {
        let removed = self.roster.remove(id);
        if removed.is_some() {
            debug!("Room {}: {} left", self.room_code, id);
        }
        removed
    }

    pub fn set_ready(&mut self, id: &PlayerId, ready: bool) -> Result<(), RosterError> {
        self.roster.set_ready(id, ready)
    }

    /// More than one player and all of them ready.
    #[must_use]
    pub fn all_players_ready(&self) -> bool {
        self.roster.all_ready()
    }

    /// `requester` is host and enough players have joined.
    #[must_use]
    pub fn can_start(&self, requester: &PlayerId) -> bool {
        self.is_host(requester) && self.roster.len() >= self.core.config().min_players_to_start
    }

    /// Start the game. Only the host may, and only once.
    pub fn start(&mut self, requester: &PlayerId) -> Result<(), RosterError> {
        if !self.is_host(requester) {
            return Err(RosterError::NotHost(requester.to_string()));
        }
        if self.started {
            return Err(RosterError::AlreadyStarted);
        }
        let required = self.core.config().min_players_to_start;
        if self.roster.len() < required {
            return Err(RosterError::NotEnoughPlayers {
                required,
                actual: self.roster.len(),
            });
        }

        self.started = true;
        info!("Room {} started with {} players", self.room_code, self.roster.len());
        Ok(())
    }

    // === Play ===

    /// Claim three positions on behalf of `player_id`.
    pub fn attempt_claim(
        &mut self,
        player_id: &PlayerId,
        request: impl Into<ClaimRequest>,
    ) -> ClaimResult {
        let request = request.into();

        let seat = (self.roster.position(player_id), self.roster.get(player_id));
        let (Some(pos), Some(player)) = seat else {
            let error = ClaimError::PlayerNotFound(player_id.to_string());
            return ClaimResult::rejected(error.to_string(), error.into(), 0);
        };
        let (name, score) = (player.name.clone(), player.score);

        if self.completed {
            return ClaimResult::rejected(
                ClaimError::GameCompleted.to_string(),
                ClaimError::GameCompleted.into(),
                score,
            );
        }

        let claimant = u32::try_from(pos + 1).unwrap_or(u32::MAX);
        match self.core.take_set(&request, claimant, &name) {
            Ok(cards) => {
                let score = self.award_point(player_id);
                self.check_completion();
                ClaimResult::accepted(format!("{} found a valid set! +1 point", name), cards, score)
            }
            Err(rejection) => {
                debug!("Room {}: claim by {} rejected: {}", self.room_code, name, rejection.error);
                let message = match rejection.error {
                    ClaimError::NotASet => format!("{} - Not a valid set", name),
                    ref other => other.to_string(),
                };
                ClaimResult::rejected(message, rejection, score)
            }
        }
    }

    /// Add a message to the log from a roster member.
    pub fn post_message(&mut self, player_id: &PlayerId, text: &str) -> Result<(), RosterError> {
        let seat = (self.roster.position(player_id), self.roster.get(player_id));
        let (Some(pos), Some(player)) = seat else {
            return Err(RosterError::PlayerNotFound(player_id.to_string()));
        };
        let name = player.name.clone();
        self.core.post_message(u32::try_from(pos + 1).unwrap_or(u32::MAX), &name, text);
        Ok(())
    }

    /// Switch the room's palette. Every seat sees the rewritten cards on
    /// the next snapshot.
    pub fn change_theme(
        &mut self,
        dimension: ThemeDimension,
        index: usize,
    ) -> Result<usize, ThemeError> {
        self.core.change_theme(dimension, index)
    }

    pub fn change_theme_named(
        &mut self,
        dimension: &str,
        index: usize,
    ) -> Result<usize, ThemeError> {
        self.core.change_theme_named(dimension, index)
    }

    fn award_point(&mut self, player_id: &PlayerId) -> u32 {
        match self.roster.get_mut(player_id) {
            Some(player) => {
                player.score += 1;
                player.score
            }
            None => 0,
        }
    }

    fn check_completion(&mut self) {
        if self.completed || !self.core.is_complete() {
            return;
        }
        self.completed = true;
        self.winner_id = self.roster.leader().map(|p| p.id.clone());
        info!(
            "Room {} completed, winner {}",
            self.room_code,
            self.winner_id.as_ref().map_or("none", |id| id.as_str())
        );
    }

    // === Views ===

    /// Snapshot of the game for `viewer`.
    #[must_use]
    pub fn view(&self, viewer: &PlayerId) -> MultiplayerView {
        let available_sets = self.core.available_sets();
        let elapsed = self.core.elapsed();
        let winner = self.winner().cloned();

        MultiplayerView {
            game_id: self.core.game_id(),
            room_code: self.room_code.clone(),
            visible_cards: self.core.visible().to_vec(),
            log: self.core.log_newest_first(),
            current_player_index: self
                .roster
                .position(viewer)
                .map_or(1, |pos| u32::try_from(pos + 1).unwrap_or(u32::MAX)),
            viewer_id: viewer.clone(),
            viewer_name: self.player(viewer).map(|p| p.name.clone()).unwrap_or_default(),
            is_host: self.is_host(viewer),
            elapsed,
            formatted_time: format_elapsed(elapsed),
            remaining_cards: self.core.remaining(),
            available_sets,
            status_message: status_message(available_sets),
            is_started: self.started,
            is_complete: self.completed,
            end_message: if self.completed {
                MULTIPLAYER_END_MESSAGE.to_string()
            } else {
                String::new()
            },
            winner_name: winner.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
            winner,
            leaderboard: self.leaderboard().into_iter().cloned().collect(),
            theme: self.core.theme().clone(),
        }
    }

    /// Lobby snapshot for `viewer`.
    #[must_use]
    pub fn waiting_room(&self, viewer: &PlayerId) -> WaitingRoomView {
        WaitingRoomView {
            room_code: self.room_code.clone(),
            players: self.roster.iter().cloned().collect(),
            viewer_id: viewer.clone(),
            viewer_name: self.player(viewer).map(|p| p.name.clone()).unwrap_or_default(),
            is_host: self.is_host(viewer),
            all_ready: self.all_players_ready(),
            can_start: self.can_start(viewer),
        }
    }
}
