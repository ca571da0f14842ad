//! Engine configuration.
//!
//! Sessions are created against an `EngineConfig`. The rules of the game
//! never change, but board sizing, room codes and lobby limits are tunable.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Characters room codes are drawn from.
pub const ROOM_CODE_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of cards in a claim. Fixed by the rules.
pub const SET_SIZE: usize = 3;

/// Display name used when a player has not picked one.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum number of visible cards while the deck lasts.
    pub min_board_size: usize,

    /// Cards dealt per step when the board has no valid set.
    pub replenish_batch: usize,

    /// Length of generated room codes.
    pub room_code_length: usize,

    /// Alphabet room codes are drawn from.
    pub room_code_alphabet: String,

    /// Rooms older than this are eligible for cleanup (seconds).
    pub stale_room_secs: i64,

    /// Players required before the host may start a multiplayer game.
    pub min_players_to_start: usize,

    /// Fallback display name when an identity has none.
    pub default_player_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_board_size: 12,
            replenish_batch: SET_SIZE,
            room_code_length: 6,
            room_code_alphabet: ROOM_CODE_ALPHABET.to_string(),
            stale_room_secs: 24 * 60 * 60,
            min_players_to_start: 2,
            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

impl EngineConfig {
    /// Set the minimum board size.
    pub fn with_min_board_size(mut self, size: usize) -> Self {
        self.min_board_size = size;
        self
    }

    /// Set the replenish batch size.
    pub fn with_replenish_batch(mut self, batch: usize) -> Self {
        self.replenish_batch = batch.max(1);
        self
    }

    /// Set the room code length.
    pub fn with_room_code_length(mut self, length: usize) -> Self {
        self.room_code_length = length;
        self
    }

    /// Set the stale-room threshold.
    pub fn with_stale_room_age(mut self, age: Duration) -> Self {
        self.stale_room_secs = age.num_seconds();
        self
    }

    /// Set the minimum number of players to start.
    pub fn with_min_players_to_start(mut self, count: usize) -> Self {
        self.min_players_to_start = count;
        self
    }

    /// Stale-room threshold as a duration.
    #[must_use]
    pub fn stale_room_age(&self) -> Duration {
        Duration::seconds(self.stale_room_secs)
    }
}
