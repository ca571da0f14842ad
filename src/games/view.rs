//! Read-only projections of a session for rendering.
//!
//! Views are plain data built on demand. They copy what they show, so a
//! view never holds a borrow on the session it came from.

use chrono::Duration;
use uuid::Uuid;

use crate::cards::{Card, ThemeConfiguration};
use crate::core::{LogEntry, Player, PlayerId};

/// Elapsed time as `m:ss`; minutes are not capped at 59.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// One-line board status.
#[must_use]
pub fn status_message(available_sets: usize) -> String {
    match available_sets {
        0 => "Status: No sets can be found.".to_string(),
        1 => "Status: 1 set can be found.".to_string(),
        n => format!("Status: {} sets can be found.", n),
    }
}

/// What a solo player sees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoloView {
    pub game_id: Uuid,
    pub visible_cards: Vec<Card>,
    /// Newest first.
    pub log: Vec<LogEntry>,
    pub current_player_index: u32,
    pub player_name: String,
    pub score: u32,
    pub elapsed: Duration,
    pub formatted_time: String,
    pub remaining_cards: usize,
    pub available_sets: usize,
    pub status_message: String,
    pub is_complete: bool,
    /// Empty until the game is complete.
    pub end_message: String,
    pub theme: ThemeConfiguration,
}

/// What one multiplayer participant sees during play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiplayerView {
    pub game_id: Uuid,
    pub room_code: String,
    pub visible_cards: Vec<Card>,
    /// Newest first.
    pub log: Vec<LogEntry>,
    /// Viewer's 1-based roster position; 1 for viewers not on the roster.
    pub current_player_index: u32,
    pub viewer_id: PlayerId,
    /// Empty for viewers not on the roster.
    pub viewer_name: String,
    pub is_host: bool,
    pub elapsed: Duration,
    pub formatted_time: String,
    pub remaining_cards: usize,
    pub available_sets: usize,
    pub status_message: String,
    pub is_started: bool,
    pub is_complete: bool,
    pub end_message: String,
    pub winner: Option<Player>,
    /// Empty while there is no winner.
    pub winner_name: String,
    pub leaderboard: Vec<Player>,
    pub theme: ThemeConfiguration,
}

/// What one participant sees in the lobby.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitingRoomView {
    pub room_code: String,
    /// Roster order, host first.
    pub players: Vec<Player>,
    pub viewer_id: PlayerId,
    pub viewer_name: String,
    pub is_host: bool,
    pub all_ready: bool,
    /// Viewer is host and enough players have joined.
    pub can_start: bool,
}
