//! Player identity and the multiplayer roster.
//!
//! ## PlayerId
//!
//! Stable identity string issued by the identity provider.
//!
//! ## Roster
//!
//! Join-ordered list of players with the host pinned first. At most one
//! entry per identity; the host identity is fixed when the roster is made.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::RosterError;

/// Stable player identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A roster entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub ready: bool,
    pub joined_at: DateTime<Utc>,
}

impl Player {
    /// A new, unready player with no points.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
            ready: false,
            joined_at: Utc::now(),
        }
    }
}

/// Players in a multiplayer session.
///
/// ## Example
///
/// ```
/// use set_engine::core::{Player, PlayerId, Roster};
///
/// let mut roster = Roster::with_host(PlayerId::new("host"));
/// roster.add(Player::new("guest", ""), "Player");
/// roster.add(Player::new("host", "Hana"), "Player");
///
/// let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, vec!["Hana", "Player 1"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    host: Option<PlayerId>,
    players: Vec<Player>,
}

impl Roster {
    /// An empty roster whose host is fixed to `host`.
    #[must_use]
    pub fn with_host(host: PlayerId) -> Self {
        Self {
            host: Some(host),
            players: Vec::new(),
        }
    }

    #[must_use]
    pub fn host_id(&self) -> Option<&PlayerId> {
        self.host.as_ref()
    }

    #[must_use]
    pub fn is_host(&self, id: &PlayerId) -> bool {
        self.host.as_ref() == Some(id)
    }

    /// The host's roster entry, if the host has joined.
    #[must_use]
    pub fn host(&self) -> Option<&Player> {
        self.host.as_ref().and_then(|id| self.get(id))
    }

    /// Add a player, or rename them if their identity is already present.
    ///
    /// New players without a name become `"{default_prefix} N"` where N is
    /// the roster size after joining. The host is inserted first; everyone
    /// else is appended. Returns the player's 0-based roster position.
    pub fn add(&mut self, mut player: Player, default_prefix: &str) -> usize {
        if let Some(pos) = self.position(&player.id) {
            if !player.name.trim().is_empty() {
                self.players[pos].name = player.name;
            }
            return pos;
        }

        if player.name.trim().is_empty() {
            player.name = format!("{} {}", default_prefix, self.players.len() + 1);
        }

        if self.is_host(&player.id) {
            self.players.insert(0, player);
            0
        } else {
            self.players.push(player);
            self.players.len() - 1
        }
    }

    /// Remove a player. Returns the removed entry.
    pub fn remove(&mut self, id: &PlayerId) -> Option<Player> {
        let pos = self.position(id)?;
        Some(self.players.remove(pos))
    }

    #[must_use]
    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// 0-based roster position.
    #[must_use]
    pub fn position(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Mark a player ready or not.
    pub fn set_ready(&mut self, id: &PlayerId, ready: bool) -> Result<(), RosterError> {
        let player = self
            .get_mut(id)
            .ok_or_else(|| RosterError::PlayerNotFound(id.to_string()))?;
        player.ready = ready;
        Ok(())
    }

    /// More than one player, and every one of them ready.
    #[must_use]
    pub fn all_ready(&self) -> bool {
        self.players.len() > 1 && self.players.iter().all(|p| p.ready)
    }

    /// Players by descending score; ties keep roster order.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<&Player> {
        let mut board: Vec<_> = self.players.iter().collect();
        board.sort_by(|a, b| b.score.cmp(&a.score));
        board
    }

    /// Highest scorer; the earliest in roster order wins ties.
    #[must_use]
    pub fn leader(&self) -> Option<&Player> {
        self.players.iter().fold(None, |best: Option<&Player>, p| match best {
            Some(b) if b.score >= p.score => Some(b),
            _ => Some(p),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::with_host(PlayerId::new("h"));
        roster.add(Player::new("h", "Host"), "Player");
        roster.add(Player::new("a", "Ann"), "Player");
        roster.add(Player::new("b", "Ben"), "Player");
        roster
    }

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new("abc");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(format!("{}", id), "abc");
        assert_eq!(PlayerId::from("abc"), id);
    }

    #[test]
    fn test_host_pinned_first() {
        let mut roster = Roster::with_host(PlayerId::new("h"));
        roster.add(Player::new("a", "Ann"), "Player");
        let pos = roster.add(Player::new("h", "Host"), "Player");

        assert_eq!(pos, 0);
        assert_eq!(roster.host().map(|p| p.name.as_str()), Some("Host"));
        assert_eq!(roster.position(&PlayerId::new("a")), Some(1));
    }

    #[test]
    fn test_readd_renames_in_place() {
        let mut roster = roster();
        let pos = roster.add(Player::new("a", "Annie"), "Player");

        assert_eq!(pos, 1);
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.get(&PlayerId::new("a")).unwrap().name, "Annie");

        // A blank name does not wipe the existing one.
        roster.add(Player::new("a", ""), "Player");
        assert_eq!(roster.get(&PlayerId::new("a")).unwrap().name, "Annie");
    }

    #[test]
    fn test_default_names() {
        let mut roster = Roster::default();
        roster.add(Player::new("x", ""), "Player");
        roster.add(Player::new("y", "  "), "Player");
        let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Player 1", "Player 2"]);
    }

    #[test]
    fn test_remove() {
        let mut roster = roster();
        let removed = roster.remove(&PlayerId::new("a")).unwrap();
        assert_eq!(removed.name, "Ann");
        assert_eq!(roster.len(), 2);
        assert!(roster.remove(&PlayerId::new("zzz")).is_none());
        // Host identity survives the host leaving.
        roster.remove(&PlayerId::new("h"));
        assert!(roster.is_host(&PlayerId::new("h")));
        assert!(roster.host().is_none());
    }

    #[test]
    fn test_ready() {
        let mut roster = roster();
        assert!(!roster.all_ready());
        for id in ["h", "a", "b"] {
            roster.set_ready(&PlayerId::new(id), true).unwrap();
        }
        assert!(roster.all_ready());
        assert_eq!(
            roster.set_ready(&PlayerId::new("nobody"), true),
            Err(RosterError::PlayerNotFound("nobody".into()))
        );
    }

    #[test]
    fn test_single_ready_player_is_not_all_ready() {
        let mut roster = Roster::default();
        roster.add(Player::new("solo", "S"), "Player");
        roster.set_ready(&PlayerId::new("solo"), true).unwrap();
        assert!(!roster.all_ready());
    }

    #[test]
    fn test_leaderboard_stable() {
        let mut roster = roster();
        roster.get_mut(&PlayerId::new("a")).unwrap().score = 3;
        roster.get_mut(&PlayerId::new("b")).unwrap().score = 3;
        roster.get_mut(&PlayerId::new("h")).unwrap().score = 1;

        let order: Vec<_> = roster.leaderboard().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "h"]);
        assert_eq!(roster.leader().unwrap().id.as_str(), "a");
    }

    #[test]
    fn test_leader_empty() {
        assert!(Roster::default().leader().is_none());
    }

    #[test]
    fn test_roster_serialization() {
        let roster = roster();
        let json = serde_json::to_string(&roster).unwrap();
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(roster, back);
    }
}
