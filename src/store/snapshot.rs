//! Whole-session snapshots and their wire encoding.

use serde::{Deserialize, Serialize};

use crate::core::StoreResult;
use crate::games::{MultiplayerSession, SoloSession};

/// A session as written to a store.
///
/// Snapshots are copied in and out of the store whole; nobody outside the
/// store ever holds a live reference to stored state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionSnapshot {
    Solo(SoloSession),
    Multiplayer(MultiplayerSession),
}

impl SessionSnapshot {
    /// Encode with bincode.
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by [`SessionSnapshot::encode`].
    pub fn decode(bytes: &[u8]) -> StoreResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    #[must_use]
    pub fn as_multiplayer(&self) -> Option<&MultiplayerSession> {
        match self {
            SessionSnapshot::Multiplayer(room) => Some(room),
            SessionSnapshot::Solo(_) => None,
        }
    }

    #[must_use]
    pub fn into_multiplayer(self) -> Option<MultiplayerSession> {
        match self {
            SessionSnapshot::Multiplayer(room) => Some(room),
            SessionSnapshot::Solo(_) => None,
        }
    }

    #[must_use]
    pub fn into_solo(self) -> Option<SoloSession> {
        match self {
            SessionSnapshot::Solo(session) => Some(session),
            SessionSnapshot::Multiplayer(_) => None,
        }
    }
}

impl From<SoloSession> for SessionSnapshot {
    fn from(session: SoloSession) -> Self {
        SessionSnapshot::Solo(session)
    }
}

impl From<MultiplayerSession> for SessionSnapshot {
    fn from(room: MultiplayerSession) -> Self {
        SessionSnapshot::Multiplayer(room)
    }
}
