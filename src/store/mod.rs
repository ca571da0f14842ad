//! External boundaries: session persistence and player identity.
//!
//! ## Key Types
//!
//! - `StateStore`: key -> snapshot store with versions and change subscriptions
//! - `SessionSnapshot`: a whole solo or multiplayer session, bincode-encoded
//! - `MemoryStore`: in-process reference store
//! - `IdentityProvider` / `LocalIdentity`: stable player identity
//!
//! ## Concurrency
//!
//! Sessions are plain values mutated through `&mut self`. Two writers racing
//! on the same room are serialized by the store: `update_room` reads a
//! version, applies the change and writes back with `compare_and_set`. A
//! writer that loses the race gets `StoreError::Conflict` and decides for
//! itself whether to reload and retry.

pub mod identity;
pub mod memory;
pub mod snapshot;

pub use identity::{IdentityProvider, LocalIdentity};
pub use memory::MemoryStore;
pub use snapshot::SessionSnapshot;

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};

use crate::core::{GameRng, PlayerId, StoreError, StoreResult};
use crate::games::{ClaimResult, MultiplayerSession, SoloSession};
use crate::rules::ClaimRequest;

/// Handle returned by `subscribe`.
pub type SubscriptionId = u64;

/// Change callback. Receives the new snapshot, or `None` when the key is removed.
pub type OnChange = Box<dyn Fn(Option<&SessionSnapshot>) + Send + Sync>;

/// Attempts at finding an unused room code before giving up.
pub const MAX_ROOM_CODE_ATTEMPTS: usize = 64;

/// Key -> snapshot storage.
///
/// Every key carries a version that grows by one on each write or removal.
/// Absent keys report the version they were last left at (0 if never used).
pub trait StateStore {
    /// Snapshot and its version.
    fn get_versioned(&self, key: &str) -> StoreResult<Option<(u64, SessionSnapshot)>>;

    fn get(&self, key: &str) -> StoreResult<Option<SessionSnapshot>> {
        Ok(self.get_versioned(key)?.map(|(_, snapshot)| snapshot))
    }

    fn version(&self, key: &str) -> StoreResult<u64>;

    /// Unconditional write. Returns the new version.
    fn set(&self, key: &str, snapshot: &SessionSnapshot) -> StoreResult<u64>;

    /// Write only if the key is still at `expected`. Returns the new version.
    fn compare_and_set(
        &self,
        key: &str,
        expected: u64,
        snapshot: &SessionSnapshot,
    ) -> StoreResult<u64>;

    /// Returns whether anything was removed.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    fn keys(&self) -> StoreResult<Vec<String>>;

    fn subscribe(&self, key: &str, on_change: OnChange) -> StoreResult<SubscriptionId>;

    /// Returns whether the subscription existed.
    fn unsubscribe(&self, id: SubscriptionId) -> StoreResult<bool>;
}

/// Give `room` an unused room code and store it. Returns the code.
pub fn create_room<S: StateStore + ?Sized>(
    store: &S,
    room: &mut MultiplayerSession,
    rng: &mut GameRng,
) -> StoreResult<String> {
    let (alphabet, length) = {
        let config = room.core().config();
        (config.room_code_alphabet.clone(), config.room_code_length)
    };

    for _ in 0..MAX_ROOM_CODE_ATTEMPTS {
        let code = rng.code(&alphabet, length);
        let version = store.version(&code)?;
        if store.get(&code)?.is_some() {
            continue;
        }

        room.set_room_code(code.clone());
        match store.compare_and_set(&code, version, &SessionSnapshot::Multiplayer(room.clone())) {
            Ok(_) => {
                info!("Created room {}", code);
                return Ok(code);
            }
            // Someone took the code between the check and the write.
            Err(StoreError::Conflict { .. }) => continue,
            Err(err) => return Err(err),
        }
    }

    Err(StoreError::Unavailable(format!(
        "no free room code after {} attempts",
        MAX_ROOM_CODE_ATTEMPTS
    )))
}

/// Load a room.
pub fn load_room<S: StateStore + ?Sized>(
    store: &S,
    code: &str,
) -> StoreResult<(u64, MultiplayerSession)> {
    let (version, snapshot) = store
        .get_versioned(code)?
        .ok_or_else(|| StoreError::NotFound(code.to_string()))?;
    let room = snapshot
        .into_multiplayer()
        .ok_or_else(|| StoreError::WrongKind(code.to_string()))?;
    Ok((version, room))
}

/// Read-modify-write a room under compare-and-set.
///
/// `f` runs on a private copy. The copy is written back only if nobody else
/// wrote the room in between; otherwise `StoreError::Conflict` is returned
/// and the store is left as the other writer made it.
pub fn update_room<S, F, T>(store: &S, code: &str, f: F) -> StoreResult<T>
where
    S: StateStore + ?Sized,
    F: FnOnce(&mut MultiplayerSession) -> T,
{
    let (version, mut room) = load_room(store, code)?;
    let out = f(&mut room);

    match store.compare_and_set(code, version, &SessionSnapshot::Multiplayer(room)) {
        Ok(_) => Ok(out),
        Err(err @ StoreError::Conflict { .. }) => {
            warn!("Lost update on room {}: {}", code, err);
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// Claim in a stored room. Rejected claims do not write.
pub fn claim_in_room<S: StateStore + ?Sized>(
    store: &S,
    code: &str,
    player_id: &PlayerId,
    request: impl Into<ClaimRequest>,
) -> StoreResult<ClaimResult> {
    let (version, mut room) = load_room(store, code)?;
    let result = room.attempt_claim(player_id, request);
    if !result.accepted {
        return Ok(result);
    }

    match store.compare_and_set(code, version, &SessionSnapshot::Multiplayer(room)) {
        Ok(_) => Ok(result),
        Err(err @ StoreError::Conflict { .. }) => {
            warn!("Claim by {} in room {} lost a race: {}", player_id, code, err);
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// Store a solo session under its game id. Returns the key.
pub fn save_solo<S: StateStore + ?Sized>(store: &S, session: &SoloSession) -> StoreResult<String> {
    let key = session.core().game_id().to_string();
    store.set(&key, &SessionSnapshot::Solo(session.clone()))?;
    Ok(key)
}

pub fn load_solo<S: StateStore + ?Sized>(store: &S, key: &str) -> StoreResult<SoloSession> {
    store
        .get(key)?
        .ok_or_else(|| StoreError::NotFound(key.to_string()))?
        .into_solo()
        .ok_or_else(|| StoreError::WrongKind(key.to_string()))
}

/// Remove rooms created more than `max_age` before `now`. Returns their codes.
///
/// Solo sessions are never touched.
pub fn cleanup_stale_rooms<S: StateStore + ?Sized>(
    store: &S,
    now: DateTime<Utc>,
    max_age: Duration,
) -> StoreResult<Vec<String>> {
    let mut removed = Vec::new();
    for key in store.keys()? {
        let stale = match store.get(&key)? {
            Some(SessionSnapshot::Multiplayer(room)) => now - room.created_at() > max_age,
            _ => false,
        };
        if stale && store.remove(&key)? {
            removed.push(key);
        }
    }

    if !removed.is_empty() {
        info!("Removed {} stale rooms", removed.len());
    }
    Ok(removed)
}
