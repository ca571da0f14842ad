//! In-process `StateStore`.
//!
//! Snapshots are held bincode-encoded, so every read hands back a fresh copy
//! and every write goes through the same codec a remote store would use.
//! Versions are per key and only ever grow, including across removal.

use std::sync::{Arc, Mutex, MutexGuard};

use rustc_hash::FxHashMap;

use super::snapshot::SessionSnapshot;
use super::{OnChange, StateStore, SubscriptionId};
use crate::core::{StoreError, StoreResult};

type Listener = Arc<dyn Fn(Option<&SessionSnapshot>) + Send + Sync>;

struct Subscriber {
    key: String,
    on_change: Listener,
}

#[derive(Default)]
struct Inner {
    entries: FxHashMap<String, Vec<u8>>,
    versions: FxHashMap<String, u64>,
    subscribers: FxHashMap<SubscriptionId, Subscriber>,
    next_subscription: SubscriptionId,
}

impl Inner {
    fn version(&self, key: &str) -> u64 {
        self.versions.get(key).copied().unwrap_or(0)
    }

    fn bump(&mut self, key: &str) -> u64 {
        let version = self.version(key) + 1;
        self.versions.insert(key.to_string(), version);
        version
    }

    fn listeners(&self, key: &str) -> Vec<Listener> {
        self.subscribers
            .values()
            .filter(|s| s.key == key)
            .map(|s| Arc::clone(&s.on_change))
            .collect()
    }
}

/// Thread-safe in-memory store.
///
/// Subscriber callbacks run synchronously on the writing thread after the
/// write is committed and the lock released, so a callback may read the
/// store again.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(
        &self,
        key: &str,
        expected: Option<u64>,
        snapshot: &SessionSnapshot,
    ) -> StoreResult<u64> {
        let bytes = snapshot.encode()?;
        let (version, listeners) = {
            let mut inner = self.lock()?;
            if let Some(expected) = expected {
                let actual = inner.version(key);
                if actual != expected {
                    return Err(StoreError::Conflict {
                        key: key.to_string(),
                        expected,
                        actual,
                    });
                }
            }
            inner.entries.insert(key.to_string(), bytes);
            (inner.bump(key), inner.listeners(key))
        };

        for listener in listeners {
            listener(Some(snapshot));
        }
        Ok(version)
    }
}

impl StateStore for MemoryStore {
    fn get_versioned(&self, key: &str) -> StoreResult<Option<(u64, SessionSnapshot)>> {
        let inner = self.lock()?;
        match inner.entries.get(key) {
            Some(bytes) => Ok(Some((inner.version(key), SessionSnapshot::decode(bytes)?))),
            None => Ok(None),
        }
    }

    fn version(&self, key: &str) -> StoreResult<u64> {
        Ok(self.lock()?.version(key))
    }

    fn set(&self, key: &str, snapshot: &SessionSnapshot) -> StoreResult<u64> {
        self.write(key, None, snapshot)
    }

    fn compare_and_set(
        &self,
        key: &str,
        expected: u64,
        snapshot: &SessionSnapshot,
    ) -> StoreResult<u64> {
        self.write(key, Some(expected), snapshot)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let listeners = {
            let mut inner = self.lock()?;
            if inner.entries.remove(key).is_none() {
                return Ok(false);
            }
            inner.bump(key);
            inner.listeners(key)
        };

        for listener in listeners {
            listener(None);
        }
        Ok(true)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let inner = self.lock()?;
        let mut keys: Vec<_> = inner.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn subscribe(&self, key: &str, on_change: OnChange) -> StoreResult<SubscriptionId> {
        let mut inner = self.lock()?;
        inner.next_subscription += 1;
        let id = inner.next_subscription;
        inner.subscribers.insert(
            id,
            Subscriber {
                key: key.to_string(),
                on_change: Arc::from(on_change),
            },
        );
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> StoreResult<bool> {
        Ok(self.lock()?.subscribers.remove(&id).is_some())
    }
}
