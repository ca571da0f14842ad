//! Who the local user is.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{Player, PlayerId, DEFAULT_PLAYER_NAME};

/// Source of a stable player identity and display name.
pub trait IdentityProvider {
    /// Stable identity; never changes for the lifetime of the provider.
    fn id(&self) -> PlayerId;

    /// Current display name, falling back to a default when unset.
    fn display_name(&self) -> String;

    fn set_display_name(&mut self, name: &str);

    /// A fresh roster entry for this identity.
    fn player(&self) -> Player {
        Player::new(self.id(), self.display_name())
    }
}

/// Identity kept in process, with a random v4 id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalIdentity {
    id: PlayerId,
    name: Option<String>,
}

impl LocalIdentity {
    /// A new identity with a random id and no name.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(PlayerId::new(Uuid::new_v4().to_string()))
    }

    /// An identity with a known id, e.g. restored from storage.
    #[must_use]
    pub fn with_id(id: PlayerId) -> Self {
        Self { id, name: None }
    }
}

impl Default for LocalIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for LocalIdentity {
    fn id(&self) -> PlayerId {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string())
    }

    /// Blank names clear the name back to the default.
    fn set_display_name(&mut self, name: &str) {
        let name = name.trim();
        self.name = (!name.is_empty()).then(|| name.to_string());
    }
}
